//! Semicolon-delimited table writers
//!
//! Each table gets a fixed header row and one record per row struct,
//! written with the `csv` crate so delimiter, quote and newline escaping
//! follow standard CSV quoting and the output round-trips through any
//! conforming reader. Headers are written explicitly so an empty table
//! still carries its header row.

use csv::WriterBuilder;
use serde::Serialize;

use crate::error::Result;
use crate::models::{ActivityRow, LapRow, TrackpointRow};

const DELIMITER: u8 = b';';

pub(crate) const ACTIVITY_HEADERS: [&str; 4] =
    ["ActivityId", "ActivitySport", "CreatorName", "ProductID"];

pub(crate) const LAP_HEADERS: [&str; 13] = [
    "ActivityId",
    "LapNumber",
    "TotalTimeSeconds",
    "DistanceMeters",
    "Calories",
    "AverageHeartRateBpm",
    "MaximumHeartRateBpm",
    "MaximumSpeed",
    "AvgRunCadence",
    "MaxRunCadence",
    "Intensity",
    "StartTime",
    "TriggerMethod",
];

pub(crate) const TRACKPOINT_HEADERS: [&str; 11] = [
    "ActivityId",
    "LapNumber",
    "TrackNumber",
    "AltitudeMeters",
    "DistanceMeters",
    "RunCadence",
    "Speed",
    "HeartRateBpm",
    "LatitudeDegrees",
    "LongitudeDegrees",
    "Time",
];

pub fn write_activities(rows: &[ActivityRow]) -> Result<Vec<u8>> {
    write_table(&ACTIVITY_HEADERS, rows)
}

pub fn write_laps(rows: &[LapRow]) -> Result<Vec<u8>> {
    write_table(&LAP_HEADERS, rows)
}

pub fn write_trackpoints(rows: &[TrackpointRow]) -> Result<Vec<u8>> {
    write_table(&TRACKPOINT_HEADERS, rows)
}

fn write_table<S: Serialize>(headers: &[&str], rows: &[S]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_writer(&mut buf);
        writer.write_record(headers)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

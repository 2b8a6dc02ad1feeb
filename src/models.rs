//! Row types for the three flattened TCX tables
//!
//! Field values are carried as raw text exactly as they appear in the
//! source document: no unit conversion, no numeric parsing. A missing
//! source element is the empty string, never a missing column. Serde
//! renames produce the exact column headers the tables declare.

use serde::Serialize;

/// One row of the Activities table: one per `<Activity>` element,
/// in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActivityRow {
    /// Declared activity identifier (`<Id>` child, required)
    pub activity_id: String,
    /// `Sport` attribute, `"Unknown"` when absent
    pub activity_sport: String,
    /// `Creator/Name`, empty when absent
    pub creator_name: String,
    /// `Creator/ProductID`, empty when absent
    #[serde(rename = "ProductID")]
    pub product_id: String,
}

/// One row of the Laps table: one per direct `<Lap>` child of an Activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LapRow {
    pub activity_id: String,
    /// 1-based sequence number, reset per activity
    pub lap_number: u32,
    pub total_time_seconds: String,
    pub distance_meters: String,
    pub calories: String,
    pub average_heart_rate_bpm: String,
    pub maximum_heart_rate_bpm: String,
    pub maximum_speed: String,
    pub avg_run_cadence: String,
    pub max_run_cadence: String,
    pub intensity: String,
    /// `StartTime` attribute on the Lap element, empty when absent
    pub start_time: String,
    pub trigger_method: String,
}

/// One row of the Trackpoints table: one per `<Trackpoint>` nested anywhere
/// beneath a Lap, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackpointRow {
    pub activity_id: String,
    pub lap_number: u32,
    /// 1-based sequence number, reset per lap
    pub track_number: u32,
    pub altitude_meters: String,
    pub distance_meters: String,
    pub run_cadence: String,
    pub speed: String,
    pub heart_rate_bpm: String,
    pub latitude_degrees: String,
    pub longitude_degrees: String,
    pub time: String,
}

/// The three row collections produced by one conversion, in strict
/// traversal order. Transient: lives only until serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedTcx {
    pub activities: Vec<ActivityRow>,
    pub laps: Vec<LapRow>,
    pub trackpoints: Vec<TrackpointRow>,
}

//! TCX-to-tabular mapping
//!
//! Walks the parsed document tree and emits one row per Activity, one per
//! Lap and one per Trackpoint, keyed by `ActivityId`, `LapNumber` and
//! `TrackNumber`. Activities and Trackpoints are located by depth-unbounded
//! descendant search so vendor-specific intermediate grouping elements do
//! not break extraction; Laps are the direct children of their Activity.

use tracing::debug;

use crate::error::{Result, TcxError};
use crate::models::{ActivityRow, FlattenedTcx, LapRow, TrackpointRow};
use crate::xml::{parse_document, Element};

/// Core TCX namespace; element lookups must match it exactly.
pub const TCX_NS: &str = "http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2";

/// Activity-extension namespace carrying cadence and speed fields.
pub const EXT_NS: &str = "http://www.garmin.com/xmlschemas/ActivityExtension/v2";

const CORE: Option<&str> = Some(TCX_NS);
const EXT: Option<&str> = Some(EXT_NS);

/// Flatten one TCX document into the three row collections.
///
/// Pure function of the input bytes. The only failure modes are malformed
/// XML and an `<Activity>` with no `<Id>` child; every other missing
/// element degrades to an empty field value.
pub fn flatten_tcx(bytes: &[u8]) -> Result<FlattenedTcx> {
    let root = parse_document(bytes)?;
    let mut flat = FlattenedTcx::default();

    for activity in root.descendants(CORE, "Activity") {
        flatten_activity(activity, &mut flat)?;
    }

    debug!(
        activities = flat.activities.len(),
        laps = flat.laps.len(),
        trackpoints = flat.trackpoints.len(),
        "flattened TCX document"
    );
    Ok(flat)
}

fn flatten_activity(activity: &Element, flat: &mut FlattenedTcx) -> Result<()> {
    // The Id child is the one element the schema guarantees; without it the
    // lap and trackpoint rows would have no key to join on.
    let activity_id = activity
        .child(CORE, "Id")
        .map(|id| id.text().to_string())
        .ok_or_else(|| {
            TcxError::Parse("Activity element has no Id child".to_string())
        })?;

    flat.activities.push(ActivityRow {
        activity_id: activity_id.clone(),
        activity_sport: activity.attr("Sport").unwrap_or("Unknown").to_string(),
        creator_name: activity.text_at(&[(CORE, "Creator"), (CORE, "Name")]),
        product_id: activity.text_at(&[(CORE, "Creator"), (CORE, "ProductID")]),
    });

    for (index, lap) in activity.children_named(CORE, "Lap").enumerate() {
        flatten_lap(lap, &activity_id, index as u32 + 1, flat);
    }
    Ok(())
}

fn flatten_lap(lap: &Element, activity_id: &str, lap_number: u32, flat: &mut FlattenedTcx) {
    flat.laps.push(LapRow {
        activity_id: activity_id.to_string(),
        lap_number,
        total_time_seconds: lap.text_at(&[(CORE, "TotalTimeSeconds")]),
        distance_meters: lap.text_at(&[(CORE, "DistanceMeters")]),
        calories: lap.text_at(&[(CORE, "Calories")]),
        average_heart_rate_bpm: lap.text_at(&[(CORE, "AverageHeartRateBpm"), (CORE, "Value")]),
        maximum_heart_rate_bpm: lap.text_at(&[(CORE, "MaximumHeartRateBpm"), (CORE, "Value")]),
        maximum_speed: lap.text_at(&[(CORE, "MaximumSpeed")]),
        avg_run_cadence: lap.text_at(&[(CORE, "Extensions"), (EXT, "LX"), (EXT, "AvgRunCadence")]),
        max_run_cadence: lap.text_at(&[(CORE, "Extensions"), (EXT, "LX"), (EXT, "MaxRunCadence")]),
        intensity: lap.text_at(&[(CORE, "Intensity")]),
        start_time: lap.attr("StartTime").unwrap_or_default().to_string(),
        trigger_method: lap.text_at(&[(CORE, "TriggerMethod")]),
    });

    // Trackpoints normally sit inside a Track container, but the search is
    // depth-unbounded so any intermediate grouping still resolves.
    for (index, point) in lap.descendants(CORE, "Trackpoint").into_iter().enumerate() {
        flat.trackpoints
            .push(flatten_trackpoint(point, activity_id, lap_number, index as u32 + 1));
    }
}

fn flatten_trackpoint(
    point: &Element,
    activity_id: &str,
    lap_number: u32,
    track_number: u32,
) -> TrackpointRow {
    TrackpointRow {
        activity_id: activity_id.to_string(),
        lap_number,
        track_number,
        altitude_meters: point.text_at(&[(CORE, "AltitudeMeters")]),
        distance_meters: point.text_at(&[(CORE, "DistanceMeters")]),
        run_cadence: point.text_at(&[(CORE, "Extensions"), (EXT, "TPX"), (EXT, "RunCadence")]),
        speed: point.text_at(&[(CORE, "Extensions"), (EXT, "TPX"), (EXT, "Speed")]),
        heart_rate_bpm: point.text_at(&[(CORE, "HeartRateBpm"), (CORE, "Value")]),
        latitude_degrees: point.text_at(&[(CORE, "Position"), (CORE, "LatitudeDegrees")]),
        longitude_degrees: point.text_at(&[(CORE, "Position"), (CORE, "LongitudeDegrees")]),
        time: point.text_at(&[(CORE, "Time")]),
    }
}

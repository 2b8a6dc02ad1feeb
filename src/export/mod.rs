//! Serialization of the flattened tables for delivery
//!
//! The conversion core hands the delivery shell three finished byte
//! buffers; the shell only names them and passes them on.

use crate::error::Result;
use crate::models::FlattenedTcx;

pub mod csv;

/// MIME type the delivery shell advertises for each table.
pub const CSV_MIME: &str = "text/csv";

/// File names under which the three tables are delivered.
pub const ACTIVITIES_FILE: &str = "activities.csv";
pub const LAPS_FILE: &str = "laps.csv";
pub const TRACKS_FILE: &str = "tracks.csv";

/// The three serialized tables of one conversion, each an independent
/// UTF-8 buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvBundle {
    pub activities: Vec<u8>,
    pub laps: Vec<u8>,
    pub tracks: Vec<u8>,
}

impl CsvBundle {
    /// Serialize a flattened document into the three delimited tables.
    pub fn from_flattened(flat: &FlattenedTcx) -> Result<Self> {
        Ok(CsvBundle {
            activities: csv::write_activities(&flat.activities)?,
            laps: csv::write_laps(&flat.laps)?,
            tracks: csv::write_trackpoints(&flat.trackpoints)?,
        })
    }

    /// The deliverable artifacts as `(name, content, mime)` triples, in the
    /// order the shell offers them.
    pub fn artifacts(&self) -> [(&'static str, &[u8], &'static str); 3] {
        [
            (ACTIVITIES_FILE, self.activities.as_slice(), CSV_MIME),
            (LAPS_FILE, self.laps.as_slice(), CSV_MIME),
            (TRACKS_FILE, self.tracks.as_slice(), CSV_MIME),
        ]
    }
}

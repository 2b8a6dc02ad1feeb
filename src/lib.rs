// Library interface for the tcxflat modules
// This allows integration tests to access the core functionality

pub mod error;
pub mod export;
pub mod flatten;
pub mod logging;
pub mod models;
pub mod xml;

// Re-export commonly used types for convenience
pub use error::{Result, TcxError};
pub use export::{CsvBundle, CSV_MIME};
pub use flatten::{flatten_tcx, EXT_NS, TCX_NS};
pub use logging::{LogFormat, LogLevel};
pub use models::{ActivityRow, FlattenedTcx, LapRow, TrackpointRow};

/// Convert one TCX document into three semicolon-delimited CSV tables.
///
/// Pure function of the input bytes: parse, flatten, serialize. Either all
/// three tables are produced or the single fatal [`TcxError::Parse`] is
/// returned and no output exists.
pub fn tcx_to_csv(bytes: &[u8]) -> Result<CsvBundle> {
    let flat = flatten_tcx(bytes)?;
    CsvBundle::from_flattened(&flat)
}

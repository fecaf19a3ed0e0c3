//! Report processing: translation, recency filtering, header and column
//! formatting, and unit normalization of vnstat text output.

pub mod filter;
pub mod format;
pub mod period;
pub mod pipeline;
pub mod translate;
pub mod units;

pub use filter::RecencyWindow;
pub use period::Period;
pub use pipeline::{process, process_at, process_range};
pub use translate::translate;
pub use units::{Unit, Volume};

/// Marks vnstat's horizontal rules between header, rows and summary.
pub const DIVIDER: &str = "---";

/// Column separator in vnstat tables.
pub const COLUMN_DELIMITER: &str = "|";

/// Translated label of projected rows.
pub const ESTIMATE_MARKER: &str = "预计";

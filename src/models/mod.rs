pub mod snapshot;
pub mod table;

pub use snapshot::*;
pub use table::*;

/// Name of the synthetic row holding the run dates.
pub const DATE_KEY: &str = "Date";

/// Format used for run dates in the persisted table.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

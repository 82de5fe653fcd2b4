pub mod filters;
pub mod flatten;
mod loader;
pub mod models;
mod validation;

pub use filters::{parse_timestamp, DateRange, Eligibility, FilterError, RollingWindow, SnapshotFilters};
pub use flatten::{flatten_nights, group_by_night, FlatRow};
pub use loader::SnapshotLoader;
pub use models::*;
pub use validation::{validate_snapshot, SnapshotError};

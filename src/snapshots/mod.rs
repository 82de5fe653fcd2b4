mod store;

pub use store::{LeagueSnapshot, SnapshotStore};

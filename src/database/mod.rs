pub mod connection;
pub mod ledger;
pub mod models;
pub mod nights;
pub mod setup;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use ledger::SqliteLedger;
pub use models::*;

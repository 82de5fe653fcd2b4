pub mod report;
pub mod server;

pub use report::{LeagueData, LeagueReport, ReportSection, ReportService};

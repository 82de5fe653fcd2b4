use crate::config::settings::AppConfig;
use crate::database::SqliteLedger;
use crate::services::report::ReportService;

pub mod reports;

pub struct AppState {
    pub reports: ReportService<SqliteLedger>,
    pub config: AppConfig,
}

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{reports::get_report_section, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/leagues/:tenant/:section", get(get_report_section))
        .with_state(state)
}

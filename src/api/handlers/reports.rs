use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use clap::ValueEnum;
use std::sync::Arc;

use super::AppState;
use crate::api::params::FilterParams;
use crate::domain::TenantId;
use crate::services::report::ReportSection;

pub async fn get_report_section(
    State(state): State<Arc<AppState>>,
    Path((tenant_id, section)): Path<(TenantId, String)>,
    Query(params): Query<FilterParams>,
) -> Response {
    let section = match ReportSection::from_str(&section, true) {
        Ok(section) => section,
        Err(_) => return (StatusCode::NOT_FOUND, format!("Unknown report section '{}'", section)).into_response(),
    };

    let mut defaults = state.config.default_filters.clone();
    defaults.as_of = Utc::now();

    let filters = match params.to_filters(&defaults) {
        Ok(filters) => filters,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };
    let sorting = match params.sorting() {
        Ok(sorting) => sorting,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let result = tokio::task::spawn_blocking(move || {
        let data = state.reports.prepare(tenant_id, &filters)?;
        data.render(section, sorting)
    })
    .await;

    match result {
        Ok(Ok(value)) => Json(value).into_response(),
        Ok(Err(e)) => {
            log::error!("Report for league {} failed: {:#}", tenant_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Report Error: {:#}", e)).into_response()
        }
        Err(e) => {
            log::error!("Report task panicked: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Report task failed").into_response()
        }
    }
}

use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::settings::AppConfig;
use crate::database::{self, setup, SqliteLedger};
use crate::services::report::ReportService;

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let pool = database::create_pool(&self.config.database.path)?;
        {
            let mut conn = database::get_connection(&pool)?;
            setup::ensure_schema(&mut conn)?;
        }
        info!("Serving league ledger from {}", self.config.database.path);

        let reports = ReportService::new(SqliteLedger::new(pool), self.config.analytics.clone());
        let state = Arc::new(AppState {
            reports,
            config: self.config.clone(),
        });

        let app = create_router(state)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

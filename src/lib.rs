pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod output;
pub mod services;
pub mod snapshots;
pub mod stats;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::Cli;
use log::info;
use std::path::Path;

use crate::api::params::FilterParams;
use crate::cli::{Command, FilterArgs};
use crate::config::settings::AppConfig;
use crate::database::{setup, SqliteLedger};
use crate::domain::{SnapshotFilters, SnapshotLoader, TenantId};
use crate::services::report::{ReportSection, ReportService};
use crate::services::server::ServerService;
use crate::snapshots::SnapshotStore;
use crate::stats::{SortKey, SortOrder};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_report(
    tenant_id: TenantId,
    section: ReportSection,
    snapshot_dir: Option<&Path>,
    summary: bool,
    args: &FilterArgs,
) -> Result<()> {
    let config = AppConfig::new();
    let params = FilterParams::from(args);
    let filters = params.to_filters(&config.default_filters)?;
    let sorting = params.sorting()?;

    let output = match snapshot_dir {
        Some(dir) => {
            info!("Reading league snapshots from {}", dir.display());
            render_report(SnapshotStore::new(dir), &config, tenant_id, &filters, section, sorting, summary)?
        }
        None => {
            let pool = database::create_pool(&config.database.path)?;
            render_report(SqliteLedger::new(pool), &config, tenant_id, &filters, section, sorting, summary)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn render_report<L: SnapshotLoader>(
    loader: L,
    config: &AppConfig,
    tenant_id: TenantId,
    filters: &SnapshotFilters,
    section: ReportSection,
    sorting: (SortKey, SortOrder),
    summary: bool,
) -> Result<String> {
    let service = ReportService::new(loader, config.analytics.clone());
    let data = service.prepare(tenant_id, filters)?;

    if summary {
        return Ok(output::format_summary(&data.full_report()));
    }

    let value = data.render(section, sorting)?;
    serde_json::to_string_pretty(&value).context("Failed to format report")
}

pub fn handle_init_db() -> Result<()> {
    let config = AppConfig::new();
    let pool = database::create_pool(&config.database.path)?;
    let mut conn = database::get_connection(&pool)?;
    setup::ensure_schema(&mut conn)?;
    info!("Ledger ready at {}", config.database.path);
    Ok(())
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

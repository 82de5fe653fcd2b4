use anyhow::Result;

use poker_league_stats::cli::Command;
use poker_league_stats::{handle_completions, handle_init_db, handle_report, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Report {
            tenant,
            section,
            snapshot_dir,
            summary,
            filters,
        } => handle_report(*tenant, *section, snapshot_dir.as_deref(), *summary, filters),
        Command::InitDb => handle_init_db(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}

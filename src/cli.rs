use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::api::params::FilterParams;
use crate::domain::{SeasonId, TenantId};
use crate::services::report::ReportSection;

#[derive(Parser, Debug)]
#[command(author, version, about = "Poker league statistics engine")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the HTTP API over the ledger database
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Compute a report for one league and print it
    Report {
        /// League id
        #[arg(short, long)]
        tenant: TenantId,
        /// Section to print (defaults to the full report)
        #[arg(short, long, value_enum, default_value_t = ReportSection::Report)]
        section: ReportSection,
        /// Read `<tenant>.json` snapshots from this directory instead of the database
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,
        /// Print a colored summary instead of JSON
        #[arg(long)]
        summary: bool,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Create the ledger schema if it is missing
    InitDb,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct FilterArgs {
    /// Preset window: all, 7, 30 or 90 days
    #[arg(long)]
    pub date_range: Option<String>,
    /// Window start, RFC 3339 or YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,
    /// Window end, RFC 3339 or YYYY-MM-DD
    #[arg(long)]
    pub to: Option<String>,
    #[arg(long)]
    pub season: Option<SeasonId>,
    /// Rolling form window: 5, 10 or 20 nights
    #[arg(long)]
    pub rolling_nights: Option<u32>,
    #[arg(long)]
    pub min_nights: Option<u32>,
    /// Minimum total buy-in in cents
    #[arg(long)]
    pub min_buy_in: Option<i64>,
    #[arg(long)]
    pub top_n: Option<usize>,
    #[arg(long)]
    pub exclude_guests: bool,
    #[arg(long)]
    pub include_drafts: bool,
    /// Reference time for relative windows
    #[arg(long)]
    pub as_of: Option<String>,
    /// Leaderboard sort key
    #[arg(long)]
    pub sort_by: Option<String>,
    /// asc or desc
    #[arg(long)]
    pub order: Option<String>,
}

impl From<&FilterArgs> for FilterParams {
    fn from(args: &FilterArgs) -> Self {
        FilterParams {
            date_range: args.date_range.clone(),
            from: args.from.clone(),
            to: args.to.clone(),
            season_id: args.season,
            rolling_nights: args.rolling_nights,
            min_nights: args.min_nights,
            min_buy_in: args.min_buy_in,
            top_n: args.top_n,
            include_guests: args.exclude_guests.then_some(false),
            include_drafts: args.include_drafts.then_some(true),
            as_of: args.as_of.clone(),
            sort_by: args.sort_by.clone(),
            order: args.order.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_command_parsing() {
        let cli = Cli::try_parse_from([
            "poker_league_stats",
            "report",
            "--tenant",
            "3",
            "--section",
            "ratings",
            "--rolling-nights",
            "10",
            "--exclude-guests",
        ])
        .unwrap();

        let Command::Report { tenant, section, filters, snapshot_dir, summary } = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(tenant, 3);
        assert_eq!(section, ReportSection::Ratings);
        assert_eq!(snapshot_dir, None);
        assert!(!summary);

        let params = FilterParams::from(&filters);
        assert_eq!(params.rolling_nights, Some(10));
        assert_eq!(params.include_guests, Some(false));
        assert_eq!(params.include_drafts, None);
    }

    #[test]
    fn test_serve_defaults_to_port_3000() {
        let cli = Cli::try_parse_from(["poker_league_stats", "serve"]).unwrap();
        assert_eq!(cli.command, Command::Serve { port: 3000 });
    }

    #[test]
    fn test_init_db_is_kebab_case() {
        let cli = Cli::try_parse_from(["poker_league_stats", "init-db"]).unwrap();
        assert_eq!(cli.command, Command::InitDb);
    }
}

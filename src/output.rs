use colored::Colorize;
use std::fmt;

use crate::services::report::LeagueReport;
use crate::stats::narrative::{format_money, format_signed_money};
use crate::stats::{CompetitivenessBadge, TrendDirection};

fn trend_arrow(direction: TrendDirection) -> String {
    match direction {
        TrendDirection::Up => "▲".green().to_string(),
        TrendDirection::Down => "▼".red().to_string(),
        TrendDirection::Flat => "▶".dimmed().to_string(),
    }
}

fn badge(badge: CompetitivenessBadge) -> String {
    match badge {
        CompetitivenessBadge::Dominated => badge.to_string().red().bold().to_string(),
        CompetitivenessBadge::Competitive => badge.to_string().green().bold().to_string(),
    }
}

/// Terminal rendering of a full report
pub struct Summary<'a>(pub &'a LeagueReport);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let overview = &report.overview;

        writeln!(f, "{}", "League summary".bold().underline())?;
        writeln!(
            f,
            "{} nights, {} players, total pot {}",
            overview.total_nights,
            overview.unique_players,
            format_money(overview.total_pot)
        )?;
        writeln!(f, "Competitiveness: {}", badge(report.competitiveness.badge))?;

        if !report.skill_ratings.is_empty() {
            writeln!(f, "\n{}", "Ratings".bold())?;
            for row in &report.skill_ratings {
                let change = format!("{:+.1}", row.recent_change);
                let change = if row.recent_change >= 0.0 { change.green() } else { change.red() };
                writeln!(f, "  {:<20} {:>7.1} {}", row.name, row.rating, change)?;
            }
        }

        if !report.rolling_form.is_empty() {
            writeln!(f, "\n{}", "Form".bold())?;
            for row in &report.rolling_form {
                writeln!(
                    f,
                    "  {} {:<20} {}",
                    trend_arrow(row.trend_direction),
                    row.name,
                    format_signed_money(row.profit_in_window)
                )?;
            }
        }

        writeln!(f, "\n{}", report.insights.text.italic())
    }
}

pub fn format_summary(report: &LeagueReport) -> String {
    Summary(report).to_string()
}

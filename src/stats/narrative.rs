use super::types::{
    CompetitivenessBadge, CompetitivenessResult, InsightFacts, InsightsNarrative, LeagueOverview,
    SkillRatingRow,
};
use crate::domain::Cents;

pub fn compose_insights(
    overview: &LeagueOverview,
    ratings: &[SkillRatingRow],
    competitiveness: &CompetitivenessResult,
) -> InsightsNarrative {
    let facts = collect_facts(overview, ratings, competitiveness);
    InsightsNarrative {
        text: render(&facts),
        facts,
    }
}

fn collect_facts(
    overview: &LeagueOverview,
    ratings: &[SkillRatingRow],
    competitiveness: &CompetitivenessResult,
) -> InsightFacts {
    let profit_leader = overview
        .players
        .iter()
        .filter(|p| p.total_profit > 0)
        .max_by(|a, b| {
            a.total_profit
                .cmp(&b.total_profit)
                .then_with(|| b.player_id.cmp(&a.player_id))
        })
        .map(|p| (p.name.clone(), p.total_profit));

    InsightFacts {
        total_nights: overview.total_nights,
        total_pot: overview.total_pot,
        unique_players: overview.unique_players,
        profit_leader,
        top_rated: ratings.first().map(|r| (r.name.clone(), r.rating)),
        badge: competitiveness.badge,
        top1_share: competitiveness.top1_share,
    }
}

fn render(facts: &InsightFacts) -> String {
    if facts.total_nights == 0 {
        return "No nights have been played yet.".to_string();
    }

    let mut sentences = vec![format!(
        "{} played with a total pot of {} across {}.",
        plural(facts.total_nights, "night"),
        format_money(facts.total_pot),
        plural(facts.unique_players, "player"),
    )];

    if let Some((name, profit)) = &facts.profit_leader {
        sentences.push(format!("{} leads the table at {}.", name, format_signed_money(*profit)));
    }
    if let Some((name, rating)) = &facts.top_rated {
        sentences.push(format!("{} holds the top skill rating at {:.0}.", name, rating));
    }

    sentences.push(match facts.badge {
        CompetitivenessBadge::Dominated => format!(
            "The league is dominated: the leader holds {:.0}% of all winnings.",
            facts.top1_share * 100.0
        ),
        CompetitivenessBadge::Competitive => "The league is competitive.".to_string(),
    });

    sentences.join(" ")
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub fn format_money(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

pub fn format_signed_money(cents: Cents) -> String {
    if cents > 0 {
        format!("+{}", format_money(cents))
    } else {
        format_money(cents)
    }
}

use super::scoring::to_major_units;
use super::types::{
    CompetitivenessBadge, CompetitivenessResult, DistributionBucket, Distributions, PlayerStatsRow,
};
use crate::config::settings::AnalyticsSettings;
use crate::domain::Cents;

/// Profit and ROI histograms over eligible players
pub fn calculate_distributions(players: &[PlayerStatsRow], settings: &AnalyticsSettings) -> Distributions {
    let eligible: Vec<&PlayerStatsRow> = players.iter().filter(|p| p.meets_eligibility).collect();

    let profits: Vec<f64> = eligible.iter().map(|p| to_major_units(p.total_profit)).collect();
    let rois: Vec<f64> = eligible.iter().filter_map(|p| p.roi).map(|r| r * 100.0).collect();

    Distributions {
        profit: build_histogram(&profits, settings.bucket_count),
        roi: build_histogram(&rois, settings.bucket_count),
    }
}

/// Equal-width buckets keyed by their lower bound, empty buckets included
pub fn build_histogram(values: &[f64], bucket_count: i64) -> Vec<DistributionBucket> {
    let Some((min, max)) = value_range(values) else {
        return Vec::new();
    };

    // width from the raw range; the floored minimum only anchors the first bucket
    let width = (((max - min) / bucket_count.max(1) as f64).ceil() as i64).max(1);
    let low = min.floor() as i64;
    let buckets = ((max - low as f64) / width as f64).floor() as usize + 1;

    let mut counts = vec![0usize; buckets];
    for value in values {
        let idx = ((value - low as f64) / width as f64).floor() as usize;
        counts[idx.min(buckets - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| {
            let lower_bound = low + idx as i64 * width;
            DistributionBucket {
                lower_bound,
                upper_bound: lower_bound + width,
                count,
            }
        })
        .collect()
}

fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |range, &v| match range {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// How concentrated the winnings are among the top finishers
pub fn calculate_competitiveness(players: &[PlayerStatsRow], settings: &AnalyticsSettings) -> CompetitivenessResult {
    let mut winners: Vec<&PlayerStatsRow> = players.iter().filter(|p| p.total_profit > 0).collect();
    winners.sort_by(|a, b| {
        b.total_profit
            .cmp(&a.total_profit)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    let total: Cents = winners.iter().map(|p| p.total_profit).sum();
    if total <= 0 {
        return CompetitivenessResult {
            top1_share: 0.0,
            top3_share: 0.0,
            positive_profit_total: 0,
            leader_id: None,
            leader_name: None,
            badge: CompetitivenessBadge::Competitive,
        };
    }

    let top1: Cents = winners[0].total_profit;
    let top3: Cents = winners.iter().take(3).map(|p| p.total_profit).sum();
    let top1_share = top1 as f64 / total as f64;

    CompetitivenessResult {
        top1_share,
        top3_share: top3 as f64 / total as f64,
        positive_profit_total: total,
        leader_id: Some(winners[0].player_id),
        leader_name: Some(winners[0].name.clone()),
        badge: if top1_share > settings.dominated_threshold {
            CompetitivenessBadge::Dominated
        } else {
            CompetitivenessBadge::Competitive
        },
    }
}

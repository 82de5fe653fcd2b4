use std::cmp::Ordering;

use crate::domain::FlatRow;

/// Orders one night's rows by profit, highest first.
///
/// Equal profits fall back to player id ascending so that podium places and
/// rating ranks come out the same on every run.
pub fn rank_night(rows: &[FlatRow]) -> Vec<&FlatRow> {
    let mut ranked: Vec<&FlatRow> = rows.iter().collect();
    ranked.sort_by(|a, b| compare_finish(a, b));
    ranked
}

fn compare_finish(a: &FlatRow, b: &FlatRow) -> Ordering {
    b.profit
        .cmp(&a.profit)
        .then_with(|| a.player_id.cmp(&b.player_id))
}

/// Points for a 0-based finishing position
pub fn podium_points_for(position: usize, table: &[u32; 3]) -> u32 {
    table.get(position).copied().unwrap_or(0)
}

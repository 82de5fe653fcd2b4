use std::collections::HashMap;

use super::scoring::roi;
use super::types::{RollingFormRow, TrendDirection};
use crate::domain::{group_by_night, Cents, FlatRow, PlayerId};

#[derive(Default)]
struct WindowTotals {
    name: String,
    nights: u32,
    buy_in: Cents,
    profit: Cents,
}

impl WindowTotals {
    fn roi(&self) -> Option<f64> {
        roi(self.profit, self.buy_in)
    }
}

/// Compares each player's last `window` nights against the `window` nights before them.
///
/// Only players who played in the current window are reported. A player
/// missing from a window contributes nothing to it.
pub fn rolling_form(rows: &[FlatRow], window: usize, top_n: usize) -> Vec<RollingFormRow> {
    let nights = group_by_night(rows);
    let current_start = nights.len().saturating_sub(window);
    let comparison_start = current_start.saturating_sub(window);

    let (current_order, current) = sum_window(&nights[current_start..]);
    let (_, comparison) = sum_window(&nights[comparison_start..current_start]);

    let mut form: Vec<RollingFormRow> = current_order
        .into_iter()
        .filter_map(|id| current.get(&id).map(|totals| build_form_row(id, totals, comparison.get(&id))))
        .collect();

    form.sort_by(|a, b| {
        b.profit_in_window
            .cmp(&a.profit_in_window)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    form.truncate(top_n);
    form
}

fn sum_window(nights: &[&[FlatRow]]) -> (Vec<PlayerId>, HashMap<PlayerId, WindowTotals>) {
    let mut order = Vec::new();
    let mut totals: HashMap<PlayerId, WindowTotals> = HashMap::new();

    for row in nights.iter().flat_map(|night| night.iter()) {
        let entry = totals.entry(row.player_id).or_insert_with(|| {
            order.push(row.player_id);
            WindowTotals::default()
        });
        entry.name = row.name.clone();
        entry.nights += 1;
        entry.buy_in += row.buy_in;
        entry.profit += row.profit;
    }

    (order, totals)
}

fn build_form_row(player_id: PlayerId, current: &WindowTotals, comparison: Option<&WindowTotals>) -> RollingFormRow {
    let roi_in_window = current.roi();
    let comparison_roi = comparison.and_then(WindowTotals::roi);

    RollingFormRow {
        player_id,
        name: current.name.clone(),
        nights_in_window: current.nights,
        buy_in_in_window: current.buy_in,
        profit_in_window: current.profit,
        roi_in_window,
        comparison_roi,
        trend_direction: trend(roi_in_window, comparison_roi),
    }
}

fn trend(current: Option<f64>, previous: Option<f64>) -> TrendDirection {
    match (current, previous) {
        (Some(now), Some(before)) if now > before => TrendDirection::Up,
        (Some(now), Some(before)) if now < before => TrendDirection::Down,
        _ => TrendDirection::Flat,
    }
}

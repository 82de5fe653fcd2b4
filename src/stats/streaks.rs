use std::collections::HashMap;

use super::types::{RecordItem, RecordKind, StreakRow};
use crate::domain::{group_by_night, FlatRow, PlayerId};

#[derive(Default)]
struct StreakTracker {
    row: StreakRow,
    /// Position in the snapshot where each longest streak was first reached
    longest_win_at: usize,
    longest_loss_at: usize,
}

impl StreakTracker {
    fn record(&mut self, profit: i64, position: usize) {
        let row = &mut self.row;
        match profit {
            p if p > 0 => {
                row.current_win_streak += 1;
                row.current_loss_streak = 0;
                if row.current_win_streak > row.longest_win_streak {
                    row.longest_win_streak = row.current_win_streak;
                    self.longest_win_at = position;
                }
            }
            p if p < 0 => {
                row.current_loss_streak += 1;
                row.current_win_streak = 0;
                if row.current_loss_streak > row.longest_loss_streak {
                    row.longest_loss_streak = row.current_loss_streak;
                    self.longest_loss_at = position;
                }
            }
            // breakeven is neither a win nor a loss and ends both streaks
            _ => {
                row.current_win_streak = 0;
                row.current_loss_streak = 0;
            }
        }
    }
}

fn track_streaks(rows: &[FlatRow]) -> Vec<StreakTracker> {
    let mut order: Vec<PlayerId> = Vec::new();
    let mut trackers: HashMap<PlayerId, StreakTracker> = HashMap::new();

    for (position, row) in rows.iter().enumerate() {
        let tracker = trackers.entry(row.player_id).or_insert_with(|| {
            order.push(row.player_id);
            StreakTracker::default()
        });
        tracker.row.player_id = row.player_id;
        tracker.row.name = row.name.clone();
        tracker.record(row.profit, position);
    }

    order.into_iter().filter_map(|id| trackers.remove(&id)).collect()
}

/// Current and longest streaks per player, in order of first appearance
pub fn calculate_streaks(rows: &[FlatRow]) -> Vec<StreakRow> {
    track_streaks(rows).into_iter().map(|t| t.row).collect()
}

/// League-wide superlatives.
///
/// A record only changes hands on a strictly better value, so the earliest
/// holder keeps it on a tie. Records with no qualifying night are omitted.
pub fn league_records(rows: &[FlatRow]) -> Vec<RecordItem> {
    let trackers = track_streaks(rows);

    [
        best_row(rows, RecordKind::BiggestWin, |r| r.profit > 0, |r, best| r.profit > best.profit),
        best_row(rows, RecordKind::BiggestLoss, |r| r.profit < 0, |r, best| r.profit < best.profit),
        largest_pot(rows),
        longest_streak(&trackers, RecordKind::LongestWinStreak, |t| (t.row.longest_win_streak, t.longest_win_at)),
        longest_streak(&trackers, RecordKind::LongestLossStreak, |t| (t.row.longest_loss_streak, t.longest_loss_at)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn best_row(
    rows: &[FlatRow],
    kind: RecordKind,
    qualifies: impl Fn(&FlatRow) -> bool,
    beats: impl Fn(&FlatRow, &FlatRow) -> bool,
) -> Option<RecordItem> {
    let mut best: Option<&FlatRow> = None;
    for row in rows.iter().filter(|r| qualifies(r)) {
        if best.is_none_or(|b| beats(row, b)) {
            best = Some(row);
        }
    }

    best.map(|row| RecordItem {
        kind,
        value: row.profit,
        player_id: Some(row.player_id),
        player_name: Some(row.name.clone()),
        night_id: Some(row.night_id),
        scheduled_at: Some(row.scheduled_at),
    })
}

fn largest_pot(rows: &[FlatRow]) -> Option<RecordItem> {
    let mut best: Option<&FlatRow> = None;
    for night in group_by_night(rows) {
        let first = &night[0];
        if first.night_pot > 0 && best.is_none_or(|b| first.night_pot > b.night_pot) {
            best = Some(first);
        }
    }

    best.map(|row| RecordItem {
        kind: RecordKind::LargestPot,
        value: row.night_pot,
        player_id: None,
        player_name: None,
        night_id: Some(row.night_id),
        scheduled_at: Some(row.scheduled_at),
    })
}

fn longest_streak(
    trackers: &[StreakTracker],
    kind: RecordKind,
    streak_of: impl Fn(&StreakTracker) -> (u32, usize),
) -> Option<RecordItem> {
    let mut best: Option<(&StreakTracker, u32, usize)> = None;
    for tracker in trackers {
        let (length, reached_at) = streak_of(tracker);
        if length == 0 {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, best_len, best_at)) => length > best_len || (length == best_len && reached_at < best_at),
        };
        if better {
            best = Some((tracker, length, reached_at));
        }
    }

    best.map(|(tracker, length, _)| RecordItem {
        kind,
        value: length as i64,
        player_id: Some(tracker.row.player_id),
        player_name: Some(tracker.row.name.clone()),
        night_id: None,
        scheduled_at: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{flatten_nights, Cents, Entry, Night, NightId, NightStatus};
    use chrono::{TimeZone, Utc};

    fn entry(player_id: PlayerId, buy_in: Cents, profit: Cents) -> Entry {
        Entry {
            player_id,
            player_name: format!("P{player_id}"),
            buy_in,
            cash_out: Some(buy_in + profit),
            adjustment: 0,
        }
    }

    fn night(id: NightId, entries: Vec<Entry>) -> Night {
        Night {
            id,
            scheduled_at: Utc.with_ymd_and_hms(2024, 9, id as u32, 20, 0, 0).unwrap(),
            status: NightStatus::Closed,
            season_id: None,
            entries,
        }
    }

    fn sample_rows() -> Vec<FlatRow> {
        flatten_nights(&[
            night(1, vec![entry(1, 1000, 500), entry(2, 1000, -500)]),
            night(2, vec![entry(1, 1000, 300), entry(2, 1000, -300)]),
            night(3, vec![entry(1, 2000, 0), entry(2, 2000, 0)]),
            night(4, vec![entry(1, 1000, -800), entry(2, 1000, 800)]),
            night(5, vec![entry(1, 1000, -100), entry(2, 1000, 100), entry(3, 1000, 0)]),
        ])
    }

    fn find(rows: &[StreakRow], id: PlayerId) -> &StreakRow {
        rows.iter().find(|r| r.player_id == id).unwrap()
    }

    fn record(records: &[RecordItem], kind: RecordKind) -> Option<&RecordItem> {
        records.iter().find(|r| r.kind == kind)
    }

    #[test]
    fn test_streak_walk() {
        let streaks = calculate_streaks(&sample_rows());

        let p1 = find(&streaks, 1);
        assert_eq!(p1.longest_win_streak, 2);
        assert_eq!(p1.current_loss_streak, 2);
        assert_eq!(p1.current_win_streak, 0);

        let p2 = find(&streaks, 2);
        assert_eq!(p2.longest_loss_streak, 2);
        assert_eq!(p2.current_win_streak, 2);
        assert_eq!(p2.longest_win_streak, 2);
    }

    #[test]
    fn test_breakeven_resets_both_streaks() {
        let rows = sample_rows();
        let through_breakeven: Vec<FlatRow> = rows.into_iter().filter(|r| r.night_id <= 3).collect();
        let streaks = calculate_streaks(&through_breakeven);

        for row in &streaks {
            assert_eq!(row.current_win_streak, 0);
            assert_eq!(row.current_loss_streak, 0);
        }
        assert_eq!(find(&streaks, 1).longest_win_streak, 2);
    }

    #[test]
    fn test_money_records() {
        let records = league_records(&sample_rows());

        let win = record(&records, RecordKind::BiggestWin).unwrap();
        assert_eq!((win.value, win.player_id, win.night_id), (800, Some(2), Some(4)));

        let loss = record(&records, RecordKind::BiggestLoss).unwrap();
        assert_eq!((loss.value, loss.player_id), (-800, Some(1)));

        let pot = record(&records, RecordKind::LargestPot).unwrap();
        assert_eq!((pot.value, pot.night_id), (4000, Some(3)));
    }

    #[test]
    fn test_streak_record_tie_goes_to_first_to_reach_it() {
        let records = league_records(&sample_rows());

        // both players reach a two night win streak; player 1 gets there on night 2
        let longest_win = record(&records, RecordKind::LongestWinStreak).unwrap();
        assert_eq!((longest_win.value, longest_win.player_id), (2, Some(1)));

        let longest_loss = record(&records, RecordKind::LongestLossStreak).unwrap();
        assert_eq!((longest_loss.value, longest_loss.player_id), (2, Some(2)));
    }

    #[test]
    fn test_equal_single_night_wins_keep_earliest() {
        let rows = flatten_nights(&[
            night(1, vec![entry(4, 1000, 700), entry(5, 1000, -700)]),
            night(2, vec![entry(5, 1000, 700), entry(4, 1000, -700)]),
        ]);
        let records = league_records(&rows);

        assert_eq!(record(&records, RecordKind::BiggestWin).unwrap().night_id, Some(1));
        assert_eq!(record(&records, RecordKind::BiggestLoss).unwrap().night_id, Some(1));
    }

    #[test]
    fn test_empty_snapshot_has_no_records() {
        assert!(league_records(&[]).is_empty());
        assert!(calculate_streaks(&[]).is_empty());
    }
}

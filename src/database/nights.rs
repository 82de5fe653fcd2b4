use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::{LedgerQuery, LedgerRow};
use crate::domain::{Entry, Night, NightStatus};

const LEDGER_SQL: &str = "
    SELECT n.id, n.scheduled_at, n.status, n.season_id,
           e.player_id, p.name, e.buy_in, e.cash_out, e.adjustment
    FROM nights n
    JOIN entries e ON e.night_id = n.id
    JOIN players p ON p.id = e.player_id
    WHERE n.league_id = ?1
      AND (?2 IS NULL OR julianday(n.scheduled_at) >= julianday(?2))
      AND (?3 IS NULL OR julianday(n.scheduled_at) <= julianday(?3))
      AND (?4 IS NULL OR n.season_id = ?4)
      AND (?5 = 1 OR n.status = 'CLOSED')
      AND (?6 = 1 OR p.is_guest = 0)
    ORDER BY julianday(n.scheduled_at) ASC, n.id ASC, e.id ASC
";

pub fn list_ledger_rows(conn: &mut DbConn, query: &LedgerQuery) -> Result<Vec<LedgerRow>> {
    let mut stmt = conn.prepare(LEDGER_SQL)?;
    let rows = stmt
        .query_map(
            params![
                query.league_id,
                query.scheduled_from,
                query.scheduled_to,
                query.season_id,
                query.include_open,
                query.include_guests
            ],
            parse_ledger_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read ledger rows")?;

    Ok(rows)
}

fn parse_ledger_row(row: &rusqlite::Row) -> rusqlite::Result<LedgerRow> {
    Ok(LedgerRow {
        night_id: row.get(0)?,
        scheduled_at: row.get(1)?,
        status: row.get(2)?,
        season_id: row.get(3)?,
        player_id: row.get(4)?,
        player_name: row.get(5)?,
        buy_in: row.get(6)?,
        cash_out: row.get(7)?,
        adjustment: row.get(8)?,
    })
}

/// Folds joined rows back into nights; rows must already be ordered by night
pub fn group_into_nights(rows: Vec<LedgerRow>) -> Result<Vec<Night>> {
    let mut nights: Vec<Night> = Vec::new();

    for row in rows {
        let entry = Entry {
            player_id: row.player_id,
            player_name: row.player_name,
            buy_in: row.buy_in,
            cash_out: row.cash_out,
            adjustment: row.adjustment,
        };

        match nights.last_mut() {
            Some(night) if night.id == row.night_id => night.entries.push(entry),
            _ => {
                let status = NightStatus::parse(&row.status)
                    .with_context(|| format!("Unknown status '{}' on night {}", row.status, row.night_id))?;
                nights.push(Night {
                    id: row.night_id,
                    scheduled_at: row.scheduled_at,
                    status,
                    season_id: row.season_id,
                    entries: vec![entry],
                });
            }
        }
    }

    Ok(nights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ledger_row(night_id: i64, player_id: i64, status: &str) -> LedgerRow {
        LedgerRow {
            night_id,
            scheduled_at: Utc.with_ymd_and_hms(2024, 1, night_id as u32, 20, 0, 0).unwrap(),
            status: status.to_string(),
            season_id: None,
            player_id,
            player_name: format!("P{player_id}"),
            buy_in: 1000,
            cash_out: None,
            adjustment: 0,
        }
    }

    #[test]
    fn test_group_into_nights_keeps_entry_order() {
        let rows = vec![
            ledger_row(1, 3, "CLOSED"),
            ledger_row(1, 1, "CLOSED"),
            ledger_row(2, 2, "OPEN"),
        ];

        let nights = group_into_nights(rows).unwrap();

        assert_eq!(nights.len(), 2);
        let ids: Vec<i64> = nights[0].entries.iter().map(|e| e.player_id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(nights[1].status, NightStatus::Open);
        assert_eq!(nights[1].entries[0].cash_out, None);
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        assert!(group_into_nights(vec![ledger_row(1, 1, "VOID")]).is_err());
    }
}

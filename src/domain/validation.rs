use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::models::{Cents, Night, NightId, PlayerId};

/// Violations of the ordering and shape guarantees a snapshot must satisfy
#[derive(Error, Debug, PartialEq)]
pub enum SnapshotError {
    #[error("Night {night_id} has no entries")]
    EmptyNight { night_id: NightId },

    #[error("Player {player_id} has a negative buy-in ({buy_in}) in night {night_id}")]
    NegativeBuyIn {
        night_id: NightId,
        player_id: PlayerId,
        buy_in: Cents,
    },

    #[error("Player {player_id} appears more than once in night {night_id}")]
    DuplicateEntry {
        night_id: NightId,
        player_id: PlayerId,
    },

    #[error("Night {night_id} ({scheduled_at}) is scheduled before the night preceding it")]
    OutOfOrder {
        night_id: NightId,
        scheduled_at: DateTime<Utc>,
    },
}

pub fn validate_snapshot(nights: &[Night]) -> Result<(), SnapshotError> {
    for night in nights {
        validate_night(night)?;
    }
    validate_chronology(nights)
}

fn validate_night(night: &Night) -> Result<(), SnapshotError> {
    if night.entries.is_empty() {
        return Err(SnapshotError::EmptyNight { night_id: night.id });
    }

    let mut seen = HashSet::new();
    for entry in &night.entries {
        if entry.buy_in < 0 {
            return Err(SnapshotError::NegativeBuyIn {
                night_id: night.id,
                player_id: entry.player_id,
                buy_in: entry.buy_in,
            });
        }
        if !seen.insert(entry.player_id) {
            return Err(SnapshotError::DuplicateEntry {
                night_id: night.id,
                player_id: entry.player_id,
            });
        }
    }

    Ok(())
}

fn validate_chronology(nights: &[Night]) -> Result<(), SnapshotError> {
    match nights.windows(2).find(|pair| pair[1].scheduled_at < pair[0].scheduled_at) {
        Some(pair) => Err(SnapshotError::OutOfOrder {
            night_id: pair[1].id,
            scheduled_at: pair[1].scheduled_at,
        }),
        None => Ok(()),
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Monetary amount in minor currency units
pub type Cents = i64;
pub type PlayerId = i64;
pub type NightId = i64;
pub type SeasonId = i64;
pub type TenantId = i64;

/// Lifecycle status of a night
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NightStatus {
    Open,
    Closed,
}

impl NightStatus {
    /// Parses the ledger's `nights.status` column
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "OPEN" => Some(NightStatus::Open),
            "CLOSED" => Some(NightStatus::Closed),
            _ => None,
        }
    }
}

/// One scheduled game session with its per-player entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Night {
    pub id: NightId,
    pub scheduled_at: DateTime<Utc>,
    pub status: NightStatus,
    #[serde(default)]
    pub season_id: Option<SeasonId>,
    pub entries: Vec<Entry>,
}

impl Night {
    /// Sum of every buy-in at the table
    pub fn pot(&self) -> Cents {
        self.entries.iter().map(|e| e.buy_in).sum()
    }

    pub fn player_count(&self) -> usize {
        self.entries.len()
    }
}

/// One player's participation in one night
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub player_id: PlayerId,
    pub player_name: String,
    pub buy_in: Cents,
    /// `None` while the player has not cashed out yet
    #[serde(default)]
    pub cash_out: Option<Cents>,
    #[serde(default)]
    pub adjustment: Cents,
}

impl Entry {
    pub fn profit(&self) -> Cents {
        self.cash_out.unwrap_or(0) - self.buy_in - self.adjustment
    }
}

/// Player data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub is_guest: bool,
}

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::domain::{Night, NightStatus, Player, PlayerId, SnapshotFilters, SnapshotLoader, TenantId};

/// Everything exported for one league
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSnapshot {
    #[serde(default)]
    pub players: Vec<Player>,
    pub nights: Vec<Night>,
}

/// Directory of `<tenant>.json` league snapshots
pub struct SnapshotStore {
    snapshot_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(snapshot_dir: P) -> Self {
        Self {
            snapshot_dir: snapshot_dir.as_ref().to_path_buf(),
        }
    }

    pub fn save(&self, tenant_id: TenantId, snapshot: &LeagueSnapshot) -> Result<()> {
        fs::create_dir_all(&self.snapshot_dir).context("Failed to create snapshot directory")?;

        let file_path = self.build_path(tenant_id);
        let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;

        fs::write(&file_path, json).context("Failed to write snapshot file")?;

        info!("Saved snapshot: {}", file_path.display());
        Ok(())
    }

    /// `None` when the league has no file; a missing directory is an error
    pub fn load(&self, tenant_id: TenantId) -> Result<Option<LeagueSnapshot>> {
        if !self.snapshot_dir.is_dir() {
            bail!("Snapshot directory {} does not exist", self.snapshot_dir.display());
        }

        let file_path = self.build_path(tenant_id);

        if !file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path)?;
        let snapshot = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse snapshot {:?}. First 200 chars: {}",
                file_path,
                json.chars().take(200).collect::<String>()
            )
        })?;

        info!("Loaded snapshot: {}", file_path.display());
        Ok(Some(snapshot))
    }

    fn build_path(&self, tenant_id: TenantId) -> PathBuf {
        self.snapshot_dir.join(format!("{}.json", tenant_id))
    }
}

impl SnapshotLoader for SnapshotStore {
    fn load_filtered_snapshot(&self, tenant_id: TenantId, filters: &SnapshotFilters) -> Result<Vec<Night>> {
        let snapshot = self.load(tenant_id)?.unwrap_or_default();
        Ok(apply_filters(snapshot, filters))
    }
}

/// In-memory equivalent of the ledger query
pub fn apply_filters(snapshot: LeagueSnapshot, filters: &SnapshotFilters) -> Vec<Night> {
    let (from, to) = filters.date_bounds();
    let guests: HashSet<PlayerId> = snapshot
        .players
        .iter()
        .filter(|p| p.is_guest)
        .map(|p| p.id)
        .collect();

    let mut nights: Vec<Night> = snapshot
        .nights
        .into_iter()
        .filter(|n| from.is_none_or(|f| n.scheduled_at >= f))
        .filter(|n| to.is_none_or(|t| n.scheduled_at <= t))
        .filter(|n| filters.season_id.is_none_or(|s| n.season_id == Some(s)))
        .filter(|n| filters.include_draft_nights || n.status == NightStatus::Closed)
        .map(|mut n| {
            if !filters.include_guest_players {
                n.entries.retain(|e| !guests.contains(&e.player_id));
            }
            n
        })
        .filter(|n| !n.entries.is_empty())
        .collect();

    // stable, so nights sharing a timestamp keep file order
    nights.sort_by_key(|n| n.scheduled_at);
    nights
}

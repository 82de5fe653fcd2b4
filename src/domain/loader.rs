use anyhow::Result;

use super::filters::SnapshotFilters;
use super::models::{Night, TenantId};

/// Source of league history for the reporting layer.
///
/// Implementations return only what the filters select, ordered by
/// `scheduled_at` ascending with a stable secondary key. Entries keep their
/// insertion order.
pub trait SnapshotLoader: Send + Sync {
    fn load_filtered_snapshot(&self, tenant_id: TenantId, filters: &SnapshotFilters) -> Result<Vec<Night>>;
}

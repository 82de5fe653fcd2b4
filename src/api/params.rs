use serde::Deserialize;

use crate::domain::{
    parse_timestamp, DateRange, FilterError, RollingWindow, SeasonId, SnapshotFilters,
};
use crate::stats::{SortKey, SortOrder};

/// Raw filter values as they arrive from a query string or the command line
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    pub date_range: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub season_id: Option<SeasonId>,
    pub rolling_nights: Option<u32>,
    pub min_nights: Option<u32>,
    pub min_buy_in: Option<i64>,
    pub top_n: Option<usize>,
    pub include_guests: Option<bool>,
    pub include_drafts: Option<bool>,
    pub as_of: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl FilterParams {
    /// Overlays the supplied values on `defaults`
    pub fn to_filters(&self, defaults: &SnapshotFilters) -> Result<SnapshotFilters, FilterError> {
        let mut filters = defaults.clone();

        if self.from.is_some() || self.to.is_some() {
            let from = self.from.as_deref().map(|v| parse_timestamp(v, false)).transpose()?;
            let to = self.to.as_deref().map(|v| parse_timestamp(v, true)).transpose()?;
            filters.date_range = DateRange::between(from, to)?;
        } else if let Some(range) = &self.date_range {
            filters.date_range = DateRange::parse(range)?;
        }

        if let Some(season_id) = self.season_id {
            filters.season_id = Some(season_id);
        }
        if let Some(window) = self.rolling_nights {
            filters.rolling_nights = RollingWindow::try_from(window)?;
        }
        if let Some(min_nights) = self.min_nights {
            filters.eligibility.min_nights_played = min_nights;
        }
        if let Some(min_buy_in) = self.min_buy_in {
            filters.eligibility.min_total_buy_in_cents = min_buy_in;
        }
        if let Some(top_n) = self.top_n {
            filters.top_n = top_n;
        }
        if let Some(include) = self.include_guests {
            filters.include_guest_players = include;
        }
        if let Some(include) = self.include_drafts {
            filters.include_draft_nights = include;
        }
        if let Some(as_of) = &self.as_of {
            filters.as_of = parse_timestamp(as_of, false)?;
        }

        Ok(filters)
    }

    /// Defaults to profit, descending
    pub fn sorting(&self) -> Result<(SortKey, SortOrder), FilterError> {
        let key = match self.sort_by.as_deref() {
            None => SortKey::Profit,
            Some(value) => SortKey::parse(value).ok_or_else(|| FilterError::SortKey(value.to_string()))?,
        };
        let order = match self.order.as_deref() {
            None => SortOrder::Desc,
            Some(value) => SortOrder::parse(value).ok_or_else(|| FilterError::SortOrder(value.to_string()))?,
        };
        Ok((key, order))
    }
}

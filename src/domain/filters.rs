use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

use crate::domain::models::{Cents, SeasonId};

#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("Unsupported date range '{0}', expected one of all, 7, 30, 90")]
    DateRange(String),

    #[error("Unsupported rolling window {0}, expected one of 5, 10, 20")]
    RollingWindow(u32),

    #[error("Unparseable timestamp '{0}', expected RFC 3339 or YYYY-MM-DD")]
    Timestamp(String),

    #[error("Unsupported sort key '{0}'")]
    SortKey(String),

    #[error("Unsupported sort order '{0}', expected asc or desc")]
    SortOrder(String),

    #[error("Date window starts after it ends: {from} > {to}")]
    InvertedWindow {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}

/// Which slice of history a report covers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateRange {
    All,
    LastDays(u32),
    Between {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
}

impl DateRange {
    pub fn parse(value: &str) -> Result<Self, FilterError> {
        match value {
            "all" => Ok(DateRange::All),
            "7" => Ok(DateRange::LastDays(7)),
            "30" => Ok(DateRange::LastDays(30)),
            "90" => Ok(DateRange::LastDays(90)),
            other => Err(FilterError::DateRange(other.to_string())),
        }
    }

    pub fn between(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Self, FilterError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(FilterError::InvertedWindow { from, to });
            }
        }
        Ok(DateRange::Between { from, to })
    }

    /// Inclusive lower and upper bounds, resolved against `as_of`
    pub fn bounds(&self, as_of: DateTime<Utc>) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        match *self {
            DateRange::All => (None, None),
            DateRange::LastDays(days) => (Some(as_of - Duration::days(days as i64)), None),
            DateRange::Between { from, to } => (from, to),
        }
    }
}

/// Accepts RFC 3339 or a bare date. A bare date covers the whole day, so an
/// upper bound resolves to its last second.
pub fn parse_timestamp(value: &str, upper_bound: bool) -> Result<DateTime<Utc>, FilterError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| FilterError::Timestamp(value.to_string()))?;
    let time = if upper_bound {
        NaiveTime::from_hms_opt(23, 59, 59)
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)
    };

    time.map(|t| date.and_time(t).and_utc())
        .ok_or_else(|| FilterError::Timestamp(value.to_string()))
}

/// Size of the rolling form window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollingWindow {
    Five,
    Ten,
    Twenty,
}

impl RollingWindow {
    pub fn size(&self) -> usize {
        match self {
            RollingWindow::Five => 5,
            RollingWindow::Ten => 10,
            RollingWindow::Twenty => 20,
        }
    }
}

impl TryFrom<u32> for RollingWindow {
    type Error = FilterError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(RollingWindow::Five),
            10 => Ok(RollingWindow::Ten),
            20 => Ok(RollingWindow::Twenty),
            other => Err(FilterError::RollingWindow(other)),
        }
    }
}

/// Eligibility thresholds for rate-based leaderboards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eligibility {
    pub min_nights_played: u32,
    pub min_total_buy_in_cents: Cents,
}

impl Default for Eligibility {
    fn default() -> Self {
        Self {
            min_nights_played: 3,
            min_total_buy_in_cents: 0,
        }
    }
}

/// Everything the loader and the report layer need to scope a computation
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotFilters {
    pub date_range: DateRange,
    pub season_id: Option<SeasonId>,
    pub rolling_nights: RollingWindow,
    pub eligibility: Eligibility,
    pub top_n: usize,
    pub include_guest_players: bool,
    pub include_draft_nights: bool,
    /// Reference instant for relative windows
    pub as_of: DateTime<Utc>,
}

impl Default for SnapshotFilters {
    fn default() -> Self {
        Self {
            date_range: DateRange::All,
            season_id: None,
            rolling_nights: RollingWindow::Five,
            eligibility: Eligibility::default(),
            top_n: 10,
            include_guest_players: true,
            include_draft_nights: false,
            as_of: Utc::now(),
        }
    }
}

impl SnapshotFilters {
    pub fn date_bounds(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        self.date_range.bounds(self.as_of)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("all", Ok(DateRange::All))]
    #[case("7", Ok(DateRange::LastDays(7)))]
    #[case("30", Ok(DateRange::LastDays(30)))]
    #[case("90", Ok(DateRange::LastDays(90)))]
    #[case("14", Err(FilterError::DateRange("14".to_string())))]
    fn test_date_range_parsing(#[case] input: &str, #[case] expected: Result<DateRange, FilterError>) {
        assert_eq!(DateRange::parse(input), expected);
    }

    #[rstest]
    #[case(5, Ok(RollingWindow::Five))]
    #[case(10, Ok(RollingWindow::Ten))]
    #[case(20, Ok(RollingWindow::Twenty))]
    #[case(15, Err(FilterError::RollingWindow(15)))]
    fn test_rolling_window_values(#[case] input: u32, #[case] expected: Result<RollingWindow, FilterError>) {
        assert_eq!(RollingWindow::try_from(input), expected);
    }

    #[test]
    fn test_relative_range_resolves_against_as_of() {
        let as_of = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let (from, to) = DateRange::LastDays(30).bounds(as_of);

        assert_eq!(from, Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()));
        assert_eq!(to, None);
    }

    #[rstest]
    #[case("2024-05-01", false, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())]
    #[case("2024-05-01", true, Utc.with_ymd_and_hms(2024, 5, 1, 23, 59, 59).unwrap())]
    #[case("2024-05-01T20:00:00+02:00", true, Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap())]
    fn test_timestamp_parsing(#[case] input: &str, #[case] upper: bool, #[case] expected: DateTime<Utc>) {
        assert_eq!(parse_timestamp(input, upper), Ok(expected));
    }

    #[test]
    fn test_garbage_timestamp_is_rejected() {
        assert_eq!(
            parse_timestamp("yesterday", false),
            Err(FilterError::Timestamp("yesterday".to_string()))
        );
    }

    #[test]
    fn test_inverted_explicit_window_is_rejected() {
        let from = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();

        assert!(DateRange::between(Some(from), Some(to)).is_err());
        assert!(DateRange::between(Some(to), Some(from)).is_ok());
    }
}

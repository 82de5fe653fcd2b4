use crate::domain::SnapshotFilters;

#[derive(Debug, Clone)]
pub struct AnalyticsSettings {
    pub initial_rating: f64,
    pub k_factor: f64,
    pub podium_points: [u32; 3],
    pub dominated_threshold: f64,
    pub bucket_count: i64,
    pub recent_pot_nights: usize,
    pub active_window_days: i64,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            initial_rating: 1500.0,
            k_factor: 32.0,
            podium_points: [3, 2, 1],
            dominated_threshold: 0.45,
            bucket_count: 10,
            recent_pot_nights: 10,
            active_window_days: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "poker_league.db".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub analytics: AnalyticsSettings,
    pub database: DatabaseSettings,
    pub default_filters: SnapshotFilters,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            analytics: AnalyticsSettings::default(),
            database: DatabaseSettings::default(),
            default_filters: SnapshotFilters::default(),
        }
    }
}

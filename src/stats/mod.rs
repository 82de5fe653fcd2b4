//! Derived statistics over a flattened ledger snapshot.
//!
//! Every function here is pure: it reads the rows it is given, keeps its
//! working state local to the call and returns plain data. Independent
//! computations can run concurrently over one shared snapshot.

pub mod aggregation;
pub mod distribution;
pub mod form;
pub mod leaderboard;
pub mod narrative;
mod ranking;
pub mod scoring;
pub mod skill_rating;
pub mod streaks;
pub mod types;

pub use aggregation::{aggregate_players, league_overview, season_standings};
pub use distribution::{calculate_competitiveness, calculate_distributions};
pub use form::rolling_form;
pub use leaderboard::{build_leaderboards, sort_player_rows, SortKey, SortOrder};
pub use narrative::compose_insights;
pub use skill_rating::calculate_skill_ratings;
pub use streaks::{calculate_streaks, league_records};
pub use types::*;

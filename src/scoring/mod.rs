pub mod aggregate;
pub mod config;
pub mod credit;
pub mod detail;
pub mod engine;
pub mod factors;
pub mod ranking;
pub mod validation;

pub use aggregate::{
    aggregate_stats, PlayerStats, StatRegistry, UNKNOWN_NATIONALITY, UNKNOWN_TEAM,
};
pub use config::*;
pub use credit::{distribute, participants, role_of, Credit, Role};
pub use detail::{events_for, summarize_goals, GoalSummary, GoalType, WeightedEventDetail};
pub use engine::{calculate_weight, FactorContribution, WeightBreakdown, WeightResult};
pub use factors::{score_diff_before, ScoreSituation, Strength};
pub use ranking::{
    biggest_fallers, biggest_risers, compute_rankings, rank_players, HighlightConfig, RankedPlayer,
    Trend,
};
pub use validation::validate_weights;

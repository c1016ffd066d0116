use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::aggregate::{aggregate_stats, PlayerStats};
use super::config::WeightConfig;
use crate::data::{Goal, Roster};

/// A player's totals with both rankings attached.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlayer {
    pub stats: PlayerStats,
    pub traditional_rank: usize,
    pub weighted_rank: usize,
    /// traditional_rank - weighted_rank; positive means the player climbs
    /// once goals are weighted
    pub rank_delta: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Clutch,
    Steady,
    GarbageTime,
}

impl RankedPlayer {
    pub fn trend(&self) -> Trend {
        match self.rank_delta.cmp(&0) {
            Ordering::Greater => Trend::Clutch,
            Ordering::Equal => Trend::Steady,
            Ordering::Less => Trend::GarbageTime,
        }
    }
}

/// Points descending, then goals descending
fn traditional_order(a: &PlayerStats, b: &PlayerStats) -> Ordering {
    b.points()
        .cmp(&a.points())
        .then_with(|| b.goals.cmp(&a.goals))
}

/// Weighted points descending, then weighted goals descending
fn weighted_order(a: &PlayerStats, b: &PlayerStats) -> Ordering {
    b.weighted_points()
        .total_cmp(&a.weighted_points())
        .then_with(|| b.weighted_goals.total_cmp(&a.weighted_goals))
}

/// 1-based position of each input element after a stable sort
fn positions(
    stats: &[PlayerStats],
    order: fn(&PlayerStats, &PlayerStats) -> Ordering,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..stats.len()).collect();
    indices.sort_by(|&a, &b| order(&stats[a], &stats[b]));

    let mut ranks = vec![0; stats.len()];
    for (position, index) in indices.into_iter().enumerate() {
        ranks[index] = position + 1;
    }
    ranks
}

/// Rank players traditionally and by weighted points in one pass.
///
/// Both orderings are stable against the input order, ranks are positions
/// (no shared ranks). The result is ordered by weighted rank.
pub fn rank_players(stats: Vec<PlayerStats>) -> Vec<RankedPlayer> {
    let traditional = positions(&stats, traditional_order);
    let weighted = positions(&stats, weighted_order);

    let mut ranked: Vec<RankedPlayer> = stats
        .into_iter()
        .zip(traditional.into_iter().zip(weighted))
        .map(|(stats, (traditional_rank, weighted_rank))| RankedPlayer {
            stats,
            traditional_rank,
            weighted_rank,
            rank_delta: traditional_rank as i64 - weighted_rank as i64,
        })
        .collect();

    ranked.sort_by_key(|p| p.weighted_rank);
    ranked
}

/// Aggregate and rank in one call against a single weight snapshot
pub fn compute_rankings(
    goals: &[Goal],
    config: &WeightConfig,
    roster: &Roster,
) -> Vec<RankedPlayer> {
    rank_players(aggregate_stats(goals, config, roster))
}

/// Which players are eligible for the risers/fallers lists.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HighlightConfig {
    /// Only players at or above this traditional rank
    #[serde(default = "default_max_traditional_rank")]
    pub max_traditional_rank: usize,

    /// Only players with at least this many points
    #[serde(default = "default_min_points")]
    pub min_points: u32,

    /// Length of each list
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_max_traditional_rank() -> usize {
    100
}

fn default_min_points() -> u32 {
    20
}

fn default_limit() -> usize {
    10
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            max_traditional_rank: default_max_traditional_rank(),
            min_points: default_min_points(),
            limit: default_limit(),
        }
    }
}

fn eligible<'a>(players: &'a [RankedPlayer], config: &HighlightConfig) -> Vec<&'a RankedPlayer> {
    players
        .iter()
        .filter(|p| p.traditional_rank <= config.max_traditional_rank)
        .filter(|p| p.stats.points() >= config.min_points)
        .collect()
}

/// Players who gain the most ranks under weighting
pub fn biggest_risers<'a>(
    players: &'a [RankedPlayer],
    config: &HighlightConfig,
) -> Vec<&'a RankedPlayer> {
    let mut risers = eligible(players, config);
    risers.sort_by(|a, b| b.rank_delta.cmp(&a.rank_delta));
    risers.truncate(config.limit);
    risers
}

/// Players who lose the most ranks under weighting
pub fn biggest_fallers<'a>(
    players: &'a [RankedPlayer],
    config: &HighlightConfig,
) -> Vec<&'a RankedPlayer> {
    let mut fallers = eligible(players, config);
    fallers.sort_by(|a, b| a.rank_delta.cmp(&b.rank_delta));
    fallers.truncate(config.limit);
    fallers
}

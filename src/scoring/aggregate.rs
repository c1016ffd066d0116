use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use super::config::WeightConfig;
use super::credit::{distribute, Role};
use super::engine::calculate_weight;
use crate::data::{GameId, Goal, PlayerId, Roster};

/// Placeholder team code for players missing from the roster
pub const UNKNOWN_TEAM: &str = "???";

/// Placeholder for players with no nationality on record
pub const UNKNOWN_NATIONALITY: &str = "???";

/// Running totals for one player over an aggregation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub name: String,
    pub team: String,
    pub nationality: Option<String>,
    /// Games in which the player recorded a goal or an assist
    pub games: BTreeSet<GameId>,
    pub goals: u32,
    pub assists: u32,
    pub weighted_goals: f64,
    pub weighted_assists: f64,
}

impl PlayerStats {
    fn new(player_id: PlayerId, roster: &Roster) -> Self {
        let (name, team, nationality) = match roster.get(player_id) {
            Some(player) => (
                player.name.clone(),
                player.team.clone().unwrap_or_else(|| UNKNOWN_TEAM.to_string()),
                player.nationality.clone(),
            ),
            None => (format!("Player {}", player_id), UNKNOWN_TEAM.to_string(), None),
        };
        Self {
            player_id,
            name,
            team,
            nationality,
            games: BTreeSet::new(),
            goals: 0,
            assists: 0,
            weighted_goals: 0.0,
            weighted_assists: 0.0,
        }
    }

    pub fn games_played(&self) -> usize {
        self.games.len()
    }

    pub fn points(&self) -> u32 {
        self.goals + self.assists
    }

    pub fn weighted_points(&self) -> f64 {
        self.weighted_goals + self.weighted_assists
    }

    fn absorb(&mut self, other: PlayerStats) {
        self.games.extend(other.games);
        self.goals += other.goals;
        self.assists += other.assists;
        self.weighted_goals += other.weighted_goals;
        self.weighted_assists += other.weighted_assists;
    }
}

/// Per-player accumulators, created on first reference.
///
/// Holds one weight snapshot for its whole lifetime so every goal in a pass
/// is weighted identically.
pub struct StatRegistry<'a> {
    config: &'a WeightConfig,
    roster: &'a Roster,
    stats: BTreeMap<PlayerId, PlayerStats>,
    goals_seen: usize,
    goals_unweighted: usize,
}

impl<'a> StatRegistry<'a> {
    pub fn new(config: &'a WeightConfig, roster: &'a Roster) -> Self {
        Self {
            config,
            roster,
            stats: BTreeMap::new(),
            goals_seen: 0,
            goals_unweighted: 0,
        }
    }

    fn entry(&mut self, player_id: PlayerId) -> &mut PlayerStats {
        let roster = self.roster;
        self.stats
            .entry(player_id)
            .or_insert_with(|| PlayerStats::new(player_id, roster))
    }

    /// Weight one goal and credit everyone involved.
    ///
    /// A goal that cannot be weighted still counts toward raw goals,
    /// assists and games; it adds nothing to the weighted totals.
    pub fn record(&mut self, goal: &Goal) {
        let weight = match calculate_weight(goal, self.config) {
            Some(result) => result.value,
            None => {
                self.goals_unweighted += 1;
                0.0
            }
        };
        for credit in distribute(goal, weight) {
            let stats = self.entry(credit.player_id);
            stats.games.insert(goal.game_id);
            match credit.role {
                Role::Scorer => {
                    stats.goals += 1;
                    stats.weighted_goals += credit.amount;
                }
                Role::PrimaryAssist | Role::SecondaryAssist => {
                    stats.assists += 1;
                    stats.weighted_assists += credit.amount;
                }
            }
        }
        self.goals_seen += 1;
    }

    /// Fold another registry's totals into this one.
    /// Both registries must have been built from the same roster and weights.
    pub fn merge(&mut self, other: StatRegistry<'_>) {
        self.goals_seen += other.goals_seen;
        self.goals_unweighted += other.goals_unweighted;
        for (player_id, theirs) in other.stats {
            match self.stats.entry(player_id) {
                Entry::Occupied(mut ours) => ours.get_mut().absorb(theirs),
                Entry::Vacant(slot) => {
                    slot.insert(theirs);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Close the pass. Players come out ordered by id.
    pub fn finish(self) -> Vec<PlayerStats> {
        tracing::debug!(
            goals = self.goals_seen,
            unweighted = self.goals_unweighted,
            players = self.stats.len(),
            "aggregation pass complete"
        );
        self.stats.into_values().collect()
    }
}

/// Aggregate weighted and raw totals for every player touched by `goals`.
///
/// Players missing from the roster still accumulate under a placeholder name.
pub fn aggregate_stats(
    goals: &[Goal],
    config: &WeightConfig,
    roster: &Roster,
) -> Vec<PlayerStats> {
    let mut registry = StatRegistry::new(config, roster);
    for goal in goals {
        registry.record(goal);
    }
    registry.finish()
}

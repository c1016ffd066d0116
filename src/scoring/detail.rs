use std::collections::BTreeMap;

use super::config::WeightConfig;
use super::credit::{role_of, Role};
use super::engine::{calculate_weight, WeightResult};
use super::factors::Strength;
use crate::data::{Goal, PlayerId};

/// One goal a player took part in, with its weight and breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEventDetail<'a> {
    pub goal: &'a Goal,
    pub role: Role,
    /// `None` when the goal could not be weighted (scorer side unknown)
    pub weight: Option<WeightResult>,
}

impl WeightedEventDetail<'_> {
    /// What this goal contributed to the player's weighted total
    pub fn credit(&self) -> Option<f64> {
        self.weight.as_ref().map(|w| self.role.credit(w.value))
    }
}

/// Every goal the player scored or assisted on, most recent first.
///
/// Goals on the same date keep their input order.
pub fn events_for<'a>(
    player_id: PlayerId,
    goals: &'a [Goal],
    config: &WeightConfig,
) -> Vec<WeightedEventDetail<'a>> {
    let mut details: Vec<_> = goals
        .iter()
        .filter_map(|goal| {
            role_of(goal, player_id).map(|role| WeightedEventDetail {
                goal,
                role,
                weight: calculate_weight(goal, config),
            })
        })
        .collect();
    details.sort_by(|a, b| b.goal.date.cmp(&a.goal.date));
    details
}

/// Special goal kinds. One goal can be several at once; `Regular` is a goal
/// that is none of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GoalType {
    GameWinner,
    Overtime,
    EmptyNet,
    Regular,
}

impl GoalType {
    pub fn label(self) -> &'static str {
        match self {
            GoalType::GameWinner => "Game winner",
            GoalType::Overtime => "Overtime",
            GoalType::EmptyNet => "Empty net",
            GoalType::Regular => "Regular",
        }
    }

    fn of(goal: &Goal) -> Vec<GoalType> {
        let mut types = Vec::new();
        if goal.game_winner {
            types.push(GoalType::GameWinner);
        }
        if goal.is_overtime() {
            types.push(GoalType::Overtime);
        }
        if goal.empty_net {
            types.push(GoalType::EmptyNet);
        }
        if types.is_empty() {
            types.push(GoalType::Regular);
        }
        types
    }
}

/// Counts over the goals a player scored, most common first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalSummary {
    pub by_situation: Vec<(&'static str, usize)>,
    pub by_strength: Vec<(&'static str, usize)>,
    pub by_type: Vec<(GoalType, usize)>,
}

/// Label used when a goal has no score situation or strength
const UNKNOWN_LABEL: &str = "Unknown";

/// Count each key, descending by count; ties keep key order
fn tally<K: Ord>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut counts: Vec<(K, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Break a player's own goals down by situation, strength and goal type.
/// Assists are not counted.
pub fn summarize_goals(events: &[WeightedEventDetail]) -> GoalSummary {
    let scored = || events.iter().filter(|e| e.role == Role::Scorer);

    GoalSummary {
        by_situation: tally(scored().map(|e| {
            e.weight
                .as_ref()
                .map_or(UNKNOWN_LABEL, |w| w.breakdown.situation_label())
        })),
        by_strength: tally(scored().map(|e| {
            e.weight
                .as_ref()
                .and_then(|w| w.breakdown.strength)
                .map_or(UNKNOWN_LABEL, Strength::name)
        })),
        by_type: tally(scored().flat_map(|e| GoalType::of(e.goal))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::goal;
    use crate::data::Roster;
    use crate::scoring::aggregate::aggregate_stats;
    use chrono::NaiveDate;

    fn season() -> Vec<Goal> {
        let mut goals = Vec::new();

        let mut g = goal(1, 10);
        g.date = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();
        g.assist1_id = Some(11);
        goals.push(g);

        let mut g = goal(2, 11);
        g.date = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();
        g.period = 3;
        g.assist1_id = Some(12);
        g.assist2_id = Some(10);
        goals.push(g);

        let mut g = goal(3, 12);
        g.date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        g.empty_net = true;
        goals.push(g);

        let mut g = goal(4, 10);
        g.date = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        g.home_score_after = 5;
        g.away_score_after = 1;
        goals.push(g);

        goals
    }

    #[test]
    fn test_filters_to_player_and_sorts_recent_first() {
        let goals = season();
        let details = events_for(10, &goals, &WeightConfig::default());

        let ids: Vec<u64> = details.iter().map(|d| d.goal.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
        assert_eq!(details[0].role, Role::SecondaryAssist);
        assert_eq!(details[1].role, Role::Scorer);
    }

    #[test]
    fn test_player_without_events() {
        let goals = season();
        assert!(events_for(99, &goals, &WeightConfig::default()).is_empty());
    }

    #[test]
    fn test_listing_matches_aggregate_totals() {
        let goals = season();
        let config = WeightConfig::default();
        let stats = aggregate_stats(&goals, &config, &Roster::new());

        for player in &stats {
            let details = events_for(player.player_id, &goals, &config);
            let goal_credit: f64 = details
                .iter()
                .filter(|d| !d.role.is_assist())
                .filter_map(|d| d.credit())
                .sum();
            let assist_credit: f64 = details
                .iter()
                .filter(|d| d.role.is_assist())
                .filter_map(|d| d.credit())
                .sum();
            assert!((goal_credit - player.weighted_goals).abs() < 1e-9);
            assert!((assist_credit - player.weighted_assists).abs() < 1e-9);
            assert_eq!(details.len() as u32, player.points());
        }
    }

    #[test]
    fn test_unweighted_event_is_listed() {
        let mut g = goal(1, 10);
        g.scorer_side = None;
        let goals = vec![g];

        let details = events_for(10, &goals, &WeightConfig::default());
        assert_eq!(details.len(), 1);
        assert!(details[0].weight.is_none());
        assert_eq!(details[0].credit(), None);
    }

    #[test]
    fn test_summarize_goals() {
        let mut goals = Vec::new();

        // go-ahead at even strength, regular
        goals.push(goal(1, 10));

        // power-play game winner in overtime
        let mut g = goal(2, 10);
        g.period = 4;
        g.game_winner = true;
        g.strength_code = Some("1451".to_string());
        goals.push(g);

        // empty-netter
        let mut g = goal(3, 10);
        g.empty_net = true;
        g.home_score_after = 3;
        g.away_score_after = 1;
        goals.push(g);

        // side unknown
        let mut g = goal(4, 10);
        g.scorer_side = None;
        goals.push(g);

        // assist only, not counted
        let mut g = goal(5, 11);
        g.assist1_id = Some(10);
        goals.push(g);

        let events = events_for(10, &goals, &WeightConfig::default());
        let summary = summarize_goals(&events);

        assert_eq!(
            summary.by_situation,
            vec![("Go-ahead (tied)", 2), ("Empty net", 1), ("Unknown", 1)]
        );
        assert_eq!(
            summary.by_strength,
            vec![("Even strength", 2), ("Power play", 1), ("Unknown", 1)]
        );
        assert_eq!(
            summary.by_type,
            vec![
                (GoalType::Regular, 2),
                (GoalType::GameWinner, 1),
                (GoalType::Overtime, 1),
                (GoalType::EmptyNet, 1)
            ]
        );
    }

    #[test]
    fn test_summarize_goals_without_goals() {
        assert_eq!(summarize_goals(&[]), GoalSummary::default());
    }

    #[test]
    fn test_same_date_keeps_input_order() {
        let mut a = goal(1, 10);
        a.time_in_period = "05:00".to_string();
        let mut b = goal(2, 10);
        b.time_in_period = "15:00".to_string();
        let goals = vec![a, b];

        let details = events_for(10, &goals, &WeightConfig::default());
        let ids: Vec<u64> = details.iter().map(|d| d.goal.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}

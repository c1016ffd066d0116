use serde::Serialize;
use std::fmt;

use super::config::WeightConfig;
use crate::data::Side;

/// Manpower state from the scorer's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    PowerPlay,
    Even,
    Shorthanded,
}

impl Strength {
    /// Classify a situation code for the given scoring side.
    ///
    /// The code is `[awayGoalies][awaySkaters][homeSkaters][homeGoalies]`,
    /// so "1451" is a home power play. Anything that is not exactly four
    /// characters with numeric skater digits counts as even strength.
    pub fn parse(code: Option<&str>, scorer_side: Side) -> Self {
        let Some(code) = code else {
            return Strength::Even;
        };
        let digits: Vec<char> = code.chars().collect();
        if digits.len() != 4 {
            return Strength::Even;
        }
        let (Some(away_skaters), Some(home_skaters)) =
            (digits[1].to_digit(10), digits[2].to_digit(10))
        else {
            return Strength::Even;
        };

        let (own, opponent) = match scorer_side {
            Side::Home => (home_skaters, away_skaters),
            Side::Away => (away_skaters, home_skaters),
        };

        if own > opponent {
            Strength::PowerPlay
        } else if own < opponent {
            Strength::Shorthanded
        } else {
            Strength::Even
        }
    }

    pub fn multiplier(self, config: &WeightConfig) -> f64 {
        match self {
            Strength::PowerPlay => config.strength_pp,
            Strength::Even => config.strength_ev,
            Strength::Shorthanded => config.strength_sh,
        }
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Strength::PowerPlay => "PP",
            Strength::Even => "EV",
            Strength::Shorthanded => "SH",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strength::PowerPlay => "Power play",
            Strength::Even => "Even strength",
            Strength::Shorthanded => "Shorthanded",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// Score situation immediately before the goal, from the scorer's side.
///
/// Exactly one variant covers every integer differential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSituation {
    /// diff == 0
    GoAhead,
    /// diff == -1
    Tying,
    /// diff == -2
    Comeback,
    /// diff <= -3
    DownThreePlus,
    /// diff == 1
    Insurance,
    /// diff == 2
    Cushion,
    /// diff >= 3
    GarbageTime,
}

impl ScoreSituation {
    pub fn classify(diff_before: i64) -> Self {
        match diff_before {
            0 => ScoreSituation::GoAhead,
            -1 => ScoreSituation::Tying,
            -2 => ScoreSituation::Comeback,
            i64::MIN..=-3 => ScoreSituation::DownThreePlus,
            1 => ScoreSituation::Insurance,
            2 => ScoreSituation::Cushion,
            3..=i64::MAX => ScoreSituation::GarbageTime,
        }
    }

    pub fn multiplier(self, config: &WeightConfig) -> f64 {
        match self {
            ScoreSituation::GoAhead | ScoreSituation::Tying => config.score_tie,
            ScoreSituation::Comeback | ScoreSituation::Insurance => config.score_lead_1,
            ScoreSituation::Cushion => config.score_lead_2,
            ScoreSituation::DownThreePlus | ScoreSituation::GarbageTime => config.score_lead_3plus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreSituation::GoAhead => "Go-ahead (tied)",
            ScoreSituation::Tying => "Tying goal",
            ScoreSituation::Comeback => "Comeback (-2 to -1)",
            ScoreSituation::DownThreePlus => "Down 3+ (low impact)",
            ScoreSituation::Insurance => "Insurance (+1 to +2)",
            ScoreSituation::Cushion => "Comfortable (+2 to +3)",
            ScoreSituation::GarbageTime => "Garbage time (+3+)",
        }
    }
}

impl fmt::Display for ScoreSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scorer's lead (positive) or deficit (negative) before the goal.
///
/// Reconstructed from the post-goal score by taking the goal back off the
/// scoring side.
pub fn score_diff_before(home_after: u32, away_after: u32, scorer_side: Side) -> i64 {
    let (own_after, opponent_after) = match scorer_side {
        Side::Home => (home_after as i64, away_after as i64),
        Side::Away => (away_after as i64, home_after as i64),
    };
    (own_after - 1) - opponent_after
}

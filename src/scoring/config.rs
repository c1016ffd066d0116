use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Situation multipliers used to weight a goal.
///
/// Every field is required in memory. When deserialized, a missing key falls
/// back to the documented default rather than to zero.
///
/// Example YAML:
/// ```yaml
/// weights:
///   score_tie: 1.5
///   clutch_3rd: 1.3
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeightConfig {
    /// Go-ahead goal from a tie, or the tying goal
    #[serde(default = "defaults::score_tie")]
    pub score_tie: f64,

    /// Extends a one-goal lead, or cuts a two-goal deficit to one
    #[serde(default = "defaults::score_lead_1")]
    pub score_lead_1: f64,

    /// Extends the lead to two
    #[serde(default = "defaults::score_lead_2")]
    pub score_lead_2: f64,

    /// Lead of three or more, or still trailing by two or more after the goal
    #[serde(default = "defaults::score_lead_3plus")]
    pub score_lead_3plus: f64,

    #[serde(default = "defaults::strength_sh")]
    pub strength_sh: f64,

    #[serde(default = "defaults::strength_ev")]
    pub strength_ev: f64,

    #[serde(default = "defaults::strength_pp")]
    pub strength_pp: f64,

    /// Replaces every other factor for empty-net goals
    #[serde(default = "defaults::empty_net")]
    pub empty_net: f64,

    #[serde(default = "defaults::overtime")]
    pub overtime: f64,

    /// Added (not multiplied) for game-winning goals
    #[serde(default = "defaults::gwg_bonus")]
    pub gwg_bonus: f64,

    /// Third period of regulation only
    #[serde(default = "defaults::clutch_3rd")]
    pub clutch_3rd: f64,
}

mod defaults {
    pub fn score_tie() -> f64 {
        1.5
    }
    pub fn score_lead_1() -> f64 {
        1.3
    }
    pub fn score_lead_2() -> f64 {
        0.7
    }
    pub fn score_lead_3plus() -> f64 {
        0.5
    }
    pub fn strength_sh() -> f64 {
        1.5
    }
    pub fn strength_ev() -> f64 {
        1.0
    }
    pub fn strength_pp() -> f64 {
        0.8
    }
    pub fn empty_net() -> f64 {
        0.3
    }
    pub fn overtime() -> f64 {
        1.5
    }
    pub fn gwg_bonus() -> f64 {
        0.3
    }
    pub fn clutch_3rd() -> f64 {
        1.2
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            score_tie: defaults::score_tie(),
            score_lead_1: defaults::score_lead_1(),
            score_lead_2: defaults::score_lead_2(),
            score_lead_3plus: defaults::score_lead_3plus(),
            strength_sh: defaults::strength_sh(),
            strength_ev: defaults::strength_ev(),
            strength_pp: defaults::strength_pp(),
            empty_net: defaults::empty_net(),
            overtime: defaults::overtime(),
            gwg_bonus: defaults::gwg_bonus(),
            clutch_3rd: defaults::clutch_3rd(),
        }
    }
}

/// Name of one weight, as used in config files, datasets and `--set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightKey {
    ScoreTie,
    ScoreLead1,
    ScoreLead2,
    ScoreLead3Plus,
    StrengthSh,
    StrengthEv,
    StrengthPp,
    EmptyNet,
    Overtime,
    GwgBonus,
    Clutch3rd,
}

impl WeightKey {
    pub const ALL: [WeightKey; 11] = [
        WeightKey::ScoreTie,
        WeightKey::ScoreLead1,
        WeightKey::ScoreLead2,
        WeightKey::ScoreLead3Plus,
        WeightKey::StrengthSh,
        WeightKey::StrengthEv,
        WeightKey::StrengthPp,
        WeightKey::EmptyNet,
        WeightKey::Overtime,
        WeightKey::GwgBonus,
        WeightKey::Clutch3rd,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WeightKey::ScoreTie => "score_tie",
            WeightKey::ScoreLead1 => "score_lead_1",
            WeightKey::ScoreLead2 => "score_lead_2",
            WeightKey::ScoreLead3Plus => "score_lead_3plus",
            WeightKey::StrengthSh => "strength_sh",
            WeightKey::StrengthEv => "strength_ev",
            WeightKey::StrengthPp => "strength_pp",
            WeightKey::EmptyNet => "empty_net",
            WeightKey::Overtime => "overtime",
            WeightKey::GwgBonus => "gwg_bonus",
            WeightKey::Clutch3rd => "clutch_3rd",
        }
    }
}

impl fmt::Display for WeightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum WeightKeyError {
    #[error("unknown weight key '{0}'")]
    UnknownKey(String),

    #[error("expected KEY=VALUE, got '{0}'")]
    MalformedAssignment(String),

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

impl FromStr for WeightKey {
    type Err = WeightKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        WeightKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| WeightKeyError::UnknownKey(s.to_string()))
    }
}

impl WeightConfig {
    pub fn get(&self, key: WeightKey) -> f64 {
        match key {
            WeightKey::ScoreTie => self.score_tie,
            WeightKey::ScoreLead1 => self.score_lead_1,
            WeightKey::ScoreLead2 => self.score_lead_2,
            WeightKey::ScoreLead3Plus => self.score_lead_3plus,
            WeightKey::StrengthSh => self.strength_sh,
            WeightKey::StrengthEv => self.strength_ev,
            WeightKey::StrengthPp => self.strength_pp,
            WeightKey::EmptyNet => self.empty_net,
            WeightKey::Overtime => self.overtime,
            WeightKey::GwgBonus => self.gwg_bonus,
            WeightKey::Clutch3rd => self.clutch_3rd,
        }
    }

    pub fn set(&mut self, key: WeightKey, value: f64) {
        let slot = match key {
            WeightKey::ScoreTie => &mut self.score_tie,
            WeightKey::ScoreLead1 => &mut self.score_lead_1,
            WeightKey::ScoreLead2 => &mut self.score_lead_2,
            WeightKey::ScoreLead3Plus => &mut self.score_lead_3plus,
            WeightKey::StrengthSh => &mut self.strength_sh,
            WeightKey::StrengthEv => &mut self.strength_ev,
            WeightKey::StrengthPp => &mut self.strength_pp,
            WeightKey::EmptyNet => &mut self.empty_net,
            WeightKey::Overtime => &mut self.overtime,
            WeightKey::GwgBonus => &mut self.gwg_bonus,
            WeightKey::Clutch3rd => &mut self.clutch_3rd,
        };
        *slot = value;
    }

    /// Build a config from a key/value store. Keys absent from the map keep
    /// their default; unknown keys are returned so the caller can report them.
    pub fn from_map(map: &HashMap<String, f64>) -> (Self, Vec<String>) {
        let mut config = WeightConfig::default();
        let mut unknown = Vec::new();
        for (name, value) in map {
            match name.parse::<WeightKey>() {
                Ok(key) => config.set(key, *value),
                Err(_) => unknown.push(name.clone()),
            }
        }
        unknown.sort();
        (config, unknown)
    }

    /// Layer a partial set of overrides on top of this config.
    /// Unknown keys are rejected; the config is left untouched on error.
    pub fn apply_overrides(
        &mut self,
        overrides: &HashMap<String, f64>,
    ) -> Result<(), WeightKeyError> {
        let mut resolved = Vec::with_capacity(overrides.len());
        for (name, value) in overrides {
            resolved.push((name.parse::<WeightKey>()?, *value));
        }
        for (key, value) in resolved {
            self.set(key, value);
        }
        Ok(())
    }

    /// Iterate over every (key, value) pair in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (WeightKey, f64)> + '_ {
        WeightKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

/// Parse a `KEY=VALUE` assignment as given to `--set`
pub fn parse_assignment(s: &str) -> Result<(WeightKey, f64), WeightKeyError> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| WeightKeyError::MalformedAssignment(s.to_string()))?;
    let key: WeightKey = key.parse()?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| WeightKeyError::InvalidValue {
            key: key.to_string(),
            value: value.trim().to_string(),
        })?;
    Ok((key, value))
}

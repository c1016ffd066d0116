use serde::Serialize;

use super::config::WeightConfig;
use super::factors::{score_diff_before, ScoreSituation, Strength};
use crate::data::Goal;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Overtime", "Strength", "Game winner"
    pub description: String, // e.g. "PP x0.8", "+0.3"
    pub before: f64,         // Weight before this factor
    pub after: f64,          // Weight after this factor
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightBreakdown {
    pub base: f64,
    /// Set when the empty-net override decided the weight
    pub empty_net: bool,
    /// `None` only for an empty-net goal whose scorer side is unknown
    pub situation: Option<ScoreSituation>,
    pub strength: Option<Strength>,
    pub factors: Vec<FactorContribution>,
}

impl WeightBreakdown {
    /// Human-readable situation, "Empty net" when the override applied
    pub fn situation_label(&self) -> &'static str {
        match (self.empty_net, self.situation) {
            (true, _) => "Empty net",
            (false, Some(situation)) => situation.label(),
            (false, None) => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightResult {
    pub value: f64,
    pub breakdown: WeightBreakdown,
}

const BASE_WEIGHT: f64 = 1.0;

/// Weight one goal by its game context.
///
/// Order matters: the empty-net override short-circuits everything,
/// multipliers apply next, the game-winner bonus is added last.
///
/// Returns `None` when the scorer's side is unknown and the goal is not an
/// empty-netter, since strength and score situation both depend on the side.
pub fn calculate_weight(goal: &Goal, config: &WeightConfig) -> Option<WeightResult> {
    let strength = goal
        .scorer_side
        .map(|side| Strength::parse(goal.strength_code.as_deref(), side));
    let situation = goal.scorer_side.map(|side| {
        ScoreSituation::classify(score_diff_before(
            goal.home_score_after,
            goal.away_score_after,
            side,
        ))
    });

    if goal.empty_net {
        return Some(WeightResult {
            value: config.empty_net,
            breakdown: WeightBreakdown {
                base: BASE_WEIGHT,
                empty_net: true,
                situation,
                strength,
                factors: vec![FactorContribution {
                    label: "Empty net".to_string(),
                    description: format!("={}", config.empty_net),
                    before: BASE_WEIGHT,
                    after: config.empty_net,
                }],
            },
        });
    }

    let (Some(strength), Some(situation)) = (strength, situation) else {
        return None;
    };

    let mut weight = BASE_WEIGHT;
    let mut factors = Vec::new();

    if goal.is_overtime() {
        let before = weight;
        weight *= config.overtime;
        factors.push(FactorContribution {
            label: "Overtime".to_string(),
            description: format!("x{}", config.overtime),
            before,
            after: weight,
        });
    }

    // Strength always applies, even strength included
    let before = weight;
    let strength_multiplier = strength.multiplier(config);
    weight *= strength_multiplier;
    factors.push(FactorContribution {
        label: "Strength".to_string(),
        description: format!("{} x{}", strength, strength_multiplier),
        before,
        after: weight,
    });

    let before = weight;
    let situation_multiplier = situation.multiplier(config);
    weight *= situation_multiplier;
    factors.push(FactorContribution {
        label: "Situation".to_string(),
        description: format!("{} x{}", situation, situation_multiplier),
        before,
        after: weight,
    });

    // Third period of regulation only, overtime does not stack with it
    if goal.period == 3 && !goal.is_overtime() {
        let before = weight;
        weight *= config.clutch_3rd;
        factors.push(FactorContribution {
            label: "3rd period".to_string(),
            description: format!("x{}", config.clutch_3rd),
            before,
            after: weight,
        });
    }

    if goal.game_winner {
        let before = weight;
        weight += config.gwg_bonus;
        factors.push(FactorContribution {
            label: "Game winner".to_string(),
            description: format!("{:+}", config.gwg_bonus),
            before,
            after: weight,
        });
    }

    Some(WeightResult {
        value: weight,
        breakdown: WeightBreakdown {
            base: BASE_WEIGHT,
            empty_net: false,
            situation: Some(situation),
            strength: Some(strength),
            factors,
        },
    })
}

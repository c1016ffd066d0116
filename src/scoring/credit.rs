use serde::Serialize;

use crate::data::{Goal, PlayerId};

/// Share of the goal weight credited to the primary assist
pub const PRIMARY_ASSIST_SHARE: f64 = 0.7;

/// Secondary assists are worth this fraction of a primary assist
pub const SECONDARY_ASSIST_FACTOR: f64 = 0.85;

/// How a player was involved in a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Scorer,
    PrimaryAssist,
    SecondaryAssist,
}

impl Role {
    /// Credit owed to this role for a goal of the given weight
    pub fn credit(self, weight: f64) -> f64 {
        match self {
            Role::Scorer => weight,
            Role::PrimaryAssist => weight * PRIMARY_ASSIST_SHARE,
            Role::SecondaryAssist => weight * PRIMARY_ASSIST_SHARE * SECONDARY_ASSIST_FACTOR,
        }
    }

    pub fn is_assist(self) -> bool {
        !matches!(self, Role::Scorer)
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Scorer => "G",
            Role::PrimaryAssist => "A1",
            Role::SecondaryAssist => "A2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Credit {
    pub player_id: PlayerId,
    pub role: Role,
    pub amount: f64,
}

/// Everyone credited on a goal with their role: scorer first, then the
/// assists present on the goal.
pub fn participants(goal: &Goal) -> impl Iterator<Item = (PlayerId, Role)> {
    [
        Some((goal.scorer_id, Role::Scorer)),
        goal.assist1_id.map(|id| (id, Role::PrimaryAssist)),
        goal.assist2_id.map(|id| (id, Role::SecondaryAssist)),
    ]
    .into_iter()
    .flatten()
}

/// Split a weighted goal into per-player credits.
pub fn distribute(goal: &Goal, weight: f64) -> Vec<Credit> {
    participants(goal)
        .map(|(player_id, role)| Credit {
            player_id,
            role,
            amount: role.credit(weight),
        })
        .collect()
}

/// The role a player had in a goal, if any
pub fn role_of(goal: &Goal, player_id: PlayerId) -> Option<Role> {
    participants(goal)
        .find(|(id, _)| *id == player_id)
        .map(|(_, role)| role)
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type PlayerId = u64;
pub type GameId = u64;

/// Which side of the game a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

/// One goal together with the game context it was scored in.
///
/// Scores are the scores *after* this goal. The scorer's side is resolved
/// once when the event is loaded, see [`crate::data::dataset`]; `None` when
/// the scorer's team matches neither side of the game.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: u64,
    pub game_id: GameId,
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub period: u8,
    pub time_in_period: String, // "MM:SS" elapsed in period
    pub strength_code: Option<String>, // e.g. "1551"
    pub scorer_id: PlayerId,
    pub assist1_id: Option<PlayerId>,
    pub assist2_id: Option<PlayerId>,
    pub home_score_after: u32,
    pub away_score_after: u32,
    pub empty_net: bool,
    pub game_winner: bool,
    pub overtime: bool,
    pub scorer_side: Option<Side>,
}

impl Goal {
    /// Overtime if flagged by the feed or scored after the third period
    pub fn is_overtime(&self) -> bool {
        self.overtime || self.period > 3
    }

    /// Return the matchup in the format "AWAY @ HOME"
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

/// Player lookup by id. Missing entries are unknown players, not errors.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: HashMap<PlayerId, Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn insert(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl FromIterator<Player> for Roster {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for player in iter {
            roster.insert(player);
        }
        roster
    }
}

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::types::{GameId, Goal, Player, PlayerId, Roster, Side};
use crate::scoring::WeightConfig;

/// Why a goal record could not be turned into a scoring event.
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("goal {goal_id}: game {game_id} has no date or teams")]
    MissingGame { goal_id: u64, game_id: GameId },
}

/// Summary block written by the exporter
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMeta {
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub game_count: u32,
    #[serde(default)]
    pub goal_count: u32,
    #[serde(default)]
    pub player_count: u32,
}

/// Goal record as exported, before the scorer's side is resolved
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGoal {
    id: u64,
    game_id: GameId,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    home_team: Option<String>,
    #[serde(default)]
    away_team: Option<String>,
    period: u8,
    #[serde(default)]
    time: String,
    #[serde(default)]
    situation: Option<String>,
    scorer_id: PlayerId,
    #[serde(default)]
    assist1_id: Option<PlayerId>,
    #[serde(default)]
    assist2_id: Option<PlayerId>,
    home_score: u32,
    away_score: u32,
    #[serde(default)]
    empty_net: bool,
    #[serde(default)]
    game_winner: bool,
    #[serde(default)]
    overtime: bool,
    #[serde(default)]
    scorer_team: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    meta: DatasetMeta,
    #[serde(default)]
    weights: HashMap<String, f64>,
    #[serde(default)]
    players: Vec<Player>,
    goals: Vec<RawGoal>,
}

/// Determine the scorer's side by matching the scorer's team against the
/// game's home and away teams. Never guesses.
pub fn resolve_scorer_side(
    scorer_team: Option<&str>,
    home_team: &str,
    away_team: &str,
) -> Option<Side> {
    let team = scorer_team?;
    if home_team == away_team {
        return None;
    }
    if team == home_team {
        Some(Side::Home)
    } else if team == away_team {
        Some(Side::Away)
    } else {
        None
    }
}

impl TryFrom<RawGoal> for Goal {
    type Error = DataError;

    fn try_from(raw: RawGoal) -> Result<Self, Self::Error> {
        let (Some(date), Some(home_team), Some(away_team)) =
            (raw.date, raw.home_team, raw.away_team)
        else {
            return Err(DataError::MissingGame {
                goal_id: raw.id,
                game_id: raw.game_id,
            });
        };

        let scorer_side =
            resolve_scorer_side(raw.scorer_team.as_deref(), &home_team, &away_team);
        if scorer_side.is_none() {
            tracing::warn!(
                goal = raw.id,
                scorer_team = ?raw.scorer_team,
                "{} @ {}: cannot tell which side scored, weighting only if empty net",
                away_team,
                home_team
            );
        }

        Ok(Goal {
            id: raw.id,
            game_id: raw.game_id,
            date,
            home_team,
            away_team,
            period: raw.period,
            time_in_period: raw.time,
            strength_code: raw.situation,
            scorer_id: raw.scorer_id,
            assist1_id: raw.assist1_id,
            assist2_id: raw.assist2_id,
            home_score_after: raw.home_score,
            away_score_after: raw.away_score,
            empty_net: raw.empty_net,
            game_winner: raw.game_winner,
            overtime: raw.overtime,
            scorer_side,
        })
    }
}

/// A loaded snapshot: everything one ranking pass needs.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub meta: DatasetMeta,
    /// Weights stored with the snapshot, missing keys filled with defaults
    pub weights: WeightConfig,
    pub roster: Roster,
    pub goals: Vec<Goal>,
    /// Goal records dropped because their game is missing
    pub skipped_goals: usize,
    /// Kept goals whose scorer side is unknown
    pub unresolved_goals: usize,
}

impl Dataset {
    /// One line per kind of degraded record, empty for a clean load
    pub fn load_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.skipped_goals > 0 {
            warnings.push(format!(
                "Skipped {} goal(s) with no game date or teams",
                self.skipped_goals
            ));
        }
        if self.unresolved_goals > 0 {
            warnings.push(format!(
                "{} goal(s) have no scorer side: counted in raw totals, weighted only if empty net",
                self.unresolved_goals
            ));
        }
        warnings
    }
}

/// Parse a dataset from its JSON text.
pub fn parse_dataset(json: &str) -> Result<Dataset> {
    let raw: RawDataset = serde_json::from_str(json).context("Failed to parse dataset JSON")?;

    let (weights, unknown) = WeightConfig::from_map(&raw.weights);
    for key in unknown {
        tracing::warn!(key = %key, "ignoring unknown weight key in dataset");
    }

    let roster: Roster = raw.players.into_iter().collect();

    let total = raw.goals.len();
    let mut goals = Vec::with_capacity(total);
    let mut skipped_goals = 0;
    for raw_goal in raw.goals {
        match Goal::try_from(raw_goal) {
            Ok(goal) => goals.push(goal),
            Err(e) => {
                tracing::warn!("skipping goal: {}", e);
                skipped_goals += 1;
            }
        }
    }

    let unresolved_goals = goals.iter().filter(|g| g.scorer_side.is_none()).count();

    tracing::info!(
        goals = goals.len(),
        skipped = skipped_goals,
        unresolved = unresolved_goals,
        players = roster.len(),
        "dataset loaded"
    );

    Ok(Dataset {
        meta: raw.meta,
        weights,
        roster,
        goals,
        skipped_goals,
        unresolved_goals,
    })
}

/// Load a dataset from a JSON file
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The JSON cannot be parsed
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        anyhow::bail!("Dataset not found at {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset at {}", path.display()))?;

    parse_dataset(&content).with_context(|| format!("Invalid dataset in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
  "meta": { "exportedAt": "2025-12-01T08:00:00.000Z", "gameCount": 2, "goalCount": 4, "playerCount": 2 },
  "weights": { "score_tie": 1.6, "clutch_3rd": 1.25, "legacy_bonus": 9 },
  "players": [
    { "id": 8478402, "name": "Connor McDavid", "team": "EDM", "nationality": "CAN" },
    { "id": 8477934, "name": "Leon Draisaitl", "team": "EDM", "nationality": null }
  ],
  "goals": [
    { "id": 1, "gameId": 2025020001, "date": "2025-10-08", "homeTeam": "EDM", "awayTeam": "CGY",
      "period": 1, "time": "04:12", "situation": "1551", "scorerId": 8478402,
      "assist1Id": 8477934, "assist2Id": null, "homeScore": 1, "awayScore": 0,
      "emptyNet": false, "gameWinner": false, "overtime": false, "scorerTeam": "EDM" },
    { "id": 2, "gameId": 2025020002, "date": "2025-10-10", "homeTeam": "VAN", "awayTeam": "EDM",
      "period": 3, "time": "19:01", "situation": "1560", "scorerId": 8477934,
      "assist1Id": null, "assist2Id": null, "homeScore": 2, "awayScore": 4,
      "emptyNet": true, "gameWinner": false, "overtime": false, "scorerTeam": "EDM" },
    { "id": 3, "gameId": 2025020002, "date": "2025-10-10", "homeTeam": "VAN", "awayTeam": "EDM",
      "period": 2, "time": "11:00", "situation": null, "scorerId": 8480000,
      "homeScore": 1, "awayScore": 2, "scorerTeam": null },
    { "id": 4, "gameId": 2025020003, "date": null, "homeTeam": null, "awayTeam": null,
      "period": 1, "time": "01:00", "scorerId": 8478402, "homeScore": 0, "awayScore": 1,
      "scorerTeam": "EDM" }
  ]
}"#;

    #[test]
    fn test_parse_sample_dataset() {
        let dataset = parse_dataset(SAMPLE).unwrap();

        assert_eq!(dataset.meta.game_count, 2);
        assert!(dataset.meta.exported_at.is_some());
        assert_eq!(dataset.roster.len(), 2);
        assert_eq!(dataset.goals.len(), 3);
        assert_eq!(dataset.skipped_goals, 1);
        assert_eq!(dataset.unresolved_goals, 1);

        let first = &dataset.goals[0];
        assert_eq!(first.scorer_side, Some(Side::Home));
        assert_eq!(first.strength_code.as_deref(), Some("1551"));
        assert_eq!(first.assist1_id, Some(8477934));
        assert_eq!(first.assist2_id, None);

        let second = &dataset.goals[1];
        assert_eq!(second.scorer_side, Some(Side::Away));
        assert!(second.empty_net);
        assert_eq!(second.time_in_period, "19:01");

        let third = &dataset.goals[2];
        assert_eq!(third.scorer_side, None);
        assert_eq!(third.scorer_id, 8480000);
    }

    #[test]
    fn test_load_warnings() {
        let dataset = parse_dataset(SAMPLE).unwrap();
        let warnings = dataset.load_warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Skipped 1 goal"));
        assert!(warnings[1].contains("1 goal(s) have no scorer side"));

        let clean = parse_dataset(r#"{ "goals": [] }"#).unwrap();
        assert!(clean.load_warnings().is_empty());
    }

    #[test]
    fn test_unresolved_empty_net_goal_still_counts() {
        let json = r#"{
  "goals": [
    { "id": 1, "gameId": 10, "date": "2025-10-10", "homeTeam": "VAN", "awayTeam": "EDM",
      "period": 3, "time": "19:30", "scorerId": 97, "homeScore": 2, "awayScore": 4,
      "emptyNet": true, "scorerTeam": null },
    { "id": 2, "gameId": 11, "date": "2025-10-12", "homeTeam": "EDM", "awayTeam": "CGY",
      "period": 1, "time": "02:00", "scorerId": 97, "homeScore": 1, "awayScore": 0,
      "scorerTeam": "EDM" }
  ]
}"#;
        let dataset = parse_dataset(json).unwrap();
        assert_eq!(dataset.goals.len(), 2);
        assert_eq!(dataset.skipped_goals, 0);
        assert_eq!(dataset.unresolved_goals, 1);

        let config = WeightConfig::default();
        let stats = crate::scoring::aggregate_stats(&dataset.goals, &config, &dataset.roster);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].goals, 2);
        // empty-net weight plus a go-ahead even-strength goal
        assert!((stats[0].weighted_goals - (config.empty_net + config.score_tie)).abs() < 1e-12);
    }

    #[test]
    fn test_partial_dataset_weights_use_defaults() {
        let dataset = parse_dataset(SAMPLE).unwrap();
        assert_eq!(dataset.weights.score_tie, 1.6);
        assert_eq!(dataset.weights.clutch_3rd, 1.25);
        assert_eq!(dataset.weights.empty_net, 0.3);
        assert_eq!(dataset.weights.overtime, 1.5);
    }

    #[test]
    fn test_missing_weights_block() {
        let dataset = parse_dataset(r#"{ "goals": [] }"#).unwrap();
        assert_eq!(dataset.weights, WeightConfig::default());
        assert!(dataset.goals.is_empty());
        assert!(dataset.roster.is_empty());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(parse_dataset("{ not json").is_err());
        assert!(parse_dataset(r#"{ "players": [] }"#).is_err());
    }

    #[test]
    fn test_resolve_scorer_side() {
        assert_eq!(resolve_scorer_side(Some("EDM"), "EDM", "CGY"), Some(Side::Home));
        assert_eq!(resolve_scorer_side(Some("CGY"), "EDM", "CGY"), Some(Side::Away));
        assert_eq!(resolve_scorer_side(Some("TOR"), "EDM", "CGY"), None);
        assert_eq!(resolve_scorer_side(None, "EDM", "CGY"), None);
        assert_eq!(resolve_scorer_side(Some("EDM"), "EDM", "EDM"), None);
    }

    #[test]
    fn test_unresolved_side_is_kept() {
        let raw: RawGoal = serde_json::from_str(
            r#"{ "id": 9, "gameId": 1, "date": "2025-10-10", "homeTeam": "VAN", "awayTeam": "EDM",
                 "period": 2, "scorerId": 1, "homeScore": 1, "awayScore": 0 }"#,
        )
        .unwrap();
        let goal = Goal::try_from(raw).unwrap();
        assert_eq!(goal.scorer_side, None);
    }

    #[test]
    fn test_missing_game_error() {
        let raw: RawGoal = serde_json::from_str(
            r#"{ "id": 9, "gameId": 1, "period": 2, "scorerId": 1, "homeScore": 1, "awayScore": 0 }"#,
        )
        .unwrap();
        let err = Goal::try_from(raw).unwrap_err();
        assert_eq!(err, DataError::MissingGame { goal_id: 9, game_id: 1 });
    }

    #[test]
    fn test_load_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.goals.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Dataset not found"));
    }
}

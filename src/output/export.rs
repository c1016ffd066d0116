use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::data::{DatasetMeta, PlayerId};
use crate::scoring::{RankedPlayer, Trend, WeightConfig};

/// One ranked player as written to the export file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow<'a> {
    pub id: PlayerId,
    pub name: &'a str,
    pub team: &'a str,
    pub nationality: Option<&'a str>,
    pub games_played: usize,
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
    pub weighted_goals: f64,
    pub weighted_assists: f64,
    pub weighted_points: f64,
    pub traditional_rank: usize,
    pub weighted_rank: usize,
    pub rank_delta: i64,
    pub trend: Trend,
}

impl<'a> From<&'a RankedPlayer> for ExportRow<'a> {
    fn from(player: &'a RankedPlayer) -> Self {
        let stats = &player.stats;
        Self {
            id: stats.player_id,
            name: &stats.name,
            team: &stats.team,
            nationality: stats.nationality.as_deref(),
            games_played: stats.games_played(),
            goals: stats.goals,
            assists: stats.assists,
            points: stats.points(),
            weighted_goals: stats.weighted_goals,
            weighted_assists: stats.weighted_assists,
            weighted_points: stats.weighted_points(),
            traditional_rank: player.traditional_rank,
            weighted_rank: player.weighted_rank,
            rank_delta: player.rank_delta,
            trend: player.trend(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Export<'a> {
    pub generated_at: DateTime<Utc>,
    pub source: &'a DatasetMeta,
    pub weights: &'a WeightConfig,
    pub players: Vec<ExportRow<'a>>,
}

impl<'a> Export<'a> {
    pub fn new(
        players: &'a [RankedPlayer],
        weights: &'a WeightConfig,
        source: &'a DatasetMeta,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            source,
            weights,
            players: players.iter().map(ExportRow::from).collect(),
        }
    }
}

/// Write rankings and the weight snapshot to a JSON file atomically
///
/// Values keep full f64 precision; rounding is left to whoever reads the file.
pub fn write_export(path: &Path, export: &Export) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, export).context("Failed to serialize rankings")?;

    file.commit()
        .with_context(|| format!("Failed to write export to {}", path.display()))?;

    tracing::info!(path = %path.display(), players = export.players.len(), "rankings exported");
    Ok(())
}

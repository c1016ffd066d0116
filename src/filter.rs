use std::collections::HashMap;

use crate::scoring::{RankedPlayer, UNKNOWN_NATIONALITY};

/// Display filters over a ranked list. Ranks are never recomputed here.
#[derive(Debug, Clone, Default)]
pub struct RankFilter {
    /// Case-insensitive substring of player name or team
    pub search: Option<String>,
    /// Exact nationality code, e.g. "FIN"
    pub nationality: Option<String>,
    /// Team code, case-insensitive
    pub team: Option<String>,
}

impl RankFilter {
    pub fn matches(&self, player: &RankedPlayer) -> bool {
        let stats = &player.stats;

        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !stats.name.to_lowercase().contains(&needle)
                && !stats.team.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        if let Some(ref nationality) = self.nationality {
            if stats.nationality.as_deref() != Some(nationality.as_str()) {
                return false;
            }
        }

        if let Some(ref team) = self.team {
            if !stats.team.eq_ignore_ascii_case(team) {
                return false;
            }
        }

        true
    }
}

/// Filter ranked players, keeping their order
pub fn filter_ranked<'a>(
    players: &'a [RankedPlayer],
    filter: &RankFilter,
) -> Vec<&'a RankedPlayer> {
    players.iter().filter(|p| filter.matches(p)).collect()
}

/// Player counts per nationality, most common first
pub fn nationality_counts(players: &[RankedPlayer], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for player in players {
        let code = player.stats.nationality.as_deref().unwrap_or(UNKNOWN_NATIONALITY);
        *counts.entry(code).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(code, n)| (code.to_string(), n))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::PlayerStats;
    use std::collections::BTreeSet;

    fn create_test_player(
        id: u64,
        name: &str,
        team: &str,
        nationality: Option<&str>,
    ) -> RankedPlayer {
        RankedPlayer {
            stats: PlayerStats {
                player_id: id,
                name: name.to_string(),
                team: team.to_string(),
                nationality: nationality.map(str::to_string),
                games: BTreeSet::new(),
                goals: 1,
                assists: 1,
                weighted_goals: 1.0,
                weighted_assists: 0.7,
            },
            traditional_rank: id as usize,
            weighted_rank: id as usize,
            rank_delta: 0,
        }
    }

    fn players() -> Vec<RankedPlayer> {
        vec![
            create_test_player(1, "Sebastian Aho", "CAR", Some("FIN")),
            create_test_player(2, "Mikko Rantanen", "DAL", Some("FIN")),
            create_test_player(3, "Jack Hughes", "NJD", Some("USA")),
            create_test_player(4, "Player 4", "???", None),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_all() {
        let players = players();
        assert_eq!(filter_ranked(&players, &RankFilter::default()).len(), 4);
    }

    #[test]
    fn test_search_matches_name_or_team() {
        let players = players();
        let filter = RankFilter {
            search: Some("aho".to_string()),
            ..Default::default()
        };
        let found = filter_ranked(&players, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stats.player_id, 1);

        let filter = RankFilter {
            search: Some("njd".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_ranked(&players, &filter)[0].stats.player_id, 3);
    }

    #[test]
    fn test_nationality_filter_keeps_rank_order() {
        let players = players();
        let filter = RankFilter {
            nationality: Some("FIN".to_string()),
            ..Default::default()
        };
        let ids: Vec<u64> = filter_ranked(&players, &filter)
            .iter()
            .map(|p| p.stats.player_id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_team_filter_case_insensitive() {
        let players = players();
        let filter = RankFilter {
            team: Some("dal".to_string()),
            ..Default::default()
        };
        let found = filter_ranked(&players, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stats.name, "Mikko Rantanen");
    }

    #[test]
    fn test_combined_filters() {
        let players = players();
        let filter = RankFilter {
            search: Some("h".to_string()),
            nationality: Some("USA".to_string()),
            team: None,
        };
        let found = filter_ranked(&players, &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stats.player_id, 3);
    }

    #[test]
    fn test_nationality_counts() {
        let players = players();
        let counts = nationality_counts(&players, 10);
        assert_eq!(
            counts,
            vec![
                ("FIN".to_string(), 2),
                (UNKNOWN_NATIONALITY.to_string(), 1),
                ("USA".to_string(), 1)
            ]
        );
        assert_eq!(nationality_counts(&players, 1).len(), 1);
    }
}

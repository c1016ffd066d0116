use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::data::Goal;
use crate::scoring::{
    summarize_goals, RankedPlayer, Trend, WeightConfig, WeightedEventDetail, UNKNOWN_NATIONALITY,
};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Pad to a display width counted in chars, not bytes
fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

/// Rank movement with sign: "+3", "-2", "-" for no change
pub fn format_delta(delta: i64) -> String {
    if delta > 0 {
        format!("+{}", delta)
    } else if delta < 0 {
        delta.to_string()
    } else {
        "-".to_string()
    }
}

/// Weighted totals are shown with two decimals
pub fn format_weighted(value: f64) -> String {
    format!("{:.2}", value)
}

fn color_delta(padded: &str, delta: i64) -> String {
    if delta > 0 {
        padded.green().to_string()
    } else if delta < 0 {
        padded.red().to_string()
    } else {
        padded.dimmed().to_string()
    }
}

pub fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Clutch => "clutch",
        Trend::Steady => "steady",
        Trend::GarbageTime => "garbage time",
    }
}

/// "P1".."P3", "OT" for anything past regulation
fn period_label(goal: &Goal) -> String {
    if goal.is_overtime() {
        "OT".to_string()
    } else {
        format!("P{}", goal.period)
    }
}

const TABLE_HEADER: [&str; 12] = [
    "wRk", "+/-", "Player", "Team", "GP", "G", "A", "P", "wG", "wA", "wP", "Rk",
];

/// Format ranked players as a table ordered as given
///
/// Columns: weighted rank, rank delta, name, team, games, goals, assists,
/// points, weighted goals/assists/points, traditional rank.
/// Names are truncated to fit the terminal; pipes get full names.
pub fn format_rank_table(players: &[&RankedPlayer], use_colors: bool) -> String {
    if players.is_empty() {
        return "No players found.".to_string();
    }

    // Everything except the name column, separators included
    let fixed_width = 4 + 2 + 4 + 2 + 2 + 4 + 4 * 4 + 3 * 8 + 2 + 4;
    let longest = players
        .iter()
        .map(|p| p.stats.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(TABLE_HEADER[2].len());

    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest.min(width - fixed_width),
        Some(_) => longest.min(20),
        None => longest,
    };

    let header = format!(
        "{:>4}  {:>4}  {}  {:<4}{:>4}{:>4}{:>4}{:>4}{:>8}{:>8}{:>8}  {:>4}",
        TABLE_HEADER[0],
        TABLE_HEADER[1],
        pad_right(TABLE_HEADER[2], name_width),
        TABLE_HEADER[3],
        TABLE_HEADER[4],
        TABLE_HEADER[5],
        TABLE_HEADER[6],
        TABLE_HEADER[7],
        TABLE_HEADER[8],
        TABLE_HEADER[9],
        TABLE_HEADER[10],
        TABLE_HEADER[11],
    );

    let mut lines = Vec::with_capacity(players.len() + 1);
    lines.push(if use_colors { header.bold().to_string() } else { header });

    for player in players {
        let stats = &player.stats;
        let rank_str = format!("{:>3}.", player.weighted_rank);
        let delta_str = format!("{:>4}", format_delta(player.rank_delta));
        let name = pad_right(&truncate_name(&stats.name, name_width), name_width);
        let counts = format!(
            "{:<4}{:>4}{:>4}{:>4}{:>4}",
            stats.team,
            stats.games_played(),
            stats.goals,
            stats.assists,
            stats.points()
        );
        let weighted = format!(
            "{:>8}{:>8}",
            format_weighted(stats.weighted_goals),
            format_weighted(stats.weighted_assists)
        );
        let weighted_points = format!("{:>8}", format_weighted(stats.weighted_points()));
        let trad_str = format!("{:>4}", player.traditional_rank);

        if use_colors {
            lines.push(format!(
                "{}  {}  {}  {}{}{}  {}",
                rank_str.dimmed(),
                color_delta(&delta_str, player.rank_delta),
                name,
                counts,
                weighted,
                weighted_points.bold(),
                trad_str.dimmed()
            ));
        } else {
            lines.push(format!(
                "{}  {}  {}  {}{}{}  {}",
                rank_str, delta_str, name, counts, weighted, weighted_points, trad_str
            ));
        }
    }

    lines.join("\n")
}

/// Format ranked players as tab-separated values for scripting
/// Columns: weighted_rank, traditional_rank, rank_delta, id, name, team,
/// games, goals, assists, points, weighted_goals, weighted_assists,
/// weighted_points (no headers, no colors)
pub fn format_tsv(players: &[&RankedPlayer]) -> String {
    if players.is_empty() {
        return String::new();
    }

    players
        .iter()
        .map(|player| {
            let stats = &player.stats;
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.4}\t{:.4}\t{:.4}",
                player.weighted_rank,
                player.traditional_rank,
                player.rank_delta,
                stats.player_id,
                stats.name,
                stats.team,
                stats.games_played(),
                stats.goals,
                stats.assists,
                stats.points(),
                stats.weighted_goals,
                stats.weighted_assists,
                stats.weighted_points()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_highlight_line(index: usize, player: &RankedPlayer, use_colors: bool) -> String {
    let stats = &player.stats;
    let delta_str = format!("{:>4}", format_delta(player.rank_delta));
    let movement = format!(
        "#{} -> #{}",
        player.traditional_rank, player.weighted_rank
    );

    if use_colors {
        format!(
            "{:>3}. {}  {} ({})  {} pts  {}",
            index + 1,
            color_delta(&delta_str, player.rank_delta),
            stats.name.bold(),
            stats.team.cyan(),
            stats.points(),
            movement.dimmed()
        )
    } else {
        format!(
            "{:>3}. {}  {} ({})  {} pts  {}",
            index + 1,
            delta_str,
            stats.name,
            stats.team,
            stats.points(),
            movement
        )
    }
}

/// Format the risers and fallers lists under their headings
pub fn format_highlights(
    risers: &[&RankedPlayer],
    fallers: &[&RankedPlayer],
    use_colors: bool,
) -> String {
    let mut out = Vec::new();

    for (title, players) in [
        ("Biggest risers (clutch)", risers),
        ("Biggest fallers (garbage time)", fallers),
    ] {
        if !out.is_empty() {
            out.push(String::new());
        }
        out.push(if use_colors {
            title.bold().to_string()
        } else {
            title.to_string()
        });
        if players.is_empty() {
            out.push("  None".to_string());
        }
        for (idx, player) in players.iter().enumerate() {
            out.push(format_highlight_line(idx, player, use_colors));
        }
    }

    out.join("\n")
}

/// Format one event of a player's listing, with its factor breakdown
pub fn format_event(detail: &WeightedEventDetail, use_colors: bool) -> String {
    let goal = detail.goal;
    let strength = detail
        .weight
        .as_ref()
        .and_then(|w| w.breakdown.strength)
        .map_or("--", |s| s.abbrev());

    let head = format!(
        "{}  {:<11} {:<3} {:>5}  {:<2}  {:<2}",
        goal.date,
        goal.matchup(),
        period_label(goal),
        goal.time_in_period,
        strength,
        detail.role.label()
    );

    let Some(result) = &detail.weight else {
        let line = format!("  {}  {:>14}  scorer side unknown", head, "unweighted");
        return if use_colors {
            line.dimmed().to_string()
        } else {
            line
        };
    };
    let breakdown = &result.breakdown;

    let weight = format!(
        "{:>5} -> {:>5}",
        format_weighted(result.value),
        format_weighted(detail.role.credit(result.value))
    );

    let mut lines = vec![if use_colors {
        format!(
            "  {}  {}  {}",
            head,
            weight.bold(),
            breakdown.situation_label().yellow()
        )
    } else {
        format!("  {}  {}  {}", head, weight, breakdown.situation_label())
    }];

    for factor in &breakdown.factors {
        let line = format!(
            "      {}: {} ({} -> {})",
            factor.label,
            factor.description,
            format_weighted(factor.before),
            format_weighted(factor.after)
        );
        lines.push(if use_colors {
            line.dimmed().to_string()
        } else {
            line
        });
    }

    lines.join("\n")
}

/// Format a player's summary followed by their weighted event listing
pub fn format_player_detail(
    player: &RankedPlayer,
    events: &[WeightedEventDetail],
    use_colors: bool,
) -> String {
    let stats = &player.stats;
    let nationality = stats.nationality.as_deref().unwrap_or(UNKNOWN_NATIONALITY);

    let mut lines = Vec::new();
    if use_colors {
        lines.push(format!(
            "{} ({}, {})",
            stats.name.bold(),
            stats.team.cyan(),
            nationality
        ));
    } else {
        lines.push(format!("{} ({}, {})", stats.name, stats.team, nationality));
    }
    lines.push(format!(
        "  Rank: {} weighted, {} traditional ({} {})",
        player.weighted_rank,
        player.traditional_rank,
        format_delta(player.rank_delta),
        trend_label(player.trend())
    ));
    lines.push(format!(
        "  GP {}  G {}  A {}  P {}",
        stats.games_played(),
        stats.goals,
        stats.assists,
        stats.points()
    ));
    lines.push(format!(
        "  wG {}  wA {}  wP {}",
        format_weighted(stats.weighted_goals),
        format_weighted(stats.weighted_assists),
        format_weighted(stats.weighted_points())
    ));

    if events.is_empty() {
        return lines.join("\n");
    }

    let summary = summarize_goals(events);
    if !summary.by_type.is_empty() {
        lines.push(String::new());
        let by_type: Vec<_> = summary
            .by_type
            .iter()
            .map(|(goal_type, n)| (goal_type.label(), *n))
            .collect();
        for (title, counts) in [
            ("Goals by situation", summary.by_situation.as_slice()),
            ("Goals by strength", summary.by_strength.as_slice()),
            ("Goals by type", by_type.as_slice()),
        ] {
            lines.push(format!("  {}: {}", title, format_counts(counts)));
        }
    }

    lines.push(String::new());
    for detail in events {
        lines.push(format_event(detail, use_colors));
    }

    lines.join("\n")
}

/// "Label n, Label n" in the order given
fn format_counts(counts: &[(&str, usize)]) -> String {
    counts
        .iter()
        .map(|(label, n)| format!("{} {}", label, n))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format per-nationality player counts as an aligned two-column list
pub fn format_nationality_counts(counts: &[(String, usize)], use_colors: bool) -> String {
    if counts.is_empty() {
        return "No players found.".to_string();
    }

    counts
        .iter()
        .map(|(code, n)| {
            let code = format!("{:<4}", code);
            if use_colors {
                format!("{}{:>5}", code.cyan(), n)
            } else {
                format!("{}{:>5}", code, n)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a weight snapshot, one "key value" per line
pub fn format_weights(config: &WeightConfig) -> String {
    config
        .entries()
        .map(|(key, value)| format!("{} {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clutch_puck::config::Config;
use clutch_puck::filter::{filter_ranked, nationality_counts, RankFilter};
use clutch_puck::scoring::{self, WeightKey};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank players by weighted points (default if no subcommand)
    Rank {
        /// Number of rows to show
        #[arg(short, long, default_value_t = 30)]
        limit: usize,

        /// Case-insensitive match on player name or team
        #[arg(short, long)]
        search: Option<String>,

        /// Nationality code, e.g. FIN
        #[arg(short, long)]
        nationality: Option<String>,

        /// Team code, e.g. EDM
        #[arg(short, long)]
        team: Option<String>,

        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Players who gain or lose the most places once goals are weighted
    Highlights,
    /// Most common nationalities among ranked players
    Nationalities {
        /// Number of nationalities to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Show a player's totals and every goal they were in on
    Player {
        /// Player id from the dataset
        id: u64,
    },
    /// Print the effective weights, one "key value" per line
    Weights,
    /// Write rankings and the weight snapshot to a JSON file
    Export {
        /// Output file
        path: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(name = "clutch-puck")]
#[command(about = "Situation-weighted hockey scoring rankings", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/clutch-puck/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the dataset JSON (defaults to `data` in config, then
    /// ~/.config/clutch-puck/data.json)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Override one weight for this run, e.g. --set clutch_3rd=1.4
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    set: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_data_path(cli_path: Option<PathBuf>, config: &Config) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli_path.or_else(|| config.data.clone()) {
        return Ok(path);
    }
    Ok(clutch_puck::config::get_config_dir()?.join("data.json"))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Rank {
        limit: 30,
        search: None,
        nationality: None,
        team: None,
        tsv: false,
    });
    let start_time = Instant::now();

    // Load config
    let config = match clutch_puck::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let mut assignments: Vec<(WeightKey, f64)> = Vec::with_capacity(cli.set.len());
    for raw in &cli.set {
        match scoring::parse_assignment(raw) {
            Ok(assignment) => assignments.push(assignment),
            Err(e) => {
                eprintln!("Invalid --set: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    // Load dataset
    let data_path = match resolve_data_path(cli.data, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    let dataset = match clutch_puck::data::load_dataset(&data_path) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Data error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };
    for warning in dataset.load_warnings() {
        eprintln!("Warning: {}", warning);
    }

    // Build and validate the weight snapshot for this run
    let weights = match clutch_puck::config::effective_weights(
        &dataset.weights,
        &config,
        &assignments,
    ) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Err(errors) = scoring::validate_weights(&weights) {
        eprintln!("Weight config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let ranked = scoring::compute_rankings(&dataset.goals, &weights, &dataset.roster);
    tracing::debug!(
        players = ranked.len(),
        elapsed = ?start_time.elapsed(),
        "rankings computed"
    );

    let use_colors = clutch_puck::output::should_use_colors();

    // Route based on subcommand
    match command {
        Commands::Rank {
            limit,
            search,
            nationality,
            team,
            tsv,
        } => {
            let filter = RankFilter {
                search,
                nationality,
                team,
            };
            let mut shown = filter_ranked(&ranked, &filter);
            shown.truncate(limit);

            if tsv {
                let output = clutch_puck::output::format_tsv(&shown);
                if !output.is_empty() {
                    println!("{}", output);
                }
            } else {
                println!("{}", clutch_puck::output::format_rank_table(&shown, use_colors));
            }
        }
        Commands::Highlights => {
            let risers = scoring::biggest_risers(&ranked, &config.highlights);
            let fallers = scoring::biggest_fallers(&ranked, &config.highlights);
            println!(
                "{}",
                clutch_puck::output::format_highlights(&risers, &fallers, use_colors)
            );
        }
        Commands::Nationalities { limit } => {
            let counts = nationality_counts(&ranked, limit);
            println!(
                "{}",
                clutch_puck::output::format_nationality_counts(&counts, use_colors)
            );
        }
        Commands::Player { id } => {
            let Some(player) = ranked.iter().find(|p| p.stats.player_id == id) else {
                eprintln!("Player {} has no goals or assists in this dataset.", id);
                std::process::exit(EXIT_CONFIG);
            };
            let events = scoring::events_for(id, &dataset.goals, &weights);
            println!(
                "{}",
                clutch_puck::output::format_player_detail(player, &events, use_colors)
            );
        }
        Commands::Weights => {
            println!("{}", clutch_puck::output::format_weights(&weights));
        }
        Commands::Export { path } => {
            let export = clutch_puck::output::Export::new(&ranked, &weights, &dataset.meta);
            if let Err(e) = clutch_puck::output::write_export(&path, &export) {
                eprintln!("Export error: {:#}", e);
                std::process::exit(EXIT_DATA);
            }
            println!("Wrote {} players to {}", ranked.len(), path.display());
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

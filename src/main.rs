use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deck_meta::calculate::{extract_results, CompetitionScoreListing, DeckAnalysis, ResultHandler};
use deck_meta::classify::{audit, pioneer, ClassificationRule, Classifier, RuleSet};
use deck_meta::config::AppConfig;
use deck_meta::models::{sort_by_play_rate, ClassifiedTournament, Tournament};
use deck_meta::report;
use deck_meta::storage::{jsonl::read_tournament_file, JsonlRepository, StorageConfig, TournamentRepository};

#[derive(Parser)]
#[command(name = "deck-meta")]
#[command(about = "MTGO metagame tracker: archetype classification and deck statistics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// TOML rule set to classify with instead of the bundled Pioneer rules
    #[arg(long)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import scraped tournaments (JSON array or JSON Lines)
    Import {
        /// File to import
        file: PathBuf,
    },

    /// Play rate and win rate per archetype
    Stats {
        /// Only show this archetype, e.g. "Izzet Phoenix"
        #[arg(long)]
        deck: Option<String>,

        /// Split --deck by how many copies of this card it plays (repeatable)
        #[arg(long)]
        card: Vec<String>,

        /// Only count tournaments from the last N days (0 = all)
        #[arg(long)]
        days: Option<u32>,

        /// Hide archetypes with fewer matches
        #[arg(long)]
        min_matches: Option<u32>,

        /// Show at most this many archetypes (0 = all)
        #[arg(long)]
        max_results: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Rank-based competition scores weighted by tournament size
    Scores {
        #[arg(long)]
        days: Option<u32>,
    },

    /// Card choices within one archetype
    Analyze {
        #[arg(long)]
        deck: String,

        #[arg(long)]
        days: Option<u32>,

        #[arg(long)]
        min_matches: Option<u32>,
    },

    /// List decks no rule recognises
    Unclassified {
        #[arg(long)]
        days: Option<u32>,
    },

    /// List decks matched by more than one rule
    Ambiguous {
        #[arg(long)]
        days: Option<u32>,
    },

    /// Show the active rule set in priority order
    Rules,
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn load_rule_set(path: Option<&Path>) -> Result<RuleSet> {
    match path {
        Some(path) => RuleSet::from_toml_file(path)
            .with_context(|| format!("Failed to load rule set from {:?}", path)),
        None => Ok(pioneer::rule_set()),
    }
}

fn load_tournaments(repo: &JsonlRepository, days: u32, now: DateTime<Utc>) -> Result<Vec<Tournament>> {
    let tournaments = repo
        .load_all(days, now)
        .with_context(|| format!("Failed to read tournaments from {:?}", repo.path()))?;
    tracing::info!("Loaded {} tournaments", tournaments.len());
    Ok(tournaments)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
        config.validate()?;
    }
    if let Some(rules) = cli.rules {
        config.rules_path = Some(rules);
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting deck-meta v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());
    let mut repo = JsonlRepository::new(&storage);
    let rule_set = load_rule_set(config.rules_path.as_deref())?;
    tracing::info!("Using rule set {} ({} rules)", rule_set.label(), rule_set.rules.len());
    let now = Utc::now();

    match cli.command {
        Commands::Import { file } => {
            let tournaments = read_tournament_file(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            let total = tournaments.len();
            let added = repo.add_all(tournaments)?;

            println!("Read:    {}", total);
            println!("Added:   {}", added);
            println!("Skipped: {} (already stored)", total - added);
        }

        Commands::Stats {
            deck,
            card,
            days,
            min_matches,
            max_results,
            json,
        } => {
            if !card.is_empty() && deck.is_none() {
                bail!("--card {:?} given, but no --deck specified", card);
            }

            let classifier = Classifier::from_rule_set(rule_set);
            let tournaments = load_tournaments(&repo, 0, now)?;
            let mut handler = ResultHandler::new(extract_results(&tournaments, &classifier));
            handler.filter(Some(days.unwrap_or(config.stats.max_days)), now);

            if handler.population() == 0 {
                println!("{}", report::EMPTY_DATABASE);
                return Ok(());
            }
            if let Some(deck) = &deck {
                handler.split_deck_by_cards(deck, &card);
                if handler.is_empty() {
                    print!("{}", report::no_results(deck));
                    return Ok(());
                }
            }

            let min_matches = min_matches.unwrap_or(config.stats.min_matches);
            let max_results = max_results.unwrap_or(config.stats.max_results);
            let mut stats = handler.calculate_deck_stats()?;

            if json {
                stats.retain(|s| s.total_matches >= min_matches);
                sort_by_play_rate(&mut stats);
                if max_results > 0 {
                    stats.truncate(max_results);
                }
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", report::stats_table(&stats, min_matches, max_results));
            }
        }

        Commands::Scores { days } => {
            let classifier = Classifier::from_rule_set(rule_set);
            let days = days.unwrap_or(config.competition.max_days);
            let classified: Vec<ClassifiedTournament> = load_tournaments(&repo, days, now)?
                .iter()
                .map(|t| ClassifiedTournament::from_tournament(t, &classifier))
                .collect();

            let listing = CompetitionScoreListing::from_tournaments(&classified);
            print!("{}", report::scores_table(&listing));
        }

        Commands::Analyze {
            deck,
            days,
            min_matches,
        } => {
            let classifier = Classifier::from_rule_set(rule_set);
            let tournaments = load_tournaments(&repo, 0, now)?;
            let mut handler = ResultHandler::new(extract_results(&tournaments, &classifier));
            handler.filter(Some(days.unwrap_or(config.stats.max_days)), now);

            let analysis = DeckAnalysis::from_results(&deck, handler.results());
            let min_matches = min_matches.unwrap_or(config.stats.min_matches);
            print!("{}", report::analysis_table(&analysis, min_matches));
        }

        Commands::Unclassified { days } => {
            let classifier = Classifier::from_rule_set(rule_set);
            let tournaments =
                load_tournaments(&repo, days.unwrap_or(config.stats.max_days), now)?;
            let entries = audit::unclassified_entries(&tournaments, &classifier);
            print!("{}", report::unclassified_list(&entries));
        }

        Commands::Ambiguous { days } => {
            let classifier = Classifier::from_rule_set(rule_set);
            let tournaments =
                load_tournaments(&repo, days.unwrap_or(config.stats.max_days), now)?;
            let entries = audit::ambiguous_entries(&tournaments, &classifier);
            print!("{}", report::ambiguous_list(&entries));
        }

        Commands::Rules => {
            println!("Rule set: {}", rule_set.label());
            for (i, rule) in rule_set.rules.iter().enumerate() {
                println!("{:>3}. {:<28}{}", i + 1, rule.deck_name(), rule.describe());
            }
        }
    }

    Ok(())
}

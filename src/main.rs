mod analysis;
mod api;
mod cache;
mod config;
mod display;
mod draft;
mod error;
mod roster;

use analysis::matchups::{MatchupCache, MatchupTable};
use analysis::recommender::CounterRecommender;
use analysis::scoring;
use anyhow::{Context, Result};
use api::client::{CatalogClient, FileSource, HeroSource};
use cache::CatalogCache;
use clap::{Parser, Subcommand};
use config::Config;
use display::output::{
    display_draft_board, display_draft_help, display_error, display_hero_detail, display_heroes,
    display_info, display_rolled_hero, display_score, display_success, display_suggestions,
    display_warning,
};
use draft::{DraftBoard, DraftSession, Side};
use error::AppError;
use indicatif::ProgressBar;
use roster::character::{Character, Tier};
use roster::filter::{self, HeroFilter};
use roster::meta::MetaLayer;
use roster::Roster;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mlbb-draft")]
#[command(about = "Browse the hero roster and get counter-pick suggestions for a draft", long_about = None)]
#[command(version)]
struct Cli {
    /// Read the hero catalog from a local JSON file instead of the wiki API
    #[arg(long, global = true)]
    catalog_file: Option<PathBuf>,

    /// Meta layer JSON (tier, difficulty, utility... keyed by hero name)
    #[arg(long, global = true)]
    meta_file: Option<PathBuf>,

    /// Load matchup statistics from a JSON file instead of generating them
    #[arg(long, global = true)]
    matchups: Option<PathBuf>,

    /// Seed for the generated matchup table (reproducible suggestions)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Ignore the cached catalog and fetch it again
    #[arg(long, global = true)]
    refresh: bool,

    /// Verbose diagnostic logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List heroes, optionally filtered
    Heroes {
        /// Name contains
        #[arg(short, long)]
        search: Option<String>,

        /// Role, e.g. Tank, Mage (matches secondary roles too)
        #[arg(short, long)]
        role: Option<String>,

        /// Lane, e.g. "Gold Lane", Jungling
        #[arg(short, long)]
        lane: Option<String>,

        /// Meta tier: S+, S, A, B, C
        #[arg(short, long)]
        tier: Option<Tier>,

        /// Utility tag, e.g. CC, Burst
        #[arg(short, long)]
        utility: Option<String>,

        /// Pick one random hero among the matches
        #[arg(long)]
        roll: bool,
    },

    /// Show one hero with its counters and synergies
    Hero {
        /// Hero name or id
        name: String,
    },

    /// Score one hero against a set of enemy picks
    Score {
        /// Hero name or id
        hero: String,

        /// Enemy picks, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        enemy: Vec<String>,
    },

    /// Rank counter picks against the enemy team
    Suggest {
        /// Enemy picks, comma separated (max 5)
        #[arg(short, long, value_delimiter = ',', required = true)]
        enemy: Vec<String>,

        /// Ally picks, comma separated (max 5)
        #[arg(short, long, value_delimiter = ',')]
        ally: Vec<String>,

        /// Only suggest heroes with this role
        #[arg(short, long)]
        role: Option<String>,

        /// Number of suggestions (default: MLBB_SUGGESTION_LIMIT or 8)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Interactive draft board on stdin
    Draft {
        /// Number of suggestions (default: MLBB_SUGGESTION_LIMIT or 8)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Write the matchup table to a JSON file
    ExportMatchups {
        path: PathBuf,
    },
}

/// Where matchup statistics come from for this session.
struct Matchups {
    imported: Option<MatchupTable>,
    cache: MatchupCache,
}

impl Matchups {
    fn table(&mut self, roster: &Roster) -> &MatchupTable {
        match &self.imported {
            Some(table) => table,
            None => self.cache.get_or_build(roster),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "mlbb_draft=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        catalog_file,
        meta_file,
        matchups,
        seed,
        refresh,
        verbose: _,
        command,
    } = cli;

    // Load configuration, flags win over the environment
    let mut config = Config::from_env()?;
    if seed.is_some() {
        config.matchup_seed = seed;
    }
    if meta_file.is_some() {
        config.meta_path = meta_file;
    }

    let meta = match &config.meta_path {
        Some(path) => MetaLayer::load(path)
            .with_context(|| format!("could not load meta layer {}", path.display()))?,
        None => MetaLayer::default(),
    };

    let roster = load_roster(&config, catalog_file.as_deref(), refresh, &meta)
        .context("could not load the hero roster")?;
    display_success(&format!("Loaded {} heroes", roster.len()));

    let imported = match &matchups {
        Some(path) => {
            let table = MatchupTable::load(path)
                .with_context(|| format!("could not load matchups {}", path.display()))?;
            let uncovered = roster.iter().filter(|h| !table.contains_subject(&h.id)).count();
            if uncovered > 0 {
                display_warning(&format!(
                    "{} heroes have no matchup data and will score 0",
                    uncovered
                ));
            }
            Some(table)
        }
        None => None,
    };
    let mut matchups = Matchups {
        imported,
        cache: MatchupCache::new(config.matchup_seed),
    };

    match command {
        Commands::Heroes {
            search,
            role,
            lane,
            tier,
            utility,
            roll,
        } => {
            let hero_filter = HeroFilter {
                search,
                role,
                lane,
                tier,
                utility,
            };
            let hits = hero_filter.apply(roster.iter());

            if roll {
                match filter::roll(&hits, &mut rand::thread_rng()) {
                    Some(hero) => display_rolled_hero(hero, hits.len()),
                    None => display_warning("No heroes match your filters."),
                }
            } else {
                display_heroes(&hits, roster.len());
            }
        }

        Commands::Hero { name } => {
            let hero = find_hero(&roster, &name)?;
            display_hero_detail(hero, &roster);
        }

        Commands::Score { hero, enemy } => {
            let candidate = find_hero(&roster, &hero)?;
            let enemies = roster.find_all(&enemy)?;
            let enemy_ids: Vec<&str> = enemies.iter().map(|h| h.id.as_str()).collect();

            let table = matchups.table(&roster);
            let result = scoring::score(&candidate.id, &enemy_ids, table);
            display_score(candidate, &enemies, &result);
        }

        Commands::Suggest {
            enemy,
            ally,
            role,
            limit,
        } => {
            let mut session = DraftSession::new();
            apply_picks(&mut session, Side::Enemy, &roster.find_all(&enemy)?);
            apply_picks(&mut session, Side::Ally, &roster.find_all(&ally)?);

            let role_filter = HeroFilter {
                role,
                ..HeroFilter::default()
            };
            let pool = role_filter.apply(roster.iter());
            let limit = limit.unwrap_or(config.suggestion_limit);

            let table = matchups.table(&roster);
            let suggestions = CounterRecommender::suggest(
                pool,
                session.enemy_picks(),
                session.ally_picks(),
                table,
                limit,
            );

            let enemies: Vec<&Character> = session
                .enemy_picks()
                .iter()
                .filter_map(|id| roster.get(id))
                .collect();
            display_suggestions(&suggestions, &enemies);
        }

        Commands::Draft { limit } => {
            let limit = limit.unwrap_or(config.suggestion_limit);
            let table = matchups.table(&roster);
            run_draft(&roster, table, limit)?;
        }

        Commands::ExportMatchups { path } => {
            let table = matchups.table(&roster);
            table
                .save(&path)
                .with_context(|| format!("could not export matchups to {}", path.display()))?;
            display_success(&format!(
                "Wrote {} matchups to {}",
                table.len(),
                path.display()
            ));
        }
    }

    Ok(())
}

fn find_hero<'a>(roster: &'a Roster, query: &str) -> Result<&'a Character, AppError> {
    roster
        .find(query)
        .ok_or_else(|| AppError::HeroNotFound(query.to_string()))
}

fn apply_picks(session: &mut DraftSession, side: Side, heroes: &[&Character]) {
    for hero in heroes {
        if !session.add_pick(side, hero) {
            display_warning(&format!(
                "Skipping {} for the {} side (already picked or team full)",
                hero.name, side
            ));
        }
    }
}

fn load_roster(
    config: &Config,
    catalog_file: Option<&Path>,
    refresh: bool,
    meta: &MetaLayer,
) -> Result<Roster, AppError> {
    if let Some(path) = catalog_file {
        let source = FileSource::new(path);
        display_info(&format!("Reading heroes from {}", source.describe()));
        return Roster::from_catalog(&source.fetch()?, meta);
    }

    let client = CatalogClient::new(config.catalog_url.clone());
    let source_name = client.describe();

    if !refresh {
        match CatalogCache::load(&config.data_dir) {
            Ok(Some(cached)) if cached.is_usable_for(&source_name, config.cache_max_age_mins) => {
                display_success("⚡ Using cached hero catalog");
                return Roster::from_catalog(&cached.payload, meta);
            }
            Ok(_) => debug!("no fresh catalog cache"),
            Err(e) => warn!(error = %e, "ignoring unreadable catalog cache"),
        }
    }

    display_info(&format!("Fetching heroes from {}", source_name));
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Fetching hero catalog");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let fetched = client.fetch();
    spinner.finish_and_clear();

    let payload = fetched?;
    // validate before anything is written to disk
    let roster = Roster::from_catalog(&payload, meta)?;

    if let Err(e) = CatalogCache::new(&source_name, payload).save(&config.data_dir) {
        warn!(error = %e, "could not cache hero catalog");
    }

    Ok(roster)
}

fn run_draft(roster: &Roster, table: &MatchupTable, limit: usize) -> Result<()> {
    let mut board = DraftBoard::new(roster, table, limit);
    display_draft_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("draft> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("could not read from stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command.to_ascii_lowercase().as_str() {
            "enemy" | "ally" => {
                let side = if command.eq_ignore_ascii_case("enemy") {
                    Side::Enemy
                } else {
                    Side::Ally
                };
                match roster.find(rest) {
                    Some(hero) => {
                        if !board.add_pick(side, hero) {
                            display_warning(&format!(
                                "{} is already picked or the {} team is full",
                                hero.name, side
                            ));
                        }
                    }
                    None => {
                        display_warning(&format!("Hero not found: {}", rest));
                        continue;
                    }
                }
            }
            "remove" | "rm" => {
                let (side, name) = rest.split_once(' ').unwrap_or((rest, ""));
                let Ok(side) = side.parse::<Side>() else {
                    display_warning(&format!("Unknown side '{}', use enemy or ally", side));
                    continue;
                };
                match roster.find(name) {
                    Some(hero) => {
                        if !board.remove_pick(side, &hero.id) {
                            display_warning(&format!("{} is not on the {} team", hero.name, side));
                        }
                    }
                    None => {
                        display_warning(&format!("Hero not found: {}", name));
                        continue;
                    }
                }
            }
            "search" => board.set_search(rest),
            "reset" => board.reset(),
            "show" => {}
            "help" | "?" => {
                display_draft_help();
                continue;
            }
            "quit" | "exit" | "q" => break,
            other => {
                display_warning(&format!("Unknown command '{}', type help", other));
                continue;
            }
        }

        display_draft_board(&board);
    }

    Ok(())
}

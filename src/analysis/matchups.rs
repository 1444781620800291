use crate::error::AppError;
use crate::roster::character::Role;
use crate::roster::Roster;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const MIN_GENERATED_WIN_RATE: f64 = 35.0;
pub const MAX_GENERATED_WIN_RATE: f64 = 65.0;
const PERTURBATION: i32 = 3;
const MIN_GAMES: u32 = 1000;
const MAX_GAMES: u32 = 10999;

/// How `subject` fares when played against `opponent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    #[serde(rename = "heroId")]
    pub subject: String,
    #[serde(rename = "vsHeroId")]
    pub opponent: String,
    pub win_rate: f64,
    pub games: u32,
}

impl Matchup {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.subject == self.opponent {
            return Err(AppError::InvalidMatchup(format!(
                "self matchup for hero '{}'",
                self.subject
            )));
        }
        if !(0.0..=100.0).contains(&self.win_rate) {
            return Err(AppError::InvalidMatchup(format!(
                "{} vs {}: win rate {} outside 0..=100",
                self.subject, self.opponent, self.win_rate
            )));
        }
        if self.games == 0 {
            return Err(AppError::InvalidMatchup(format!(
                "{} vs {}: zero games",
                self.subject, self.opponent
            )));
        }
        Ok(())
    }
}

/// Signed advantage of one primary role over another, in win-rate points.
/// Not anti-symmetric: Tank vs Support is +2 while Support vs Tank is 0.
pub fn role_advantage(role: Role, opponent: Role) -> i32 {
    use Role::*;
    match (role, opponent) {
        (Assassin, Marksman) => 8,
        (Assassin, Mage) => 5,
        (Assassin, Support) => 3,
        (Assassin, Fighter) => -2,
        (Assassin, Tank) => -5,

        (Fighter, Assassin) => 3,
        (Fighter, Tank) => 2,
        (Fighter, Support) => 0,
        (Fighter, Mage) => -2,
        (Fighter, Marksman) => -3,

        (Tank, Assassin) => 5,
        (Tank, Fighter) => -2,
        (Tank, Mage) => -3,
        (Tank, Marksman) => -4,
        (Tank, Support) => 2,

        (Mage, Fighter) => 3,
        (Mage, Tank) => 4,
        (Mage, Marksman) => 2,
        (Mage, Support) => 0,
        (Mage, Assassin) => -5,

        (Marksman, Fighter) => 4,
        (Marksman, Tank) => 5,
        (Marksman, Support) => 3,
        (Marksman, Mage) => -1,
        (Marksman, Assassin) => -8,

        (Support, Tank) => 0,
        (Support, Fighter) => 0,
        (Support, Mage) => 0,
        (Support, Marksman) => -2,
        (Support, Assassin) => -3,

        _ => 0,
    }
}

/// subject id -> opponent id -> matchup. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchupTable {
    rows: HashMap<String, HashMap<String, Matchup>>,
}

impl MatchupTable {
    /// Synthetic table from the role heuristic: every ordered pair of
    /// distinct heroes gets one entry.
    pub fn generate<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> Self {
        let mut rows = HashMap::with_capacity(roster.len());

        for hero in roster.iter() {
            let hero_role = hero.primary_role_class();
            let mut row = HashMap::with_capacity(roster.len().saturating_sub(1));

            for opponent in roster.iter() {
                if hero.id == opponent.id {
                    continue;
                }

                let base = match (hero_role, opponent.primary_role_class()) {
                    (Some(a), Some(b)) => role_advantage(a, b),
                    _ => 0,
                };
                let perturbation = rng.gen_range(-PERTURBATION..=PERTURBATION);
                let win_rate = (50.0 + f64::from(base + perturbation))
                    .clamp(MIN_GENERATED_WIN_RATE, MAX_GENERATED_WIN_RATE);
                let games = rng.gen_range(MIN_GAMES..=MAX_GAMES);

                row.insert(
                    opponent.id.clone(),
                    Matchup {
                        subject: hero.id.clone(),
                        opponent: opponent.id.clone(),
                        win_rate,
                        games,
                    },
                );
            }

            rows.insert(hero.id.clone(), row);
        }

        let table = MatchupTable { rows };
        debug!(heroes = roster.len(), matchups = table.len(), "generated matchup table");
        table
    }

    /// Builds a table from externally supplied statistics, rejecting any
    /// invalid or duplicated record.
    pub fn from_matchups(matchups: Vec<Matchup>) -> Result<Self, AppError> {
        let mut rows: HashMap<String, HashMap<String, Matchup>> = HashMap::new();

        for matchup in matchups {
            matchup.validate()?;
            let row = rows.entry(matchup.subject.clone()).or_default();
            if row.contains_key(&matchup.opponent) {
                return Err(AppError::InvalidMatchup(format!(
                    "duplicate matchup {} vs {}",
                    matchup.subject, matchup.opponent
                )));
            }
            row.insert(matchup.opponent.clone(), matchup);
        }

        Ok(MatchupTable { rows })
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::InvalidMatchup(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let matchups: Vec<Matchup> = serde_json::from_str(&content)
            .map_err(|e| AppError::JsonError(format!("Failed to parse matchups: {}", e)))?;
        let table = Self::from_matchups(matchups)?;
        info!(path = %path.display(), matchups = table.len(), "loaded matchup statistics");
        Ok(table)
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(&self.matchups())
            .map_err(|e| AppError::JsonError(format!("Failed to serialize matchups: {}", e)))?;
        fs::write(path, json).map_err(|e| {
            AppError::CacheError(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    #[allow(dead_code)]
    pub fn get(&self, subject: &str, opponent: &str) -> Option<&Matchup> {
        self.rows.get(subject).and_then(|row| row.get(opponent))
    }

    pub fn row(&self, subject: &str) -> Option<&HashMap<String, Matchup>> {
        self.rows.get(subject)
    }

    pub fn contains_subject(&self, subject: &str) -> bool {
        self.rows.contains_key(subject)
    }

    /// Total number of directed matchups.
    pub fn len(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All matchups, sorted by (subject, opponent) for stable output.
    pub fn matchups(&self) -> Vec<&Matchup> {
        let mut all: Vec<&Matchup> = self.rows.values().flat_map(|row| row.values()).collect();
        all.sort_by(|a, b| (&a.subject, &a.opponent).cmp(&(&b.subject, &b.opponent)));
        all
    }
}

/// Owned cache for the synthetic table. Builds at most once per roster
/// snapshot; `invalidate` forces a rebuild on the next access.
#[derive(Debug, Default)]
pub struct MatchupCache {
    seed: Option<u64>,
    entry: Option<(Vec<String>, MatchupTable)>,
    builds: usize,
}

impl MatchupCache {
    pub fn new(seed: Option<u64>) -> Self {
        MatchupCache {
            seed,
            entry: None,
            builds: 0,
        }
    }

    pub fn get_or_build(&mut self, roster: &Roster) -> &MatchupTable {
        let ids: Vec<String> = roster.iter().map(|h| h.id.clone()).collect();
        if matches!(&self.entry, Some((cached_ids, _)) if *cached_ids != ids) {
            debug!("roster changed, dropping cached matchup table");
            self.entry = None;
        }

        let seed = self.seed;
        let builds = &mut self.builds;
        let (_, table) = self.entry.get_or_insert_with(|| {
            *builds += 1;
            let table = match seed {
                Some(seed) => MatchupTable::generate(roster, &mut StdRng::seed_from_u64(seed)),
                None => MatchupTable::generate(roster, &mut rand::thread_rng()),
            };
            (ids, table)
        });
        table
    }

    #[allow(dead_code)]
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            debug!("matchup cache invalidated");
        }
    }

    #[allow(dead_code)]
    pub fn is_built(&self) -> bool {
        self.entry.is_some()
    }

    /// How many times a table has been generated, for diagnostics.
    #[allow(dead_code)]
    pub fn builds(&self) -> usize {
        self.builds
    }
}

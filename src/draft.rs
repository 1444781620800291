//! Draft session state and the board that keeps suggestions in sync with it.

use crate::analysis::matchups::MatchupTable;
use crate::analysis::recommender::{CounterRecommender, CounterSuggestion};
use crate::roster::character::Character;
use crate::roster::filter::contains_ignore_case;
use crate::roster::Roster;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub const MAX_PICKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Enemy,
    Ally,
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enemy" | "e" => Ok(Side::Enemy),
            "ally" | "a" => Ok(Side::Ally),
            other => Err(format!("unknown side '{}'", other)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Enemy => f.write_str("enemy"),
            Side::Ally => f.write_str("ally"),
        }
    }
}

/// Picks per side, in pick order, plus the search text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftSession {
    enemy: Vec<String>,
    ally: Vec<String>,
    search: String,
}

impl DraftSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn picks(&self, side: Side) -> &[String] {
        match side {
            Side::Enemy => &self.enemy,
            Side::Ally => &self.ally,
        }
    }

    pub fn enemy_picks(&self) -> &[String] {
        &self.enemy
    }

    pub fn ally_picks(&self) -> &[String] {
        &self.ally
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_picked(&self, id: &str) -> bool {
        self.enemy.iter().chain(self.ally.iter()).any(|p| p == id)
    }

    /// Appends `hero` to `side`. No-op when the side is full or the hero is
    /// already on either side. Returns whether anything changed.
    pub fn add_pick(&mut self, side: Side, hero: &Character) -> bool {
        if self.picks(side).len() >= MAX_PICKS || self.is_picked(&hero.id) {
            return false;
        }
        match side {
            Side::Enemy => self.enemy.push(hero.id.clone()),
            Side::Ally => self.ally.push(hero.id.clone()),
        }
        self.search.clear();
        true
    }

    pub fn remove_pick(&mut self, side: Side, id: &str) -> bool {
        let picks = match side {
            Side::Enemy => &mut self.enemy,
            Side::Ally => &mut self.ally,
        };
        let before = picks.len();
        picks.retain(|p| p != id);
        picks.len() != before
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
    }

    pub fn reset(&mut self) {
        self.enemy.clear();
        self.ally.clear();
        self.search.clear();
    }
}

/// Owns a session and recomputes the available heroes and the suggestion
/// list after every mutation.
pub struct DraftBoard<'a> {
    roster: &'a Roster,
    table: &'a MatchupTable,
    limit: usize,
    session: DraftSession,
    available: Vec<&'a Character>,
    suggestions: Vec<CounterSuggestion<'a>>,
}

impl<'a> DraftBoard<'a> {
    pub fn new(roster: &'a Roster, table: &'a MatchupTable, limit: usize) -> Self {
        let mut board = DraftBoard {
            roster,
            table,
            limit,
            session: DraftSession::new(),
            available: Vec::new(),
            suggestions: Vec::new(),
        };
        board.recompute();
        board
    }

    pub fn session(&self) -> &DraftSession {
        &self.session
    }

    /// Heroes that are unpicked and match the search text.
    pub fn available(&self) -> &[&'a Character] {
        &self.available
    }

    pub fn suggestions(&self) -> &[CounterSuggestion<'a>] {
        &self.suggestions
    }

    pub fn picked_heroes(&self, side: Side) -> Vec<&'a Character> {
        self.session
            .picks(side)
            .iter()
            .filter_map(|id| self.roster.get(id))
            .collect()
    }

    pub fn add_pick(&mut self, side: Side, hero: &Character) -> bool {
        let changed = self.session.add_pick(side, hero);
        self.recompute();
        changed
    }

    pub fn remove_pick(&mut self, side: Side, id: &str) -> bool {
        let changed = self.session.remove_pick(side, id);
        self.recompute();
        changed
    }

    pub fn set_search(&mut self, text: &str) {
        self.session.set_search(text);
        self.recompute();
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.recompute();
    }

    fn recompute(&mut self) {
        let session = &self.session;
        self.available = self
            .roster
            .iter()
            .filter(|h| !session.is_picked(&h.id) && contains_ignore_case(&h.name, session.search()))
            .collect();

        self.suggestions = if session.enemy_picks().is_empty() {
            Vec::new()
        } else {
            CounterRecommender::suggest(
                self.roster.iter(),
                session.enemy_picks(),
                session.ally_picks(),
                self.table,
                self.limit,
            )
        };

        debug!(
            enemy = session.enemy_picks().len(),
            ally = session.ally_picks().len(),
            available = self.available.len(),
            suggestions = self.suggestions.len(),
            "draft board recomputed"
        );
    }
}

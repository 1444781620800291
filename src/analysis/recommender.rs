use super::matchups::MatchupTable;
use super::scoring::{self, CounterScore};
use crate::roster::character::Character;
use std::cmp::Ordering;
use std::collections::HashSet;

pub const DEFAULT_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct CounterSuggestion<'a> {
    pub hero: &'a Character,
    pub score: f64,
    pub avg_win_rate_delta: f64,
    pub counters_count: usize,
}

impl<'a> CounterSuggestion<'a> {
    pub fn new(hero: &'a Character, result: CounterScore) -> Self {
        CounterSuggestion {
            hero,
            score: result.score,
            avg_win_rate_delta: result.avg_delta,
            counters_count: result.counters_count,
        }
    }
}

pub struct CounterRecommender;

impl CounterRecommender {
    /// Ranks every candidate in `pool` that neither side has picked yet.
    ///
    /// `pool` is expected to be pre-filtered by the caller (role filters and
    /// the like); no classification filtering happens here. Returns nothing
    /// at all while the enemy side is empty. Ties keep pool order.
    pub fn suggest<'a, I, S>(
        pool: I,
        enemy_ids: &[S],
        ally_ids: &[S],
        table: &MatchupTable,
        limit: usize,
    ) -> Vec<CounterSuggestion<'a>>
    where
        I: IntoIterator<Item = &'a Character>,
        S: AsRef<str>,
    {
        if enemy_ids.is_empty() {
            return Vec::new();
        }

        let picked: HashSet<&str> = enemy_ids
            .iter()
            .chain(ally_ids.iter())
            .map(|id| id.as_ref())
            .collect();

        let mut suggestions: Vec<CounterSuggestion<'a>> = pool
            .into_iter()
            .filter(|hero| !picked.contains(hero.id.as_str()))
            .map(|hero| CounterSuggestion::new(hero, scoring::score(&hero.id, enemy_ids, table)))
            .collect();

        // sort_by is stable
        suggestions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        suggestions.truncate(limit);

        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::test_support::roster;
    use crate::roster::Roster;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_roster() -> Roster {
        roster(&[
            ("1", "Saber", "Assassin"),
            ("2", "Miya", "Marksman"),
            ("3", "Tigreal", "Tank"),
            ("4", "Eudora", "Mage"),
            ("5", "Balmond", "Fighter"),
            ("6", "Rafaela", "Support"),
            ("7", "Layla", "Marksman"),
            ("8", "Nana", "Mage"),
            ("9", "Zilong", "Fighter/Assassin"),
            ("10", "Franco", "Tank"),
        ])
    }

    fn sample_table(roster: &Roster) -> MatchupTable {
        MatchupTable::generate(roster, &mut StdRng::seed_from_u64(2024))
    }

    #[test]
    fn test_empty_enemy_side_returns_nothing() {
        let roster = sample_roster();
        let table = sample_table(&roster);
        let none: Vec<String> = Vec::new();
        let allies = vec!["1".to_string()];

        let suggestions = CounterRecommender::suggest(roster.iter(), &none, &allies, &table, 8);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_excludes_picked_heroes() {
        let roster = sample_roster();
        let table = sample_table(&roster);
        let enemies = vec!["2", "7"];
        let allies = vec!["3"];

        let suggestions = CounterRecommender::suggest(roster.iter(), &enemies, &allies, &table, 20);
        assert_eq!(suggestions.len(), roster.len() - 3);
        for s in &suggestions {
            assert!(!["2", "7", "3"].contains(&s.hero.id.as_str()));
        }
    }

    #[test]
    fn test_sorted_descending_and_truncated() {
        let roster = sample_roster();
        let table = sample_table(&roster);
        let enemies = vec!["2", "4", "6"];
        let allies: Vec<&str> = Vec::new();

        let suggestions = CounterRecommender::suggest(roster.iter(), &enemies, &allies, &table, 4);
        assert_eq!(suggestions.len(), 4);
        for pair in suggestions.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_length_bounded_by_available_pool() {
        let roster = sample_roster();
        let table = sample_table(&roster);
        let enemies = vec!["1", "2", "3", "4", "5"];
        let allies = vec!["6", "7", "8"];

        let suggestions = CounterRecommender::suggest(roster.iter(), &enemies, &allies, &table, 10);
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_scores_match_scoring_engine() {
        let roster = sample_roster();
        let table = sample_table(&roster);
        let enemies = vec!["1", "5"];
        let allies: Vec<&str> = Vec::new();

        for s in CounterRecommender::suggest(roster.iter(), &enemies, &allies, &table, 10) {
            let direct = scoring::score(&s.hero.id, &enemies, &table);
            assert_eq!(s.score, direct.score);
            assert_eq!(s.avg_win_rate_delta, direct.avg_delta);
            assert_eq!(s.counters_count, direct.counters_count);
        }
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let roster = sample_roster();
        // empty table: every candidate scores zero
        let table = MatchupTable::default();
        let enemies = vec!["1"];
        let allies: Vec<&str> = Vec::new();

        let ids: Vec<String> = CounterRecommender::suggest(roster.iter(), &enemies, &allies, &table, 3)
            .iter()
            .map(|s| s.hero.id.clone())
            .collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_respects_pre_filtered_pool() {
        let roster = sample_roster();
        let table = sample_table(&roster);
        let enemies = vec!["1"];
        let allies: Vec<&str> = Vec::new();
        let mages = roster.iter().filter(|h| h.primary_role() == "Mage");

        let suggestions = CounterRecommender::suggest(mages, &enemies, &allies, &table, 10);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| s.hero.primary_role() == "Mage"));
    }
}

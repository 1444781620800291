use super::character::{Character, Tier};
use rand::seq::SliceRandom;
use rand::Rng;

/// Browse filters. Role and lane match anywhere in the composite string,
/// so "Assassin" also matches a "Fighter/Assassin" hero.
#[derive(Debug, Clone, Default)]
pub struct HeroFilter {
    pub search: Option<String>,
    pub role: Option<String>,
    pub lane: Option<String>,
    pub tier: Option<Tier>,
    pub utility: Option<String>,
}

impl HeroFilter {
    pub fn matches(&self, hero: &Character) -> bool {
        let matches_search = self
            .search
            .as_deref()
            .map_or(true, |s| contains_ignore_case(&hero.name, s));
        let matches_role = self
            .role
            .as_deref()
            .map_or(true, |r| contains_ignore_case(&hero.role, r));
        let matches_lane = self
            .lane
            .as_deref()
            .map_or(true, |l| contains_ignore_case(&hero.lane, l));
        let matches_tier = self.tier.map_or(true, |t| hero.tier == t);
        let matches_utility = self.utility.as_deref().map_or(true, |u| {
            hero.utility.iter().any(|tag| tag.eq_ignore_ascii_case(u.trim()))
        });

        matches_search && matches_role && matches_lane && matches_tier && matches_utility
    }

    pub fn apply<'a, I>(&self, heroes: I) -> Vec<&'a Character>
    where
        I: IntoIterator<Item = &'a Character>,
    {
        heroes.into_iter().filter(|h| self.matches(h)).collect()
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

/// Picks one hero at random from an already filtered list.
pub fn roll<'a, R: Rng + ?Sized>(heroes: &[&'a Character], rng: &mut R) -> Option<&'a Character> {
    heroes.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::test_support::hero;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Vec<Character> {
        let mut chou = hero("1", "Chou", "Fighter/Assassin");
        chou.lane = "EXP Lane/Roaming".to_string();
        chou.tier = Tier::S;
        chou.utility = vec!["CC".to_string(), "Burst".to_string()];

        let mut miya = hero("2", "Miya", "Marksman");
        miya.lane = "Gold Lane".to_string();

        let mut ling = hero("3", "Ling", "Assassin");
        ling.lane = "Jungling".to_string();
        ling.tier = Tier::S;

        vec![chou, miya, ling]
    }

    #[test]
    fn test_default_filter_matches_everything() {
        let heroes = sample();
        assert_eq!(HeroFilter::default().apply(&heroes).len(), 3);
    }

    #[test]
    fn test_role_matches_any_segment() {
        let heroes = sample();
        let filter = HeroFilter {
            role: Some("assassin".to_string()),
            ..HeroFilter::default()
        };
        let names: Vec<_> = filter.apply(&heroes).iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Chou", "Ling"]);
    }

    #[test]
    fn test_combined_filters() {
        let heroes = sample();
        let filter = HeroFilter {
            search: Some("ch".to_string()),
            lane: Some("Roaming".to_string()),
            tier: Some(Tier::S),
            utility: Some("cc".to_string()),
            ..HeroFilter::default()
        };
        let hits = filter.apply(&heroes);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Chou");

        let none = HeroFilter {
            tier: Some(Tier::C),
            ..HeroFilter::default()
        };
        assert!(none.apply(&heroes).is_empty());
    }

    #[test]
    fn test_roll_picks_from_pool() {
        let heroes = sample();
        let pool: Vec<&Character> = heroes.iter().collect();
        let mut rng = StdRng::seed_from_u64(7);
        let picked = roll(&pool, &mut rng).unwrap();
        assert!(heroes.iter().any(|h| h.id == picked.id));
        assert!(roll(&[], &mut rng).is_none());
    }
}

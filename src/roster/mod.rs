pub mod character;
pub mod filter;
pub mod meta;

use crate::api::models::{HeroDto, HeroesResponse};
use crate::error::AppError;
use character::Character;
use meta::MetaLayer;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Validated, read-only hero roster.
#[derive(Debug, Clone)]
pub struct Roster {
    heroes: Vec<Character>,
}

impl Roster {
    /// Wraps already-built characters, rejecting duplicate ids.
    pub fn new(heroes: Vec<Character>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for hero in &heroes {
            if !seen.insert(hero.id.as_str()) {
                return Err(AppError::InvalidCatalog(format!(
                    "duplicate hero id '{}'",
                    hero.id
                )));
            }
        }
        Ok(Roster { heroes })
    }

    /// Validates a catalog payload and builds the roster. Any malformed
    /// record rejects the whole payload.
    pub fn from_catalog(response: &HeroesResponse, meta: &MetaLayer) -> Result<Self, AppError> {
        if !response.success {
            return Err(AppError::InvalidCatalog(
                "catalog reported success=false".to_string(),
            ));
        }
        if response.data.is_empty() {
            return Err(AppError::InvalidCatalog("catalog is empty".to_string()));
        }

        let mut heroes = Vec::with_capacity(response.data.len());
        for dto in &response.data {
            validate_dto(dto)?;
            heroes.push(meta.build_character(dto)?);
        }

        let mut names = HashSet::new();
        for hero in &heroes {
            if !names.insert(hero.name.to_lowercase()) {
                warn!(name = %hero.name, "duplicate hero name, by-name lookups use the first entry");
            }
        }

        debug!(heroes = heroes.len(), meta_entries = meta.len(), "roster validated");
        Roster::new(heroes)
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.heroes.iter()
    }

    #[allow(dead_code)]
    pub fn ids(&self) -> Vec<&str> {
        self.heroes.iter().map(|h| h.id.as_str()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Character> {
        self.heroes.iter().find(|h| h.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Character> {
        let name = name.trim();
        self.heroes.iter().find(|h| h.name.eq_ignore_ascii_case(name))
    }

    /// Looks a hero up by id first, then by display name.
    pub fn find(&self, query: &str) -> Option<&Character> {
        self.get(query.trim()).or_else(|| self.find_by_name(query))
    }

    pub fn find_all<S: AsRef<str>>(&self, queries: &[S]) -> Result<Vec<&Character>, AppError> {
        queries
            .iter()
            .map(|q| {
                self.find(q.as_ref())
                    .ok_or_else(|| AppError::HeroNotFound(q.as_ref().to_string()))
            })
            .collect()
    }

    /// Resolves free-text cross references (counters, synergies). These are
    /// stored by name, names that match nobody are dropped.
    pub fn resolve_names(&self, names: &[String]) -> Vec<&Character> {
        names
            .iter()
            .filter_map(|name| self.find_by_name(name))
            .collect()
    }
}

fn validate_dto(dto: &HeroDto) -> Result<(), AppError> {
    if dto.id.trim().is_empty() {
        return Err(AppError::InvalidCatalog(format!(
            "hero '{}' has an empty id",
            dto.hero_name
        )));
    }
    if dto.hero_name.trim().is_empty() {
        return Err(AppError::InvalidCatalog(format!(
            "hero {} has an empty name",
            dto.id
        )));
    }
    if dto.role.trim().is_empty() {
        return Err(AppError::InvalidCatalog(format!(
            "hero '{}' has no role",
            dto.hero_name
        )));
    }
    match url::Url::parse(&dto.icon) {
        Ok(icon) if icon.scheme() == "http" || icon.scheme() == "https" => Ok(()),
        _ => Err(AppError::InvalidCatalog(format!(
            "hero '{}' has an invalid icon url '{}'",
            dto.hero_name, dto.icon
        ))),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{dto, roster};
    use super::*;

    fn response(data: Vec<HeroDto>) -> HeroesResponse {
        HeroesResponse {
            success: true,
            data,
        }
    }

    #[test]
    fn test_from_catalog_builds_roster() {
        let payload = response(vec![dto("1", "Miya", "Marksman"), dto("2", "Tigreal", "Tank")]);
        let roster = Roster::from_catalog(&payload, &MetaLayer::default()).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.ids(), vec!["1", "2"]);
    }

    #[test]
    fn test_rejects_unsuccessful_payload() {
        let mut payload = response(vec![dto("1", "Miya", "Marksman")]);
        payload.success = false;
        assert!(matches!(
            Roster::from_catalog(&payload, &MetaLayer::default()),
            Err(AppError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_rejects_empty_payload() {
        assert!(Roster::from_catalog(&response(vec![]), &MetaLayer::default()).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let payload = response(vec![dto("1", "Miya", "Marksman"), dto("1", "Layla", "Marksman")]);
        assert!(matches!(
            Roster::from_catalog(&payload, &MetaLayer::default()),
            Err(AppError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_rejects_bad_icon_and_blank_fields() {
        let mut bad_icon = dto("1", "Miya", "Marksman");
        bad_icon.icon = "not a url".to_string();
        let mut blank_role = dto("2", "Tigreal", "Tank");
        blank_role.role = "  ".to_string();
        let blank_id = dto(" ", "Nana", "Mage");

        for bad in [bad_icon, blank_role, blank_id] {
            let result = Roster::from_catalog(&response(vec![bad]), &MetaLayer::default());
            assert!(matches!(result, Err(AppError::InvalidCatalog(_))));
        }
    }

    #[test]
    fn test_one_bad_record_rejects_everything() {
        let mut bad = dto("3", "Eudora", "Mage");
        bad.difficulty = Some(9);
        let payload = response(vec![dto("1", "Miya", "Marksman"), bad]);
        assert!(Roster::from_catalog(&payload, &MetaLayer::default()).is_err());
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        let roster = roster(&[("1", "Miya", "Marksman"), ("2", "Yu Zhong", "Fighter")]);
        assert_eq!(roster.find("2").map(|h| h.name.as_str()), Some("Yu Zhong"));
        assert_eq!(roster.find("yu zhong").map(|h| h.id.as_str()), Some("2"));
        assert!(roster.find("Layla").is_none());

        let err = roster.find_all(&["Miya", "Layla"]).unwrap_err();
        assert!(matches!(err, AppError::HeroNotFound(name) if name == "Layla"));
    }

    #[test]
    fn test_resolve_names_drops_unknown() {
        let roster = roster(&[("1", "Miya", "Marksman"), ("2", "Saber", "Assassin")]);
        let names = vec!["saber".to_string(), "Renamed Hero".to_string()];
        let resolved = roster.resolve_names(&names);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "2");
    }
}

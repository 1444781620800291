//! Pro meta layer: optional tier/difficulty/utility data merged onto the
//! base catalog record.
//!
//! Resolution order for every field is: meta file entry (keyed by hero
//! name), then the catalog's inline value, then the documented default.

use super::character::{Character, Tier};
use crate::api::models::HeroDto;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const DEFAULT_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 3;
pub const DEFAULT_UTILITY: &str = "General";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroMeta {
    #[serde(default)]
    pub tier: Option<Tier>,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub utility: Option<Vec<String>>,
    #[serde(default, rename = "coreItems")]
    pub core_items: Option<Vec<String>>,
    #[serde(default)]
    pub counters: Option<Vec<String>>,
    #[serde(default)]
    pub synergies: Option<Vec<String>>,
}

impl HeroMeta {
    fn inline(dto: &HeroDto) -> Self {
        HeroMeta {
            tier: dto.tier,
            difficulty: dto.difficulty,
            utility: dto.utility.clone(),
            core_items: dto.core_items.clone(),
            counters: dto.counters.clone(),
            synergies: dto.synergies.clone(),
        }
    }

    /// Fields set on `self` win over `base`.
    fn over(self, base: HeroMeta) -> HeroMeta {
        HeroMeta {
            tier: self.tier.or(base.tier),
            difficulty: self.difficulty.or(base.difficulty),
            utility: self.utility.or(base.utility),
            core_items: self.core_items.or(base.core_items),
            counters: self.counters.or(base.counters),
            synergies: self.synergies.or(base.synergies),
        }
    }
}

/// Meta overrides keyed by hero display name.
#[derive(Debug, Clone, Default)]
pub struct MetaLayer {
    entries: HashMap<String, HeroMeta>,
}

impl MetaLayer {
    #[allow(dead_code)]
    pub fn new(entries: HashMap<String, HeroMeta>) -> Self {
        MetaLayer { entries }
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!("Failed to read meta file {}: {}", path.display(), e))
        })?;
        let entries: HashMap<String, HeroMeta> = serde_json::from_str(&content)
            .map_err(|e| AppError::JsonError(format!("Failed to parse meta file: {}", e)))?;
        Ok(MetaLayer { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, hero_name: &str) -> Option<&HeroMeta> {
        self.entries.get(hero_name)
    }

    /// Two-stage construction: base record from the catalog, then the
    /// meta pass with defaults for whatever is still missing.
    pub fn build_character(&self, dto: &HeroDto) -> Result<Character, AppError> {
        let inline = HeroMeta::inline(dto);
        let meta = match self.get(&dto.hero_name) {
            Some(file_meta) => file_meta.clone().over(inline),
            None => inline,
        };

        let difficulty = meta.difficulty.unwrap_or(DEFAULT_DIFFICULTY);
        if !(1..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(AppError::InvalidCatalog(format!(
                "hero '{}' has difficulty {} outside 1..={}",
                dto.hero_name, difficulty, MAX_DIFFICULTY
            )));
        }

        Ok(Character {
            id: dto.id.clone(),
            name: dto.hero_name.clone(),
            title: dto.hero_title.clone(),
            icon: dto.icon.clone(),
            role: dto.role.clone(),
            specialty: dto.specialty.clone(),
            lane: dto.lane_recommendation.clone(),
            tier: meta.tier.unwrap_or(Tier::BASELINE),
            difficulty,
            utility: meta
                .utility
                .unwrap_or_else(|| vec![DEFAULT_UTILITY.to_string()]),
            core_items: meta.core_items.unwrap_or_default(),
            counters: meta.counters.unwrap_or_default(),
            synergies: meta.synergies.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::test_support::dto;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults_without_any_meta() {
        let layer = MetaLayer::default();
        let hero = layer.build_character(&dto("1", "Miya", "Marksman")).unwrap();

        assert_eq!(hero.tier, Tier::B);
        assert_eq!(hero.difficulty, 1);
        assert_eq!(hero.utility, vec!["General".to_string()]);
        assert!(hero.counters.is_empty());
        assert!(hero.core_items.is_empty());
    }

    #[test]
    fn test_inline_meta_is_kept() {
        let mut raw = dto("2", "Balmond", "Fighter");
        raw.tier = Some(Tier::A);
        raw.counters = Some(vec!["Miya".to_string()]);

        let hero = MetaLayer::default().build_character(&raw).unwrap();
        assert_eq!(hero.tier, Tier::A);
        assert_eq!(hero.counters, vec!["Miya".to_string()]);
    }

    #[test]
    fn test_file_meta_overrides_inline() {
        let mut raw = dto("3", "Saber", "Assassin");
        raw.tier = Some(Tier::C);
        raw.difficulty = Some(2);

        let mut entries = HashMap::new();
        entries.insert(
            "Saber".to_string(),
            HeroMeta {
                tier: Some(Tier::SPlus),
                utility: Some(vec!["Burst".to_string(), "CC".to_string()]),
                ..HeroMeta::default()
            },
        );
        let hero = MetaLayer::new(entries).build_character(&raw).unwrap();

        assert_eq!(hero.tier, Tier::SPlus);
        // untouched by the file, falls back to inline
        assert_eq!(hero.difficulty, 2);
        assert_eq!(hero.utility, vec!["Burst".to_string(), "CC".to_string()]);
    }

    #[test]
    fn test_rejects_out_of_range_difficulty() {
        let mut raw = dto("4", "Alucard", "Fighter");
        raw.difficulty = Some(4);
        let err = MetaLayer::default().build_character(&raw).unwrap_err();
        assert!(matches!(err, AppError::InvalidCatalog(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Tigreal": {{"tier": "S", "difficulty": 1, "utility": ["CC", "Initiator"]}}}}"#
        )
        .unwrap();

        let layer = MetaLayer::load(file.path()).unwrap();
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.get("Tigreal").and_then(|m| m.tier), Some(Tier::S));
    }
}

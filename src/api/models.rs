use crate::roster::character::Tier;
use serde::{Deserialize, Serialize};

// Catalog response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroesResponse {
    pub success: bool,
    pub data: Vec<HeroDto>,
}

// One catalog hero, including the optional pro meta layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroDto {
    pub id: String,
    pub icon: String,
    pub hero_name: String,
    pub hero_title: String,
    pub hero_order: String,
    pub role: String,
    pub specialty: String,
    pub lane_recommendation: String,
    pub region_of_origin: String,
    pub bp_price: Option<String>,
    pub diamond_price: String,
    pub release_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utility: Option<Vec<String>>,
    #[serde(default, rename = "coreItems", skip_serializing_if = "Option::is_none")]
    pub core_items: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counters: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synergies: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_catalog_payload() {
        let body = r#"{
            "success": true,
            "data": [{
                "id": "1",
                "icon": "https://example.com/miya.png",
                "hero_name": "Miya",
                "hero_title": "Moonlight Archer",
                "hero_order": "1",
                "role": "Marksman",
                "specialty": "Finisher/Damage",
                "lane_recommendation": "Gold Lane",
                "region_of_origin": "Azrya Woodland",
                "bp_price": null,
                "diamond_price": "399",
                "release_date": "2016",
                "tier": "S+",
                "coreItems": ["Windtalker"]
            }]
        }"#;

        let response: HeroesResponse = serde_json::from_str(body).unwrap();
        assert!(response.success);
        let miya = &response.data[0];
        assert_eq!(miya.hero_name, "Miya");
        assert_eq!(miya.tier, Some(Tier::SPlus));
        assert_eq!(miya.core_items.as_deref(), Some(&["Windtalker".to_string()][..]));
        assert!(miya.bp_price.is_none());
        assert!(miya.counters.is_none());
    }

    #[test]
    fn test_rejects_missing_required_field() {
        let body = r#"{"success": true, "data": [{"id": "1", "hero_name": "Miya"}]}"#;
        assert!(serde_json::from_str::<HeroesResponse>(body).is_err());
    }

    #[test]
    fn test_rejects_unknown_tier() {
        let body = r#"{"success": true, "data": [{
            "id": "1", "icon": "https://example.com/a.png", "hero_name": "A",
            "hero_title": "", "hero_order": "1", "role": "Tank", "specialty": "",
            "lane_recommendation": "Roaming", "region_of_origin": "", "bp_price": null,
            "diamond_price": "0", "release_date": "", "tier": "D"
        }]}"#;
        assert!(serde_json::from_str::<HeroesResponse>(body).is_err());
    }
}

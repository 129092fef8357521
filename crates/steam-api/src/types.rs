//! Wire types for the Steam Web API and storefront responses.

use serde::{Deserialize, Serialize};

/// One title from `IPlayerService/GetOwnedGames`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedGame {
    #[serde(rename = "appid")]
    pub app_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub playtime_forever: u32,
    #[serde(default)]
    pub rtime_last_played: i64,
}

/// Envelope of the `GetOwnedGames` response.
#[derive(Debug, Deserialize)]
pub(crate) struct OwnedGamesEnvelope {
    pub response: OwnedGamesBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OwnedGamesBody {
    #[serde(default)]
    pub games: Vec<OwnedGame>,
}

/// One title from the family-sharing API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyApp {
    #[serde(rename = "appid")]
    pub app_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub owner_steamids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FamilyEnvelope {
    pub response: FamilyBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct FamilyBody {
    #[serde(default)]
    pub apps: Vec<FamilyApp>,
}

/// Storefront metadata from the `appdetails` endpoint.
///
/// Only the fields the enrichment pipeline consumes; the upstream payload
/// carries far more.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub header_image: String,
    #[serde(default)]
    pub developers: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    #[serde(default)]
    pub genres: Vec<DescribedTag>,
    #[serde(default)]
    pub categories: Vec<DescribedTag>,
    #[serde(default)]
    pub supported_languages: String,
    #[serde(default)]
    pub pc_requirements: Requirements,
}

/// A genre or category: numeric-or-string id plus display text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescribedTag {
    #[serde(default)]
    pub description: String,
}

/// Minimum/recommended requirement blocks (free-form HTML text).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub minimum: String,
    #[serde(default)]
    pub recommended: String,
}

impl StoreDetails {
    /// Concatenates the free-text fields used for keyword classification.
    pub fn classification_text(&self) -> String {
        let mut text = String::with_capacity(
            self.name.len()
                + self.short_description.len()
                + self.pc_requirements.minimum.len()
                + self.pc_requirements.recommended.len()
                + 3,
        );
        text.push_str(&self.name);
        text.push(' ');
        text.push_str(&self.short_description);
        text.push(' ');
        text.push_str(&self.pc_requirements.minimum);
        text.push(' ');
        text.push_str(&self.pc_requirements.recommended);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_game_parses_steam_field_names() {
        let json = r#"{"appid":620,"name":"Portal 2","playtime_forever":512,"rtime_last_played":1700000000}"#;
        let game: OwnedGame = serde_json::from_str(json).unwrap();
        assert_eq!(game.app_id, 620);
        assert_eq!(game.playtime_forever, 512);
    }

    #[test]
    fn owned_game_defaults_missing_fields() {
        let game: OwnedGame = serde_json::from_str(r#"{"appid":10}"#).unwrap();
        assert_eq!(game.name, "");
        assert_eq!(game.rtime_last_played, 0);
    }

    #[test]
    fn store_details_tolerates_partial_payload() {
        let json = r#"{"name":"Portal 2","genres":[{"id":"1","description":"Puzzle"}]}"#;
        let details: StoreDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.genres[0].description, "Puzzle");
        assert!(details.categories.is_empty());
    }

    #[test]
    fn classification_text_concatenates_fields() {
        let details = StoreDetails {
            name: "Some Game".into(),
            short_description: "Made with Unity".into(),
            pc_requirements: Requirements {
                minimum: "DirectX 11".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let text = details.classification_text();
        assert!(text.contains("Some Game"));
        assert!(text.contains("Made with Unity"));
        assert!(text.contains("DirectX 11"));
    }
}

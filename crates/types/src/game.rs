use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Storefront a game belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Steam,
    Epic,
    Gog,
}

impl Platform {
    /// Returns the canonical name used in the database `platform` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Steam => "steam",
            Platform::Epic => "epic",
            Platform::Gog => "gog",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "steam" => Ok(Platform::Steam),
            "epic" => Ok(Platform::Epic),
            "gog" => Ok(Platform::Gog),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

/// A title in the user's library after enrichment.
///
/// This is the pipeline's output record: remote catalog data merged with
/// local installation state and heuristic classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryGame {
    pub app_id: u32,
    pub title: String,
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_path: Option<String>,
    pub installed: bool,
    pub shared: bool,
    pub vr: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "is_zero_i64")]
    pub last_played: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl LibraryGame {
    /// Builds the minimal record used when enrichment is unavailable.
    pub fn minimal(app_id: u32, title: impl Into<String>) -> Self {
        Self {
            app_id,
            title: title.into(),
            platform: Platform::Steam,
            install_path: None,
            installed: false,
            shared: false,
            vr: false,
            engine: None,
            last_played: 0,
            short_description: String::new(),
            genres: Vec::new(),
            categories: Vec::new(),
        }
    }
}

fn is_zero_i64(v: &i64) -> bool {
    *v == 0
}

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// Lifecycle status of a card. Only `Active` is written today; the enum
/// exists so new states can be added without a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Active,
}

impl CardStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
        }
    }
}

impl std::str::FromStr for CardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            other => Err(format!("unknown card status: {other}")),
        }
    }
}

/// One issued card and its configuration state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i32,

    /// 8-character uppercase alphanumeric code shown to end users.
    /// Immutable after creation.
    pub code: String,

    pub status: CardStatus,

    pub created_at: String,

    /// Employee identifier/email that issued the card.
    pub created_by: String,

    /// Absent until the card is configured or used; cleared on reset.
    pub last_used: Option<String>,

    /// Set by the end-user configuration flow; cleared on reset.
    pub owner: Option<String>,

    pub configured: bool,

    pub config: CardConfig,
}

/// End-user profile carried by a card. Replaced wholesale on configure and
/// on reset; never merged field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    pub name: String,
    pub bio: String,
    pub profile_photo: String,
    pub theme_color: String,
    pub links: Vec<CardLink>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            bio: String::new(),
            profile_photo: String::new(),
            theme_color: defaults::THEME_COLOR.to_string(),
            links: Vec::new(),
        }
    }
}

/// Ordered entry in a card's link list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLink {
    pub label: String,
    pub url: String,
}

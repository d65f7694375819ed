//! Domain service for the card lifecycle.
//!
//! Owns creation (unique code + insert), listing, lookup, configuration
//! replacement, reset and deletion of cards. Consumed by the dashboard layer
//! through the [`CardService`] trait.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::card::{Card, CardConfig};

/// Result of a successful card creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedCard {
    pub id: i32,

    pub code: String,

    /// Shareable end-user configuration link for the new card.
    pub config_link: String,

    pub card: Card,
}

/// Configuration-state restriction for card listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfiguredFilter {
    All,
    Configured,
    NotConfigured,
}

/// Card counts for the dashboard header.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CardStats {
    pub total: u64,
    pub configured: u64,
    pub not_configured: u64,
}

/// Errors specific to card operations.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("Card not found: {0}")]
    NotFound(String),

    #[error("Code space exhausted after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CardError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CardError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for cards.
#[async_trait::async_trait]
pub trait CardService: Send + Sync {
    /// Creates a card with a freshly generated unique code. The card starts
    /// unconfigured with the default config; the code is not reserved if the
    /// insert fails.
    async fn create_card(&self, created_by: &str) -> Result<CreatedCard, CardError>;

    /// All cards, most recently created first. An empty store is a success.
    async fn get_all_cards(&self) -> Result<Vec<Card>, CardError>;

    /// Cards whose code or owner contains `term` (case-insensitive),
    /// restricted by configuration state.
    async fn search_cards(
        &self,
        term: &str,
        filter: ConfiguredFilter,
    ) -> Result<Vec<Card>, CardError>;

    /// Case-insensitive lookup by code.
    async fn get_card_by_code(&self, code: &str) -> Result<Card, CardError>;

    /// Unconditional hard delete; deleting an unknown id is not an error.
    async fn delete_card(&self, id: i32) -> Result<(), CardError>;

    /// Replaces the config wholesale, marks the card configured and stamps
    /// `last_used`. Partial updates are not supported.
    async fn update_card_config(&self, id: i32, config: CardConfig) -> Result<(), CardError>;

    /// Reverts the card to its unconfigured default state without deleting
    /// it or changing its code.
    async fn reset_card_config(&self, id: i32) -> Result<(), CardError>;

    /// Stamps `last_used` with the current time; all other fields untouched.
    async fn update_last_used(&self, id: i32) -> Result<(), CardError>;

    /// Total/configured/unconfigured counts.
    async fn card_stats(&self) -> Result<CardStats, CardError>;
}

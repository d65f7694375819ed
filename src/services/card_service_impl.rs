//! `SeaORM` implementation of the `CardService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::CardsConfig;
use crate::db::Store;
use crate::models::card::{Card, CardConfig};
use crate::services::card_service::{
    CardError, CardService, CardStats, ConfiguredFilter, CreatedCard,
};
use crate::services::code_generator::CodeGenerator;

pub struct SeaOrmCardService {
    store: Store,
    generator: CodeGenerator,
    config_link_base: String,
}

impl SeaOrmCardService {
    #[must_use]
    pub fn new(store: Store, cards: &CardsConfig) -> Self {
        let generator =
            CodeGenerator::with_options(store.clone(), cards.code_length, cards.max_code_attempts);

        Self {
            store,
            generator,
            config_link_base: cards.config_link_base.clone(),
        }
    }

    fn not_found(id: i32) -> CardError {
        CardError::NotFound(format!("Card {id} not found"))
    }

    fn matches(card: &Card, term_lower: &str, filter: ConfiguredFilter) -> bool {
        let matches_term = term_lower.is_empty()
            || card.code.to_lowercase().contains(term_lower)
            || card
                .owner
                .as_ref()
                .is_some_and(|owner| owner.to_lowercase().contains(term_lower));

        let matches_filter = match filter {
            ConfiguredFilter::All => true,
            ConfiguredFilter::Configured => card.configured,
            ConfiguredFilter::NotConfigured => !card.configured,
        };

        matches_term && matches_filter
    }
}

#[async_trait]
impl CardService for SeaOrmCardService {
    async fn create_card(&self, created_by: &str) -> Result<CreatedCard, CardError> {
        let code = self.generator.generate().await?;
        let card = self.store.insert_card(&code, created_by).await?;

        let config_link = format!("{}?code={}", self.config_link_base, card.code);
        info!("Issued card {} for {}", card.code, created_by);

        Ok(CreatedCard {
            id: card.id,
            code: card.code.clone(),
            config_link,
            card,
        })
    }

    async fn get_all_cards(&self) -> Result<Vec<Card>, CardError> {
        Ok(self.store.list_cards().await?)
    }

    async fn search_cards(
        &self,
        term: &str,
        filter: ConfiguredFilter,
    ) -> Result<Vec<Card>, CardError> {
        let term_lower = term.to_lowercase();
        let cards = self.store.list_cards().await?;

        Ok(cards
            .into_iter()
            .filter(|card| Self::matches(card, &term_lower, filter))
            .collect())
    }

    async fn get_card_by_code(&self, code: &str) -> Result<Card, CardError> {
        let normalized = code.to_uppercase();

        self.store
            .find_card_by_code(&normalized)
            .await?
            .ok_or_else(|| CardError::NotFound(format!("Card {normalized} not found")))
    }

    async fn delete_card(&self, id: i32) -> Result<(), CardError> {
        // Hard delete; a missing id is indistinguishable from success.
        self.store.remove_card(id).await?;
        Ok(())
    }

    async fn update_card_config(&self, id: i32, config: CardConfig) -> Result<(), CardError> {
        if !self.store.update_card_config(id, &config).await? {
            return Err(Self::not_found(id));
        }

        Ok(())
    }

    async fn reset_card_config(&self, id: i32) -> Result<(), CardError> {
        if !self.store.reset_card_config(id).await? {
            return Err(Self::not_found(id));
        }

        Ok(())
    }

    async fn update_last_used(&self, id: i32) -> Result<(), CardError> {
        if !self.store.touch_card_last_used(id).await? {
            return Err(Self::not_found(id));
        }

        Ok(())
    }

    async fn card_stats(&self) -> Result<CardStats, CardError> {
        let total = self.store.card_count().await?;
        let configured = self.store.configured_card_count().await?;

        Ok(CardStats {
            total,
            configured,
            not_configured: total.saturating_sub(configured),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::CardStatus;

    fn sample_card(code: &str, owner: Option<&str>, configured: bool) -> Card {
        Card {
            id: 1,
            code: code.to_string(),
            status: CardStatus::Active,
            created_at: "2026-03-01T12:00:00+00:00".to_string(),
            created_by: "alice@x.com".to_string(),
            last_used: None,
            owner: owner.map(str::to_string),
            configured,
            config: CardConfig::default(),
        }
    }

    #[test]
    fn search_matches_code_substring_case_insensitively() {
        let card = sample_card("ABC123EF", None, false);
        assert!(SeaOrmCardService::matches(
            &card,
            "bc12",
            ConfiguredFilter::All
        ));
        assert!(!SeaOrmCardService::matches(
            &card,
            "zzz",
            ConfiguredFilter::All
        ));
    }

    #[test]
    fn search_matches_owner_substring() {
        let card = sample_card("ABC123EF", Some("Maria Silva"), true);
        assert!(SeaOrmCardService::matches(
            &card,
            "silva",
            ConfiguredFilter::All
        ));
    }

    #[test]
    fn empty_term_matches_everything() {
        let card = sample_card("ABC123EF", None, false);
        assert!(SeaOrmCardService::matches(&card, "", ConfiguredFilter::All));
    }

    #[test]
    fn configured_filter_restricts_by_flag() {
        let configured = sample_card("AAAAAAAA", None, true);
        let fresh = sample_card("BBBBBBBB", None, false);

        assert!(SeaOrmCardService::matches(
            &configured,
            "",
            ConfiguredFilter::Configured
        ));
        assert!(!SeaOrmCardService::matches(
            &fresh,
            "",
            ConfiguredFilter::Configured
        ));
        assert!(SeaOrmCardService::matches(
            &fresh,
            "",
            ConfiguredFilter::NotConfigured
        ));
    }

    #[tokio::test]
    async fn error_conversions_work() {
        let db_err = sea_orm::DbErr::Custom("test".to_string());
        let card_err: CardError = db_err.into();
        assert!(matches!(card_err, CardError::Database(_)));
    }
}

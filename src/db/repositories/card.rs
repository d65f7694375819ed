use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{cards, prelude::*};
use crate::models::card::{Card, CardConfig, CardStatus};

/// Repository for card persistence operations
pub struct CardRepository {
    conn: DatabaseConnection,
}

impl CardRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Model Conversion Helpers
    // ========================================================================

    fn map_card_model(row: cards::Model) -> Result<Card> {
        let status: CardStatus = row
            .status
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .with_context(|| format!("Invalid status on card {}", row.id))?;

        let config: CardConfig = serde_json::from_str(&row.config)
            .with_context(|| format!("Invalid config payload on card {}", row.id))?;

        Ok(Card {
            id: row.id,
            code: row.code,
            status,
            created_at: row.created_at,
            created_by: row.created_by,
            last_used: row.last_used,
            owner: row.owner,
            configured: row.configured,
            config,
        })
    }

    fn default_config_json() -> Result<String> {
        serde_json::to_string(&CardConfig::default())
            .context("Failed to serialize default card config")
    }

    // ========================================================================
    // Card Operations
    // ========================================================================

    /// Insert a fresh, unconfigured card. `created_at` is assigned here, at
    /// the store boundary.
    pub async fn insert(&self, code: &str, created_by: &str) -> Result<Card> {
        let now = chrono::Utc::now().to_rfc3339();
        let config_json = Self::default_config_json()?;

        let active_model = cards::ActiveModel {
            code: Set(code.to_string()),
            status: Set(CardStatus::Active.as_str().to_string()),
            created_at: Set(now.clone()),
            created_by: Set(created_by.to_string()),
            last_used: Set(None),
            owner: Set(None),
            configured: Set(false),
            config: Set(config_json),
            ..Default::default()
        };

        let res = Cards::insert(active_model)
            .exec(&self.conn)
            .await
            .context("Failed to insert card")?;

        info!("Created card {} ({})", code, res.last_insert_id);

        Ok(Card {
            id: res.last_insert_id,
            code: code.to_string(),
            status: CardStatus::Active,
            created_at: now,
            created_by: created_by.to_string(),
            last_used: None,
            owner: None,
            configured: false,
            config: CardConfig::default(),
        })
    }

    /// All cards, most recently created first.
    pub async fn list_all(&self) -> Result<Vec<Card>> {
        let rows = Cards::find()
            .order_by_desc(cards::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list cards")?;

        rows.into_iter().map(Self::map_card_model).collect()
    }

    /// Exact-match lookup; callers normalize case before calling.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Card>> {
        let row = Cards::find()
            .filter(cards::Column::Code.eq(code))
            .one(&self.conn)
            .await
            .context("Failed to query card by code")?;

        row.map(Self::map_card_model).transpose()
    }

    pub async fn code_exists(&self, code: &str) -> Result<bool> {
        let count = Cards::find()
            .filter(cards::Column::Code.eq(code))
            .count(&self.conn)
            .await
            .context("Failed to check card code")?;

        Ok(count > 0)
    }

    /// Hard delete. Returns whether a row was actually removed.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Cards::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete card")?;

        if result.rows_affected > 0 {
            info!("Deleted card {}", id);
        }

        Ok(result.rows_affected > 0)
    }

    /// Wholesale config replacement: marks the card configured and stamps
    /// `last_used`. No field-level merging.
    pub async fn update_config(&self, id: i32, config: &CardConfig) -> Result<bool> {
        let config_json =
            serde_json::to_string(config).context("Failed to serialize card config")?;
        let now = chrono::Utc::now().to_rfc3339();

        let result = Cards::update_many()
            .col_expr(cards::Column::Config, Expr::value(config_json))
            .col_expr(cards::Column::Configured, Expr::value(true))
            .col_expr(cards::Column::LastUsed, Expr::value(Some(now)))
            .filter(cards::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to update card config")?;

        Ok(result.rows_affected > 0)
    }

    /// Revert to the unconfigured default: clears config, owner and
    /// last-used. The card and its code survive.
    pub async fn reset_config(&self, id: i32) -> Result<bool> {
        let config_json = Self::default_config_json()?;

        let result = Cards::update_many()
            .col_expr(cards::Column::Config, Expr::value(config_json))
            .col_expr(cards::Column::Configured, Expr::value(false))
            .col_expr(cards::Column::Owner, Expr::value(Option::<String>::None))
            .col_expr(cards::Column::LastUsed, Expr::value(Option::<String>::None))
            .filter(cards::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to reset card config")?;

        if result.rows_affected > 0 {
            info!("Reset card {} to unconfigured state", id);
        }

        Ok(result.rows_affected > 0)
    }

    /// Touch only `last_used`; every other field is left untouched.
    pub async fn touch_last_used(&self, id: i32) -> Result<bool> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = Cards::update_many()
            .col_expr(cards::Column::LastUsed, Expr::value(Some(now)))
            .filter(cards::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to update card last-used")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Cards::find()
            .count(&self.conn)
            .await
            .context("Failed to count cards")?;

        Ok(count)
    }

    pub async fn count_configured(&self) -> Result<u64> {
        let count = Cards::find()
            .filter(cards::Column::Configured.eq(true))
            .count(&self.conn)
            .await
            .context("Failed to count configured cards")?;

        Ok(count)
    }
}

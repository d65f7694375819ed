use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::card::{Card, CardConfig};

pub mod migrator;
pub mod repositories;

/// Handle to the card store. Explicit dependency object: constructed once by
/// the host application and injected into the services that need it.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") && !db_url.contains("::memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Card store connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn card_repo(&self) -> repositories::card::CardRepository {
        repositories::card::CardRepository::new(self.conn.clone())
    }

    pub async fn insert_card(&self, code: &str, created_by: &str) -> Result<Card> {
        self.card_repo().insert(code, created_by).await
    }

    pub async fn list_cards(&self) -> Result<Vec<Card>> {
        self.card_repo().list_all().await
    }

    pub async fn find_card_by_code(&self, code: &str) -> Result<Option<Card>> {
        self.card_repo().find_by_code(code).await
    }

    pub async fn card_code_exists(&self, code: &str) -> Result<bool> {
        self.card_repo().code_exists(code).await
    }

    pub async fn remove_card(&self, id: i32) -> Result<bool> {
        self.card_repo().delete(id).await
    }

    pub async fn update_card_config(&self, id: i32, config: &CardConfig) -> Result<bool> {
        self.card_repo().update_config(id, config).await
    }

    pub async fn reset_card_config(&self, id: i32) -> Result<bool> {
        self.card_repo().reset_config(id).await
    }

    pub async fn touch_card_last_used(&self, id: i32) -> Result<bool> {
        self.card_repo().touch_last_used(id).await
    }

    pub async fn card_count(&self) -> Result<u64> {
        self.card_repo().count().await
    }

    pub async fn configured_card_count(&self) -> Result<u64> {
        self.card_repo().count_configured().await
    }
}

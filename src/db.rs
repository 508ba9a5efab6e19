use std::sync::Arc;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

#[cfg(test)]
use mockall::automock;

use crate::config::DatabaseConfig;
use crate::models::ingredient::Ingredient;
use crate::schema;

/// Rows inserted when the table has no live rows at startup.
pub const SEED_NAMES: [&str; 3] = ["토마토", "양파", "당근"];

/// Predicate every read, update and count goes through. Soft-deleted rows stay in
/// the table but are invisible to the API.
const LIVE: &str = "deleted_at IS NULL";

const COLUMNS: &str = "id, name, created_at, updated_at, deleted_at";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("ingredient not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait IngredientOperations: Send + Sync {
    /// All live ingredients, oldest first.
    async fn scan(&self) -> StoreResult<Vec<Ingredient>>;
    async fn get_item(&self, id: u64) -> StoreResult<Option<Ingredient>>;
    async fn create(&self, name: String) -> StoreResult<Ingredient>;
    /// Persists `item.name` and returns the reloaded row with its new `updated_at`.
    async fn update(&self, item: Ingredient) -> StoreResult<Ingredient>;
    async fn soft_delete(&self, id: u64) -> StoreResult<()>;
    async fn count(&self) -> StoreResult<i64>;
}

pub type SharedRepository = Arc<dyn IngredientOperations>;

#[derive(Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    fn select_live(filter: Option<&str>) -> String {
        match filter {
            Some(filter) => format!("SELECT {COLUMNS} FROM ingredients WHERE {LIVE} AND {filter}"),
            None => format!("SELECT {COLUMNS} FROM ingredients WHERE {LIVE} ORDER BY id"),
        }
    }
}

#[async_trait]
impl IngredientOperations for MySqlRepository {
    async fn scan(&self) -> StoreResult<Vec<Ingredient>> {
        let items = sqlx::query_as::<_, Ingredient>(&Self::select_live(None))
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn get_item(&self, id: u64) -> StoreResult<Option<Ingredient>> {
        let item = sqlx::query_as::<_, Ingredient>(&Self::select_live(Some("id = ?")))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn create(&self, name: String) -> StoreResult<Ingredient> {
        let result = sqlx::query("INSERT INTO ingredients (name) VALUES (?)")
            .bind(&name)
            .execute(&self.pool)
            .await?;

        self.get_item(result.last_insert_id())
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, item: Ingredient) -> StoreResult<Ingredient> {
        sqlx::query(&format!(
            "UPDATE ingredients SET name = ?, updated_at = CURRENT_TIMESTAMP(3) WHERE {LIVE} AND id = ?"
        ))
        .bind(&item.name)
        .bind(item.id)
        .execute(&self.pool)
        .await?;

        self.get_item(item.id).await?.ok_or(StoreError::NotFound)
    }

    async fn soft_delete(&self, id: u64) -> StoreResult<()> {
        let result = sqlx::query(&format!(
            "UPDATE ingredients SET deleted_at = CURRENT_TIMESTAMP(3) WHERE {LIVE} AND id = ?"
        ))
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM ingredients WHERE {LIVE}"))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

pub struct Database;

impl Database {
    /// Connects, brings the schema up to date and seeds the default rows.
    /// Any failure here is fatal to the caller.
    pub async fn initialize(config: &DatabaseConfig) -> StoreResult<MySqlRepository> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name)
            .charset("utf8mb4");

        let pool = MySqlPoolOptions::new().connect_with(options).await?;
        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            "Database connection established successfully"
        );

        schema::migrate(&pool).await?;
        tracing::info!("Database migration completed successfully");

        let repository = MySqlRepository::new(pool);
        seed_defaults(&repository).await?;

        Ok(repository)
    }
}

/// Inserts [`SEED_NAMES`] when there are no live rows. A row that fails to insert
/// is logged and skipped.
pub async fn seed_defaults(db: &dyn IngredientOperations) -> StoreResult<()> {
    if db.count().await? > 0 {
        return Ok(());
    }

    for name in SEED_NAMES {
        if let Err(e) = db.create(name.to_string()).await {
            tracing::warn!("Failed to seed ingredient {name}: {e}");
        }
    }

    tracing::info!("Initial data seeded successfully");
    Ok(())
}

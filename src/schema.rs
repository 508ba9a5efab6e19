use sqlx::MySqlPool;

/// One schema step. Applied at most once, in `version` order, and recorded in
/// `_migrations` after it succeeds.
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub statements: &'static [&'static str],
}

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_ingredients",
    statements: &[
        "CREATE TABLE IF NOT EXISTS ingredients (
            id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
            name VARCHAR(100) NOT NULL,
            created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
            updated_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
            deleted_at DATETIME(3) NULL,
            PRIMARY KEY (id),
            UNIQUE KEY uni_ingredients_name (name),
            KEY idx_ingredients_deleted_at (deleted_at)
        ) DEFAULT CHARSET = utf8mb4",
    ],
}];

const CREATE_MIGRATIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS _migrations (
    version INT UNSIGNED NOT NULL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    applied_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3)
)";

/// Returns the migrations not yet recorded in `applied`, in version order.
pub fn pending<'a>(migrations: &'a [Migration], applied: &[u32]) -> Vec<&'a Migration> {
    let mut pending: Vec<&Migration> = migrations
        .iter()
        .filter(|m| !applied.contains(&m.version))
        .collect();
    pending.sort_by_key(|m| m.version);
    pending
}

pub async fn migrate(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_MIGRATIONS_TABLE).execute(pool).await?;

    let applied: Vec<u32> = sqlx::query_scalar("SELECT version FROM _migrations")
        .fetch_all(pool)
        .await?;

    let pending = pending(MIGRATIONS, &applied);
    if pending.is_empty() {
        tracing::info!("Database schema is up to date");
        return Ok(());
    }

    for migration in pending {
        for statement in migration.statements {
            sqlx::query(statement).execute(pool).await?;
        }
        sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
            .bind(migration.version)
            .bind(migration.name)
            .execute(pool)
            .await?;
        tracing::info!(
            version = migration.version,
            "Applied migration {}",
            migration.name
        );
    }

    Ok(())
}

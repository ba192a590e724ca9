use anyhow::{Context, Result};
use log::{debug, info};
use sea_orm::sea_query::Index;
use sea_orm::sqlx::sqlite::SqlitePoolOptions;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, SqlxSqliteConnector,
};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::constants::SUBUSER_PAIR_INDEX;
use crate::entities::{permission, server, subuser, user};

/// Database handle for subuser data
pub struct Storage {
    pub conn: DatabaseConnection,
}

impl Storage {
    /// Connect using the given settings and make sure the schema exists
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let conn = if config.is_in_memory() {
            Self::connect_in_memory(config).await?
        } else {
            Self::connect_pooled(config).await?
        };

        info!("Connected to {}", config.url);

        let storage = Self { conn };
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Fresh in-memory SQLite database with the schema applied
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&DatabaseConfig::in_memory()).await
    }

    async fn connect_pooled(config: &DatabaseConfig) -> Result<DatabaseConnection> {
        if let Some(path) = sqlite_file_path(&config.url) {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create database directory: {}", parent.display()))?;
            }
        }

        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .sqlx_logging(config.sqlx_logging);

        Database::connect(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", config.url))
    }

    async fn connect_in_memory(config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let pool = in_memory_pool_options(config)
            .connect(&config.url)
            .await
            .with_context(|| format!("Failed to open in-memory database: {}", config.url))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// Create tables and indexes if they are missing
    async fn init_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so foreign keys resolve
        let mut tables = [
            schema.create_table_from_entity(user::Entity),
            schema.create_table_from_entity(server::Entity),
            schema.create_table_from_entity(subuser::Entity),
            schema.create_table_from_entity(permission::Entity),
        ];

        for table in tables.iter_mut() {
            table.if_not_exists();
            self.conn
                .execute(backend.build(&*table))
                .await
                .context("Failed to create table")?;
        }

        let pair_index = Index::create()
            .name(SUBUSER_PAIR_INDEX)
            .table(subuser::Entity)
            .col(subuser::Column::UserId)
            .col(subuser::Column::ServerId)
            .unique()
            .if_not_exists()
            .to_owned();

        self.conn
            .execute(backend.build(&pair_index))
            .await
            .context("Failed to create subuser pair index")?;

        debug!("Schema ready ({} tables)", tables.len());
        Ok(())
    }

    /// Check if any user rows exist
    pub async fn has_data(&self) -> Result<bool> {
        Ok(user::Entity::find().one(&self.conn).await?.is_some())
    }
}

/// Every pooled connection to `:memory:` is its own database, so the single
/// connection must never be reaped or rotated.
pub fn in_memory_pool_options(config: &DatabaseConfig) -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(None) // avoid idle reaping
        .max_lifetime(None) // avoid lifetime rotation
}

/// File path of a `sqlite://` URL, without its query string.
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Some(PathBuf::from(path))
}

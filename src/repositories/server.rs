//! Server repository for database operations.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait};

use crate::entities::server;
use crate::error::Result;

/// Repository for server lookups.
pub struct ServerRepository;

impl ServerRepository {
    /// Get a single server by primary key.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<server::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(server::Entity::find_by_id(id).one(conn).await?)
    }

    /// Create a new server.
    pub async fn create<C>(conn: &C, server: server::ActiveModel) -> Result<server::Model>
    where
        C: ConnectionTrait,
    {
        Ok(server.insert(conn).await?)
    }
}

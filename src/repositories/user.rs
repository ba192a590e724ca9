//! User repository for database operations.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait};

use crate::entities::user;
use crate::error::Result;

/// Repository for user lookups.
pub struct UserRepository;

impl UserRepository {
    /// Get a single user by primary key.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find_by_id(id).one(conn).await?)
    }

    /// Create a new user.
    pub async fn create<C>(conn: &C, user: user::ActiveModel) -> Result<user::Model>
    where
        C: ConnectionTrait,
    {
        Ok(user.insert(conn).await?)
    }
}

//! Subuser lifecycle service.
//!
//! [`SubuserService`] borrows a database connection and applies the rules around
//! granting, updating and revoking subuser access. Reads are passed straight
//! through to [`SubuserRepository`]; every mutation runs inside a single
//! transaction.

use log::{info, warn};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::config::PermissionsConfig;
use crate::error::{RepositoryError, Result};
use crate::models::Subuser;
use crate::permissions;
use crate::repositories::{ServerRepository, SubuserRepository, UserRepository};

/// Grants, updates and revokes subuser access to servers.
///
/// # Example
/// ```rust,no_run
/// use subusers::config::Config;
/// use subusers::service::SubuserService;
/// use subusers::storage::Storage;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::default();
/// let storage = Storage::connect(&config.database).await?;
/// let service = SubuserService::new(&storage.conn, &config.permissions);
///
/// let granted = service.grant(1, 2, &["power-start".to_string()]).await?;
/// let subusers = service.list(granted.server_id()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy)]
pub struct SubuserService<'a> {
    conn: &'a DatabaseConnection,
    strict_permissions: bool,
}

impl<'a> SubuserService<'a> {
    pub fn new(conn: &'a DatabaseConnection, config: &PermissionsConfig) -> Self {
        Self {
            conn,
            strict_permissions: config.strict,
        }
    }

    /// Subusers of a server with user and permissions attached.
    pub async fn list(&self, server_id: i32) -> Result<Vec<Subuser>> {
        SubuserRepository::get_subusers_for_server(self.conn, server_id).await
    }

    /// The subuser for a (user, server) pair with permissions attached.
    pub async fn get(&self, user_id: i32, server_id: i32) -> Result<Subuser> {
        SubuserRepository::get_with_permissions_using_user_and_server(self.conn, user_id, server_id).await
    }

    /// Give `user_id` access to `server_id` with the given permissions.
    ///
    /// # Errors
    /// - [`RepositoryError::RecordNotFound`] if the server or user is missing
    /// - [`RepositoryError::UserIsServerOwner`] if the user owns the server
    /// - [`RepositoryError::SubuserExists`] if the pair is already linked
    /// - [`RepositoryError::InvalidPermission`] for unknown permissions in strict mode
    pub async fn grant(&self, server_id: i32, user_id: i32, permissions: &[String]) -> Result<Subuser> {
        self.check_permissions(permissions)?;

        let txn = self.conn.begin().await?;

        let server = ServerRepository::get_by_id(&txn, server_id)
            .await?
            .ok_or(RepositoryError::RecordNotFound)?;

        if UserRepository::get_by_id(&txn, user_id).await?.is_none() {
            return Err(RepositoryError::RecordNotFound);
        }

        if server.owner_id == user_id {
            return Err(RepositoryError::UserIsServerOwner { user_id, server_id });
        }

        if SubuserRepository::find_by_user_and_server(&txn, user_id, server_id)
            .await?
            .is_some()
        {
            return Err(RepositoryError::SubuserExists { user_id, server_id });
        }

        let subuser = SubuserRepository::create(&txn, user_id, server_id, permissions).await?;
        let subuser = SubuserRepository::load_server_and_user_relations(&txn, subuser, false).await?;

        txn.commit().await?;

        info!(
            "Granted user {} access to server {} ({} permissions)",
            user_id,
            server_id,
            subuser.permissions.get().map_or(0, Vec::len)
        );
        Ok(subuser)
    }

    /// Replace the permission set of an existing subuser.
    ///
    /// # Errors
    /// [`RepositoryError::RecordNotFound`] when the pair is not linked.
    pub async fn update_permissions(&self, user_id: i32, server_id: i32, permissions: &[String]) -> Result<Subuser> {
        self.check_permissions(permissions)?;

        let txn = self.conn.begin().await?;

        let model = SubuserRepository::find_by_user_and_server(&txn, user_id, server_id)
            .await?
            .ok_or(RepositoryError::RecordNotFound)?;

        SubuserRepository::sync_permissions(&txn, model.id, permissions).await?;

        // Re-read so updated_at and the permission rows reflect what was stored
        let subuser = SubuserRepository::find(&txn, model.id).await?;
        let subuser = SubuserRepository::get_with_permissions(&txn, subuser, true).await?;

        txn.commit().await?;

        info!("Updated permissions for user {} on server {}", user_id, server_id);
        Ok(subuser)
    }

    /// Remove a user's access to a server.
    ///
    /// # Errors
    /// [`RepositoryError::RecordNotFound`] when the pair is not linked.
    pub async fn revoke(&self, user_id: i32, server_id: i32) -> Result<()> {
        let txn = self.conn.begin().await?;

        let model = SubuserRepository::find_by_user_and_server(&txn, user_id, server_id)
            .await?
            .ok_or(RepositoryError::RecordNotFound)?;

        SubuserRepository::delete(&txn, model.id).await?;
        txn.commit().await?;

        info!("Revoked user {} from server {}", user_id, server_id);
        Ok(())
    }

    fn check_permissions(&self, requested: &[String]) -> Result<()> {
        if self.strict_permissions {
            return permissions::validate(requested);
        }

        for name in requested.iter().filter(|name| !permissions::is_known(name)) {
            warn!("Storing unknown permission '{}'", name);
        }
        Ok(())
    }
}

//! Subuser repository for database operations.

use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

use crate::entities::{permission, server, subuser, user};
use crate::error::{RepositoryError, Result};
use crate::models::{Loaded, Subuser, SubuserRelation};

/// Repository for subuser-related database operations.
pub struct SubuserRepository;

impl SubuserRepository {
    /// Get every subuser of a server with its user and permissions attached.
    ///
    /// Rows come back in insertion (`id`) order. A server without subusers
    /// yields an empty vector.
    pub async fn get_subusers_for_server<C>(conn: &C, server_id: i32) -> Result<Vec<Subuser>>
    where
        C: ConnectionTrait,
    {
        let rows = subuser::Entity::find()
            .filter(subuser::Column::ServerId.eq(server_id))
            .order_by_asc(subuser::Column::Id)
            .all(conn)
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let users = rows.load_one(user::Entity, conn).await?;
        let permissions = rows
            .load_many(permission::Entity::find().order_by_asc(permission::Column::Id), conn)
            .await?;

        debug!("Loaded {} subusers for server {}", rows.len(), server_id);

        Ok(rows
            .into_iter()
            .zip(users)
            .zip(permissions)
            .map(|((model, user), permissions)| Subuser {
                model,
                user: Loaded::Loaded(user),
                server: Loaded::NotLoaded,
                permissions: Loaded::Loaded(permissions),
            })
            .collect())
    }

    /// Attach the server and user relations unless they are already present.
    ///
    /// With `refresh` set both are fetched again regardless.
    pub async fn load_server_and_user_relations<C>(conn: &C, subuser: Subuser, refresh: bool) -> Result<Subuser>
    where
        C: ConnectionTrait,
    {
        Self::load_relations(conn, subuser, &[SubuserRelation::Server, SubuserRelation::User], refresh).await
    }

    /// Attach the permissions and user relations unless they are already present.
    ///
    /// With `refresh` set both are fetched again regardless.
    pub async fn get_with_permissions<C>(conn: &C, subuser: Subuser, refresh: bool) -> Result<Subuser>
    where
        C: ConnectionTrait,
    {
        Self::load_relations(conn, subuser, &[SubuserRelation::Permissions, SubuserRelation::User], refresh).await
    }

    /// Fill the requested relations on a subuser.
    ///
    /// Relations that are already loaded are skipped unless `refresh` is set.
    /// A relation listed twice is fetched at most once per call.
    pub async fn load_relations<C>(
        conn: &C,
        mut subuser: Subuser,
        relations: &[SubuserRelation],
        refresh: bool,
    ) -> Result<Subuser>
    where
        C: ConnectionTrait,
    {
        for (index, relation) in relations.iter().enumerate() {
            if relations[..index].contains(relation) {
                continue;
            }
            if subuser.is_loaded(*relation) && !refresh {
                continue;
            }

            debug!("Fetching '{}' for subuser {}", relation.as_str(), subuser.id());

            match relation {
                SubuserRelation::User => {
                    let user = subuser.model.find_related(user::Entity).one(conn).await?;
                    subuser.user = Loaded::Loaded(user);
                }
                SubuserRelation::Server => {
                    let server = subuser.model.find_related(server::Entity).one(conn).await?;
                    subuser.server = Loaded::Loaded(server);
                }
                SubuserRelation::Permissions => {
                    let permissions = subuser
                        .model
                        .find_related(permission::Entity)
                        .order_by_asc(permission::Column::Id)
                        .all(conn)
                        .await?;
                    subuser.permissions = Loaded::Loaded(permissions);
                }
            }
        }

        Ok(subuser)
    }

    /// Get the subuser linking `user_id` to `server_id` with permissions attached.
    ///
    /// # Errors
    /// Returns [`RepositoryError::RecordNotFound`] when no row matches the pair.
    pub async fn get_with_permissions_using_user_and_server<C>(
        conn: &C,
        user_id: i32,
        server_id: i32,
    ) -> Result<Subuser>
    where
        C: ConnectionTrait,
    {
        let model = Self::find_by_user_and_server(conn, user_id, server_id)
            .await?
            .ok_or(RepositoryError::RecordNotFound)?;

        Self::load_relations(conn, Subuser::from(model), &[SubuserRelation::Permissions], false).await
    }

    /// Get a single subuser by primary key, without relations.
    pub async fn find<C>(conn: &C, id: i32) -> Result<Subuser>
    where
        C: ConnectionTrait,
    {
        subuser::Entity::find_by_id(id)
            .one(conn)
            .await?
            .map(Subuser::from)
            .ok_or(RepositoryError::RecordNotFound)
    }

    /// Look up the raw row for a (user, server) pair.
    pub async fn find_by_user_and_server<C>(conn: &C, user_id: i32, server_id: i32) -> Result<Option<subuser::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(subuser::Entity::find()
            .filter(subuser::Column::UserId.eq(user_id))
            .filter(subuser::Column::ServerId.eq(server_id))
            .one(conn)
            .await?)
    }

    /// Insert a subuser and its permission rows.
    ///
    /// The unique index on (`user_id`, `server_id`) rejects a second row for
    /// the same pair with a database error; callers wanting a domain error
    /// check [`Self::find_by_user_and_server`] first.
    pub async fn create<C>(conn: &C, user_id: i32, server_id: i32, permissions: &[String]) -> Result<Subuser>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        let model = subuser::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(user_id),
            server_id: ActiveValue::Set(server_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(conn)
        .await?;

        let permissions = Self::insert_permissions(conn, model.id, permissions).await?;

        debug!(
            "Created subuser {} (user {}, server {}) with {} permissions",
            model.id,
            user_id,
            server_id,
            permissions.len()
        );

        let mut subuser = Subuser::from(model);
        subuser.permissions = Loaded::Loaded(permissions);
        Ok(subuser)
    }

    /// Replace the permission set of a subuser and bump its `updated_at`.
    ///
    /// # Errors
    /// Returns [`RepositoryError::RecordNotFound`] when the subuser does not exist.
    pub async fn sync_permissions<C>(conn: &C, subuser_id: i32, permissions: &[String]) -> Result<Vec<permission::Model>>
    where
        C: ConnectionTrait,
    {
        let touched = subuser::Entity::update_many()
            .col_expr(subuser::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(subuser::Column::Id.eq(subuser_id))
            .exec(conn)
            .await?;

        if touched.rows_affected == 0 {
            return Err(RepositoryError::RecordNotFound);
        }

        permission::Entity::delete_many()
            .filter(permission::Column::SubuserId.eq(subuser_id))
            .exec(conn)
            .await?;

        Self::insert_permissions(conn, subuser_id, permissions).await
    }

    /// Delete a subuser together with its permission rows.
    ///
    /// # Errors
    /// Returns [`RepositoryError::RecordNotFound`] when the subuser does not exist.
    pub async fn delete<C>(conn: &C, subuser_id: i32) -> Result<()>
    where
        C: ConnectionTrait,
    {
        // Explicit so revocation does not depend on the foreign_keys pragma.
        permission::Entity::delete_many()
            .filter(permission::Column::SubuserId.eq(subuser_id))
            .exec(conn)
            .await?;

        let deleted = subuser::Entity::delete_by_id(subuser_id).exec(conn).await?;
        if deleted.rows_affected == 0 {
            return Err(RepositoryError::RecordNotFound);
        }

        debug!("Deleted subuser {}", subuser_id);
        Ok(())
    }

    /// Insert permission rows, skipping duplicates while keeping first-seen order.
    async fn insert_permissions<C>(conn: &C, subuser_id: i32, permissions: &[String]) -> Result<Vec<permission::Model>>
    where
        C: ConnectionTrait,
    {
        let mut inserted: Vec<permission::Model> = Vec::with_capacity(permissions.len());

        for name in permissions {
            if inserted.iter().any(|p| &p.permission == name) {
                continue;
            }

            let model = permission::ActiveModel {
                id: ActiveValue::NotSet,
                subuser_id: ActiveValue::Set(subuser_id),
                permission: ActiveValue::Set(name.clone()),
            }
            .insert(conn)
            .await?;
            inserted.push(model);
        }

        Ok(inserted)
    }
}

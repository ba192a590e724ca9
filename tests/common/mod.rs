#![allow(dead_code)]

use sea_orm::ActiveValue;
use subusers::repositories::{ServerRepository, UserRepository};
use subusers::storage::Storage;
use subusers::{server, user};
use uuid::Uuid;

pub async fn storage() -> Storage {
    Storage::in_memory().await.expect("in-memory storage")
}

pub async fn create_user(storage: &Storage, username: &str) -> user::Model {
    UserRepository::create(
        &storage.conn,
        user::ActiveModel {
            id: ActiveValue::NotSet,
            uuid: ActiveValue::Set(Uuid::new_v4()),
            username: ActiveValue::Set(username.to_string()),
            email: ActiveValue::Set(format!("{}@example.com", username)),
            name_first: ActiveValue::Set(Some(username.to_string())),
            name_last: ActiveValue::Set(None),
            root_admin: ActiveValue::Set(false),
        },
    )
    .await
    .expect("create user")
}

pub async fn create_server(storage: &Storage, owner: &user::Model, name: &str) -> server::Model {
    ServerRepository::create(
        &storage.conn,
        server::ActiveModel {
            id: ActiveValue::NotSet,
            uuid: ActiveValue::Set(Uuid::new_v4()),
            owner_id: ActiveValue::Set(owner.id),
            name: ActiveValue::Set(name.to_string()),
            description: ActiveValue::Set(None),
        },
    )
    .await
    .expect("create server")
}

pub fn perms(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

mod common;

use subusers::config::{Config, DatabaseConfig};
use subusers::service::SubuserService;
use subusers::storage::Storage;

#[tokio::test]
async fn test_in_memory_storage_creation() {
    let result = Storage::in_memory().await;
    assert!(result.is_ok(), "Storage should be created successfully");
}

#[tokio::test]
async fn test_new_storage_is_empty() {
    let storage = common::storage().await;
    assert!(!storage.has_data().await.unwrap());

    common::create_user(&storage, "alice").await;
    assert!(storage.has_data().await.unwrap());
}

#[tokio::test]
async fn test_file_database_schema_is_idempotent() {
    let dir = std::env::temp_dir().join(format!("subusers_storage_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("subusers.db");

    let config = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        max_connections: 2,
        ..DatabaseConfig::default()
    };

    {
        let storage = Storage::connect(&config).await.unwrap();
        common::create_user(&storage, "alice").await;
        storage.conn.close().await.unwrap();
    }

    // Second connect re-runs schema creation against existing tables
    let storage = Storage::connect(&config).await.unwrap();
    assert!(storage.has_data().await.unwrap());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_file_database_keeps_grants_between_connections() {
    let dir = std::env::temp_dir().join(format!("subusers_persist_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    // Parent directories are created on connect
    let path = dir.join("nested").join("subusers.db");

    let config = Config {
        database: DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", path.display()),
            ..DatabaseConfig::default()
        },
        ..Config::default()
    };

    let server_id = {
        let storage = Storage::connect(&config.database).await.unwrap();
        let owner = common::create_user(&storage, "owner").await;
        let alice = common::create_user(&storage, "alice").await;
        let server = common::create_server(&storage, &owner, "survival").await;
        let service = SubuserService::new(&storage.conn, &config.permissions);
        service.grant(server.id, alice.id, &common::perms(&["power-start"])).await.unwrap();
        storage.conn.close().await.unwrap();
        server.id
    };

    let storage = Storage::connect(&config.database).await.unwrap();
    let service = SubuserService::new(&storage.conn, &config.permissions);
    let subusers = service.list(server_id).await.unwrap();
    assert_eq!(subusers.len(), 1);
    assert!(subusers[0].has_permission("power-start"));

    let _ = std::fs::remove_dir_all(&dir);
}

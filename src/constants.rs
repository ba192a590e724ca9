//! Constants used throughout the application
//!
//! This module centralizes file names, defaults and user-facing messages.

// File and directory names
/// Configuration file looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "subusers.toml";
/// Application directory under the platform config/data dirs
pub const APP_DIR_NAME: &str = "subusers";
/// Configuration file name inside the application config dir
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Log file name inside the application data dir
pub const LOG_FILE_NAME: &str = "subusers.log";
/// SQLite database file name inside the application data dir
pub const DATABASE_FILE_NAME: &str = "subusers.db";

// Database defaults
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 4;
/// Upper bound accepted for `database.max_connections`
pub const MAX_CONNECTIONS_LIMIT: u32 = 64;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 8;

// Schema
pub const SUBUSER_PAIR_INDEX: &str = "subusers_user_id_server_id_unique";

// Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const ERROR_SUBUSER_NOT_FOUND: &str = "❌ No subuser matches that user and server";
pub const SUCCESS_SUBUSER_GRANTED: &str = "✅ Subuser granted";
pub const SUCCESS_SUBUSER_REVOKED: &str = "✅ Subuser revoked";

//! Subusers - data access for server subusers
//!
//! A subuser links a user account to a server it does not own, together with
//! the set of permissions that user holds on the server. This library stores
//! those links with SeaORM and exposes lookups that eager-load the related
//! user, server and permission rows on demand.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`entities`] - SeaORM entity models
//! * [`repositories`] - Query layer taking an explicit connection
//! * [`service`] - Grant, update and revoke rules
//! * [`storage`] - Connection and schema setup

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Repository and service error types
pub mod error;

/// Logging setup for the binary
pub mod logger;

/// Subuser aggregate with explicit relation load state
pub mod models;

/// Known permission names
pub mod permissions;

/// Repository layer for database operations
pub mod repositories;

/// Subuser lifecycle operations
pub mod service;

/// Database connection and schema management
pub mod storage;

// Re-export entity models for convenient access
pub use entities::{permission, server, subuser, user};
pub use error::RepositoryError;
pub use models::{Loaded, Subuser, SubuserRelation};

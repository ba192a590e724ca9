//! Local storage module for subuser data persistence
//!
//! Connection setup and schema creation for:
//! - Users
//! - Servers
//! - Subusers
//! - Permissions

pub mod db;

pub use db::Storage;

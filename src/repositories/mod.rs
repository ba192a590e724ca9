//! Repository layer for database operations.
//!
//! Repositories are unit structs whose methods take the connection as an
//! explicit argument (`&C where C: ConnectionTrait`), so the same call works
//! against a pooled connection or an open transaction. Entities stay plain
//! data models.

pub mod server;
pub mod subuser;
pub mod user;

pub use server::ServerRepository;
pub use subuser::SubuserRepository;
pub use user::UserRepository;

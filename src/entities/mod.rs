pub mod permission;
pub mod server;
pub mod subuser;
pub mod user;

pub use permission::Entity as Permission;
pub use server::Entity as Server;
pub use subuser::Entity as Subuser;
pub use user::Entity as User;

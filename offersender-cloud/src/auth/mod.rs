//! Authentication: session JWTs and principal resolution

pub mod identity;
pub mod session;

pub use identity::{Principal, resolve_principal};
pub use session::{AdminIdentity, Role, TenantIdentity};

//! Platform administration endpoints

mod admin_users;
mod business;

pub use admin_users::{create_admin, delete_admin, list_admins};
pub use business::{delete_business, list_businesses, update_business};

//! Tenant self-service API endpoints — split into sub-modules by domain

mod account;
mod campaign;
mod customer;
mod dispatch;

// Re-export all handlers for route registration
pub use account::{change_password, change_plan, get_profile, update_profile};
pub use campaign::{create_campaign, delete_campaign, list_campaigns};
pub use customer::{create_customer, delete_customer, list_customers, update_customer};
pub use dispatch::{bulk_send, test_connection};

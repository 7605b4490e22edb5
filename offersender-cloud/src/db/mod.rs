//! Database access layer — one module per entity, plain queries with bound
//! parameters over the shared PgPool.

pub mod accounts;
pub mod admins;
pub mod businesses;
pub mod campaigns;
pub mod customers;

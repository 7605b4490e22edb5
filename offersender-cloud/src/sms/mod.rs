//! SMS dispatch engine
//!
//! Dependency order, leaves first: [`phone`] (normalizer) → [`strategy`]
//! (delivery strategy chain) → [`dispatch`] (bulk engine) / [`tester`]
//! (connection tester).

pub mod dispatch;
pub mod phone;
pub mod strategy;
pub mod tester;

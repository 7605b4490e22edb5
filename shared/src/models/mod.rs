//! Domain models

mod admin;
mod business;
mod campaign;
mod customer;

pub use admin::{AdminUser, AdminUserCreate};
pub use business::{Business, BusinessStatus, BusinessUpdate};
pub use campaign::{Campaign, CampaignCreate, CampaignRecurrence, CampaignStatus};
pub use customer::{Customer, CustomerCreate, CustomerUpdate};

//! Route handlers organized by domain.

pub mod alert;
pub mod evacuation;
pub mod feed;
pub mod health;

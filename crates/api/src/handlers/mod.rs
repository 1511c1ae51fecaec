//! HTTP handlers, one module per resource.

pub mod alert;
pub mod alert_admin;
pub mod assessment;
pub mod auth;
pub mod compliance;
pub mod dashboard;
pub mod farm;
pub mod training;
pub mod training_admin;
pub mod user;

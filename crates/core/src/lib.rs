//! Domain logic for the biosecurity service.
//!
//! This crate has no database dependencies. Repositories load rows and hand
//! plain values to the functions here; handlers persist whatever they return.

pub mod alert;
pub mod assessment;
pub mod compliance;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod farm;
pub mod percent;
pub mod policy;
pub mod preferences;
pub mod roles;
pub mod training;
pub mod types;

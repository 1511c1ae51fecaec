//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod alert;
pub mod assessment;
pub mod compliance;
pub mod dashboard;
pub mod farm;
pub mod preferences;
pub mod profile;
pub mod role;
pub mod session;
pub mod training;
pub mod user;

//! Authentication primitives.
//!
//! - [`password`]: Argon2id hashing, verification and the length rule.
//! - [`jwt`]: access-token signing/validation and refresh-token helpers.

pub mod jwt;
pub mod password;

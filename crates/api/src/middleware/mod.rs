//! Request identity and authorization extractors.
//!
//! - [`auth::AuthUser`]: identity from a Bearer JWT.
//! - [`rbac`]: permission-gated wrappers around [`auth::AuthUser`].

pub mod auth;
pub mod rbac;

//! Shared response envelope types for API handlers.
//!
//! JSON responses use a `{ "data": ... }` envelope. CSV exports are the only
//! bodies returned without it.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: farms }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

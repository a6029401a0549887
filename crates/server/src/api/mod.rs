//! HTTP endpoint modules. Shared response types live here in mod.rs.

mod answer;
mod health;

pub use answer::answer;
pub use health::health;

use serde::Serialize;

/// Error body for client and server error responses.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: &'static str,
}

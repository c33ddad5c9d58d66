//! Shared types for the front-desk booking client
//!
//! Wire models, request/response bodies and the error code table used by
//! both the guest-facing and the receptionist-facing controllers.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use error::{Action, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};

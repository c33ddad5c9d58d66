//! Unified error codes for the booking API
//!
//! This module provides:
//! - [`ErrorCode`]: every machine-readable code the API emits
//! - [`ErrorCategory`]: classification of codes by domain
//! - [`Action`] and the message table: one place translating codes to text
//!
//! # Example
//!
//! ```
//! use shared::error::{Action, ErrorCode, resolve};
//!
//! let code = ErrorCode::parse("PAYMENT_REQUIRED");
//! assert_eq!(code.message_for(Action::CheckIn), "Payment must be completed before check-in.");
//! assert_eq!(resolve("NOT_A_CODE"), "Something went wrong. Please try again.");
//! ```

mod category;
mod codes;
mod messages;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use messages::{Action, DEFAULT_MESSAGE, resolve, resolve_for};

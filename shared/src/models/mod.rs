//! Data models
//!
//! DTOs exchanged with the booking API. The client holds no authoritative
//! copy of any of these; they are refreshed by re-querying.

pub mod booking;
pub mod guest;
pub mod pagination;
pub mod priorities;
pub mod room;

// Re-exports
pub use booking::*;
pub use guest::*;
pub use pagination::*;
pub use priorities::*;
pub use room::*;

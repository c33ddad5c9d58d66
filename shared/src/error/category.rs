//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Coarse grouping of booking API error codes
///
/// Controllers use the category to title feedback dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Request data failed server-side validation
    Validation,
    /// Booking, guest or room could not be found
    Lookup,
    /// The requested room or dates are not available
    Availability,
    /// Booking state does not allow the action
    Lifecycle,
    /// Duplicate or conflicting resource
    Conflict,
    /// Backend failure or unrecognised code
    System,
}

impl ErrorCategory {
    /// Title shown above the feedback message
    pub fn title(&self) -> &'static str {
        match self {
            Self::Validation => "Check your details",
            Self::Lookup => "Not found",
            Self::Availability => "Not available",
            Self::Lifecycle => "Action not allowed",
            Self::Conflict => "Already exists",
            Self::System => "Error",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::MissingData
            | ErrorCode::InvalidDateFormat
            | ErrorCode::InvalidCheckIn
            | ErrorCode::InvalidCheckOut => ErrorCategory::Validation,

            ErrorCode::BookingNotFound | ErrorCode::GuestNotFound | ErrorCode::RoomNotFound => {
                ErrorCategory::Lookup
            }

            ErrorCode::RoomBooked | ErrorCode::NoRoomsAvailable => ErrorCategory::Availability,

            ErrorCode::InvalidModification
            | ErrorCode::BookingCancelled
            | ErrorCode::PaymentRequired
            | ErrorCode::InvalidCheckInDate
            | ErrorCode::InvalidCheckout
            | ErrorCode::InvalidPaymentUpdate
            | ErrorCode::InvalidBookingStatus
            | ErrorCode::RoomActive => ErrorCategory::Lifecycle,

            ErrorCode::DuplicateRequest | ErrorCode::RoomNumberExists => ErrorCategory::Conflict,

            ErrorCode::DbConnection | ErrorCode::ServerError | ErrorCode::Unknown => {
                ErrorCategory::System
            }
        }
    }
}

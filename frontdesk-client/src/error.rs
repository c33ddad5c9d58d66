//! Client error types

use http::StatusCode;
use shared::error::{Action, ErrorCode};
use thiserror::Error;

/// Client-side rule violated before any request was sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("Please select both check-in and check-out dates.")]
    MissingDates,

    #[error("Check-in date must be today or in the future.")]
    CheckInInPast,

    #[error("Check-out date must be after check-in date.")]
    CheckOutNotAfterCheckIn,

    #[error("Please enter a valid date.")]
    InvalidDate,

    #[error("Please fill in all guest details.")]
    MissingGuestDetails,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please search for available rooms first.")]
    NoSearchDates,

    #[error("Please select a room.")]
    NoRoomSelected,

    #[error("Please enter both your email and booking reference.")]
    MissingLookupDetails,

    #[error("Please change at least one field (room, check-in, or check-out)")]
    NoChanges,

    #[error("No booking is loaded.")]
    NoBookingLoaded,

    #[error("You must complete payment to modify this booking.")]
    PaymentPending,

    #[error("This booking can no longer be changed.")]
    BookingLocked,

    #[error("This action is not available for the booking's current status.")]
    ActionUnavailable,

    #[error("Please fill in all room details.")]
    MissingRoomDetails,

    #[error("Price must be greater than zero.")]
    InvalidPrice,

    #[error("Please review the walk-in booking before confirming.")]
    WalkInNotPrepared,
}

impl Precondition {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response whose body did not identify the failure
    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Domain error reported by the API
    #[error("API error {code} (status {status})")]
    Api {
        status: StatusCode,
        code: ErrorCode,
        message: Option<String>,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rejected locally, no request was sent
    #[error("{0}")]
    Precondition(#[from] Precondition),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Domain error code, if the API reported one
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, ClientError::Precondition(_))
    }

    /// Sentence shown to the user when `action` failed with this error
    ///
    /// Preconditions carry their own text, domain codes go through the shared
    /// message table and anything else gets the action's generic failure text.
    pub fn user_message(&self, action: Action) -> String {
        match self {
            ClientError::Precondition(p) => p.message(),
            ClientError::Api { code, .. } => code.message_for(action).to_string(),
            _ => action.failure_message().to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

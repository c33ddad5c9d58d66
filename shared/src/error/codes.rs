//! Booking API error codes
//!
//! The booking API reports domain failures as a machine-readable string in the
//! response body (`{"code": "ROOM_BOOKED"}`). Every code the API is known to
//! emit is listed here; anything else parses to [`ErrorCode::Unknown`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Machine-readable error code returned by the booking API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ==================== Input ====================
    /// Required request fields were missing
    MissingData,
    /// A date was not in the expected format
    InvalidDateFormat,
    /// Check-in date lies in the past
    InvalidCheckIn,
    /// Check-out date is not after check-in
    InvalidCheckOut,

    // ==================== Lookup ====================
    /// No booking matches the reference
    BookingNotFound,
    /// No guest matches the email
    GuestNotFound,
    /// The referenced room does not exist
    RoomNotFound,

    // ==================== Availability ====================
    /// Room already booked for the requested dates
    RoomBooked,
    /// Search returned nothing for the requested dates
    NoRoomsAvailable,

    // ==================== Lifecycle ====================
    /// Booking is checked-in or checked-out and can no longer change
    InvalidModification,
    /// Booking was cancelled
    BookingCancelled,
    /// Payment has to be recorded first
    PaymentRequired,
    /// Check-in attempted outside the check-in date
    InvalidCheckInDate,
    /// Check-out attempted on a booking that is not checked-in
    InvalidCheckout,
    /// Payment status change not allowed in the current booking state
    InvalidPaymentUpdate,
    /// Delete attempted on a booking that is still active
    InvalidBookingStatus,
    /// Room still has active bookings
    RoomActive,

    // ==================== Conflict ====================
    /// Same request id submitted twice
    DuplicateRequest,
    /// Room number already used by another room
    RoomNumberExists,

    // ==================== System ====================
    /// Backend could not reach its database
    DbConnection,
    /// Unhandled server-side failure
    ServerError,
    /// Code not recognised by this client
    #[serde(other)]
    Unknown,
}

impl ErrorCode {
    /// Every known code, `Unknown` last
    pub const ALL: [ErrorCode; 22] = [
        ErrorCode::MissingData,
        ErrorCode::InvalidDateFormat,
        ErrorCode::InvalidCheckIn,
        ErrorCode::InvalidCheckOut,
        ErrorCode::BookingNotFound,
        ErrorCode::GuestNotFound,
        ErrorCode::RoomNotFound,
        ErrorCode::RoomBooked,
        ErrorCode::NoRoomsAvailable,
        ErrorCode::InvalidModification,
        ErrorCode::BookingCancelled,
        ErrorCode::PaymentRequired,
        ErrorCode::InvalidCheckInDate,
        ErrorCode::InvalidCheckout,
        ErrorCode::InvalidPaymentUpdate,
        ErrorCode::InvalidBookingStatus,
        ErrorCode::RoomActive,
        ErrorCode::DuplicateRequest,
        ErrorCode::RoomNumberExists,
        ErrorCode::DbConnection,
        ErrorCode::ServerError,
        ErrorCode::Unknown,
    ];

    /// Wire representation of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingData => "MISSING_DATA",
            ErrorCode::InvalidDateFormat => "INVALID_DATE_FORMAT",
            ErrorCode::InvalidCheckIn => "INVALID_CHECK_IN",
            ErrorCode::InvalidCheckOut => "INVALID_CHECK_OUT",
            ErrorCode::BookingNotFound => "BOOKING_NOT_FOUND",
            ErrorCode::GuestNotFound => "GUEST_NOT_FOUND",
            ErrorCode::RoomNotFound => "ROOM_NOT_FOUND",
            ErrorCode::RoomBooked => "ROOM_BOOKED",
            ErrorCode::NoRoomsAvailable => "NO_ROOMS_AVAILABLE",
            ErrorCode::InvalidModification => "INVALID_MODIFICATION",
            ErrorCode::BookingCancelled => "BOOKING_CANCELLED",
            ErrorCode::PaymentRequired => "PAYMENT_REQUIRED",
            ErrorCode::InvalidCheckInDate => "INVALID_CHECK_IN_DATE",
            ErrorCode::InvalidCheckout => "INVALID_CHECKOUT",
            ErrorCode::InvalidPaymentUpdate => "INVALID_PAYMENT_UPDATE",
            ErrorCode::InvalidBookingStatus => "INVALID_BOOKING_STATUS",
            ErrorCode::RoomActive => "ROOM_ACTIVE",
            ErrorCode::DuplicateRequest => "DUPLICATE_REQUEST",
            ErrorCode::RoomNumberExists => "ROOM_NUMBER_EXISTS",
            ErrorCode::DbConnection => "DB_CONNECTION",
            ErrorCode::ServerError => "SERVER_ERROR",
            ErrorCode::Unknown => "UNKNOWN",
        }
    }

    /// Parse a wire code, falling back to `Unknown`
    pub fn parse(code: &str) -> Self {
        let code = code.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
            .unwrap_or(ErrorCode::Unknown)
    }

    /// Whether this code is one the client recognises
    pub fn is_known(&self) -> bool {
        !matches!(self, ErrorCode::Unknown)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for ErrorCode {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

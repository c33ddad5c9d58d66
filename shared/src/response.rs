//! Response bodies of the booking API

use crate::error::ErrorCode;
use crate::models::{Booking, Guest, Pagination, Room, RoomOption};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `POST /search_rooms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRoomsResponse {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub check_in: Option<NaiveDate>,
    #[serde(default)]
    pub check_out: Option<NaiveDate>,
}

/// Responses that only carry the affected booking reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReferenceResponse {
    pub booking_reference: String,
}

/// `POST /manage_booking`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManageBookingResponse {
    pub booking: Booking,
}

/// `POST /available_rooms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeRoomsResponse {
    #[serde(default)]
    pub rooms: Vec<RoomOption>,
}

/// `GET /receptionist/bookings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingListResponse {
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// `GET /receptionist/rooms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomListResponse {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// `GET /receptionist/guests`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestListResponse {
    #[serde(default)]
    pub guests: Vec<Guest>,
}

/// Acknowledgement body of mutation endpoints
///
/// Some endpoints answer `200 {"success": false, "message": ...}` instead of
/// an error status, so the flag has to be inspected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ack {
    pub success: Option<bool>,
    pub code: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub booking_reference: Option<String>,
}

impl Ack {
    pub fn is_rejected(&self) -> bool {
        self.success == Some(false)
    }
}

/// Error body of a failed request
///
/// The API is not consistent about the key carrying the code: guest endpoints
/// use `code`, receptionist endpoints use `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub code: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    /// Raw wire code, if any key carried one
    pub fn raw_code(&self) -> Option<&str> {
        self.code
            .as_deref()
            .or(self.error.as_deref())
            .filter(|c| !c.trim().is_empty())
    }

    pub fn error_code(&self) -> ErrorCode {
        self.raw_code().map(ErrorCode::parse).unwrap_or(ErrorCode::Unknown)
    }

    /// Whether the body identifies the failure at all
    pub fn is_meaningful(&self) -> bool {
        self.raw_code().is_some() || self.message.is_some()
    }
}

impl From<Ack> for ErrorBody {
    fn from(ack: Ack) -> Self {
        Self {
            code: ack.code,
            error: ack.error,
            message: ack.message,
        }
    }
}

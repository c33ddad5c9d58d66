//! Error code → display message table
//!
//! One table serves every screen. A handful of codes read differently
//! depending on what the user was doing (`PAYMENT_REQUIRED` during check-in vs
//! during a guest modification), so lookups take the [`Action`] that failed.

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Fallback for codes without an entry
pub const DEFAULT_MESSAGE: &str = "Something went wrong. Please try again.";

/// User-facing action that triggered an API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    SearchRooms,
    CreateBooking,
    LookupBooking,
    ModifyBooking,
    CancelBooking,
    CheckIn,
    CheckOut,
    RecordPayment,
    DeleteBooking,
    SearchStaffRooms,
    CreateWalkIn,
    AddRoom,
    DeleteRoom,
    LoadBookings,
    LoadRooms,
    LoadGuests,
    LoadPriorities,
}

impl Action {
    /// Message used when the failure carries no recognised code
    pub fn failure_message(&self) -> &'static str {
        match self {
            Action::SearchRooms => "Error loading rooms. Try again later.",
            Action::CreateBooking => "Booking failed. Try again.",
            Action::LookupBooking => "Error querying booking.",
            Action::ModifyBooking => "Failed to modify booking. Please try again.",
            Action::CancelBooking => "Error cancelling booking.",
            Action::CheckIn => "Failed to check in. Please try again.",
            Action::CheckOut => "Failed to check out. Please try again.",
            Action::RecordPayment => "Failed to record payment. Please try again.",
            Action::DeleteBooking => "Failed to delete booking. Please try again.",
            Action::SearchStaffRooms => "Failed to search rooms. Please try again.",
            Action::CreateWalkIn => "Failed to create booking. Please try again.",
            Action::AddRoom => "Failed to add room. Please try again.",
            Action::DeleteRoom => "Failed to delete room. Please try again.",
            Action::LoadBookings => "Failed to load bookings. Please try again.",
            Action::LoadRooms => "Failed to load rooms. Please try again.",
            Action::LoadGuests => "Failed to load guests. Please try again.",
            Action::LoadPriorities => "Failed to load priorities. Please try again.",
        }
    }
}

impl ErrorCode {
    /// Display message for this code, independent of context
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::MissingData => "Please fill in all required fields.",
            ErrorCode::InvalidDateFormat => {
                "Please enter dates in D MMMM YYYY format (e.g., 1 August 2025)."
            }
            ErrorCode::InvalidCheckIn => "Check-in date must be today or in the future.",
            ErrorCode::InvalidCheckOut => "Check-out date must be after check-in date.",
            ErrorCode::BookingNotFound => "Booking not found.",
            ErrorCode::GuestNotFound => "No guest found with that email.",
            ErrorCode::RoomNotFound => "The selected room does not exist.",
            ErrorCode::RoomBooked => "This room is already booked for the selected dates.",
            ErrorCode::NoRoomsAvailable => "No rooms available for the selected dates.",
            ErrorCode::InvalidModification => {
                "Cannot modify or cancel a checked-in or checked-out booking."
            }
            ErrorCode::BookingCancelled => {
                "This booking has been canceled and cannot be managed. \
                 Please check your booking reference or contact support."
            }
            ErrorCode::PaymentRequired => "Payment must be completed before modification.",
            ErrorCode::InvalidCheckInDate => "Check-in is only allowed on the check-in date.",
            ErrorCode::InvalidCheckout => "Booking must be checked-in to check out.",
            ErrorCode::InvalidPaymentUpdate => {
                "Cannot set payment to pending for checked-in or checked-out booking."
            }
            ErrorCode::InvalidBookingStatus => {
                "Can only delete checked-out or cancelled bookings."
            }
            ErrorCode::RoomActive => "Cannot delete room with active bookings.",
            ErrorCode::DuplicateRequest => "Duplicate booking request detected.",
            ErrorCode::RoomNumberExists => "Room number already exists.",
            ErrorCode::DbConnection => "Database connection issue. Please try again later.",
            ErrorCode::ServerError => "An unexpected server error occurred.",
            ErrorCode::Unknown => DEFAULT_MESSAGE,
        }
    }

    /// Display message for this code when `action` failed
    pub fn message_for(&self, action: Action) -> &'static str {
        match (self, action) {
            (ErrorCode::PaymentRequired, Action::CheckIn) => {
                "Payment must be completed before check-in."
            }
            (ErrorCode::PaymentRequired, Action::CheckOut) => {
                "Payment must be completed before check-out."
            }
            (ErrorCode::InvalidModification, Action::CheckIn | Action::CheckOut) => {
                "Cannot modify status of checked-in or checked-out booking."
            }
            (ErrorCode::InvalidModification, Action::ModifyBooking) => {
                "Cannot modify a checked-in or checked-out booking."
            }
            (ErrorCode::Unknown, action) => action.failure_message(),
            (code, _) => code.message(),
        }
    }
}

/// Resolve a raw wire code to its display message
pub fn resolve(code: &str) -> &'static str {
    ErrorCode::parse(code).message()
}

/// Resolve a raw wire code in the context of a failed action
pub fn resolve_for(code: &str, action: Action) -> &'static str {
    ErrorCode::parse(code).message_for(action)
}

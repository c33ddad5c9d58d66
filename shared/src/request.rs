//! Request bodies for the booking API
//!
//! Dates are `NaiveDate`, which serializes as `YYYY-MM-DD`: the only date
//! format that crosses the API boundary.

use crate::models::{BookingStatus, PaymentStatus, RoomType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Guest self-service
// =============================================================================

/// `POST /search_rooms?page=N`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRoomsRequest {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

/// `POST /create_booking`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub room_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    /// Idempotency token, one per submission attempt
    pub request_id: String,
}

/// `POST /manage_booking` and `POST /cancel_booking`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingLookupRequest {
    pub email: String,
    pub booking_reference: String,
}

/// `POST /modify_booking/{reference}`
///
/// Only fields that differ from the stored booking are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyBookingRequest {
    pub email: String,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<NaiveDate>,
}

impl ModifyBookingRequest {
    /// True when at least one booking field is being changed
    pub fn has_changes(&self) -> bool {
        self.room_id.is_some() || self.check_in_date.is_some() || self.check_out_date.is_some()
    }
}

/// `POST /available_rooms` (rooms a booking may move to)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeRoomsRequest {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub exclude_booking_id: i64,
    pub current_room_id: i64,
    pub room_type: RoomType,
}

// =============================================================================
// Receptionist
// =============================================================================

/// Query string of `GET /receptionist/bookings`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingListQuery {
    pub page: u32,
    /// `all` or a booking status
    pub status: String,
    /// `all`, `today`, `upcoming`, `past`
    pub filter: String,
    pub search_reference: String,
}

impl Default for BookingListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            status: "all".to_string(),
            filter: "all".to_string(),
            search_reference: String::new(),
        }
    }
}

/// `POST /receptionist/booking/update_status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub booking_id: i64,
    pub status: BookingStatus,
}

/// `POST /receptionist/bookings/checkout`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub booking_id: i64,
}

/// `POST /receptionist/booking/update_payment`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePaymentRequest {
    pub booking_id: i64,
    pub payment_status: PaymentStatus,
}

/// `POST /receptionist/rooms/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRoomSearchRequest {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_booking_id: Option<i64>,
}

/// `POST /receptionist/bookings/walkin`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkInRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub request_id: String,
}

/// `POST /receptionist/booking/modify/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffModifyRequest {
    pub booking_id: i64,
    pub email: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    /// `None` keeps the current room
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
}

/// `POST /receptionist/room/add` (form-encoded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRoomRequest {
    pub room_number: String,
    pub room_type: RoomType,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_modify_request_omits_unchanged_fields() {
        let req = ModifyBookingRequest {
            email: "ama@example.com".into(),
            request_id: "REQ1".into(),
            room_id: None,
            check_in_date: NaiveDate::from_ymd_opt(2025, 8, 2),
            check_out_date: None,
        };
        assert!(req.has_changes());
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"email": "ama@example.com", "request_id": "REQ1", "check_in_date": "2025-08-02"})
        );
    }

    #[test]
    fn test_status_update_uses_wire_status() {
        let req = UpdateStatusRequest {
            booking_id: 9,
            status: BookingStatus::CheckedIn,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"booking_id": 9, "status": "checked-in"})
        );
    }
}

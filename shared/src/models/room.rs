//! Room Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Room category, used both as a search filter and as a display grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Single,
    Double,
    Suite,
}

impl RoomType {
    /// Categories in tab order
    pub const ALL: [RoomType; 3] = [RoomType::Single, RoomType::Double, RoomType::Suite];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "Single",
            RoomType::Double => "Double",
            RoomType::Suite => "Suite",
        }
    }

    /// Case-insensitive parse of a tab label or form value
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational room status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Booked,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Booked => "booked",
            RoomStatus::Maintenance => "maintenance",
        }
    }
}

/// Room entity as returned by search and listing endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub room_type: RoomType,
    /// Price per night
    pub price: Decimal,
    #[serde(default)]
    pub status: RoomStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Candidate room offered when a guest changes an existing booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOption {
    pub id: i64,
    pub room_number: String,
    pub room_type: RoomType,
    pub price: Decimal,
    /// Set on the room the booking currently occupies
    #[serde(default)]
    pub is_current: bool,
}

/// Room summary embedded in a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRoom {
    pub id: i64,
    pub room_number: String,
    pub room_type: RoomType,
    pub price: Decimal,
}

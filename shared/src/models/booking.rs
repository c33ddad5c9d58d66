//! Booking Model

use super::room::BookingRoom;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking lifecycle status
///
/// `booked → checked-in → checked-out`; `cancelled` is terminal and reachable
/// only from `booked`. Transitions are decided by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Booked,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Booked => "booked",
            BookingStatus::CheckedIn => "checked-in",
            BookingStatus::CheckedOut => "checked-out",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Checked-in, checked-out and cancelled bookings are closed to guest changes
    pub fn is_locked(&self) -> bool {
        !matches!(self, BookingStatus::Booked)
    }

    /// No further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::CheckedOut | BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guest identity embedded in a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingGuest {
    #[serde(default)]
    pub id: Option<i64>,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Where a booking sits relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingTimeframe {
    Today,
    Upcoming,
    Past,
}

impl BookingTimeframe {
    pub fn label(&self) -> &'static str {
        match self {
            BookingTimeframe::Today => "Today",
            BookingTimeframe::Upcoming => "Upcoming",
            BookingTimeframe::Past => "Past",
        }
    }
}

/// Booking entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    /// Opaque guest-facing identifier
    pub booking_reference: String,
    pub guest: BookingGuest,
    pub room: BookingRoom,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
}

impl Booking {
    /// Guest self-service modification: paid and not yet checked in, out or cancelled
    pub fn can_modify(&self) -> bool {
        self.payment_status.is_paid() && !self.status.is_locked()
    }

    /// Guest self-service cancellation: not yet checked in, out or cancelled
    pub fn can_cancel(&self) -> bool {
        !self.status.is_locked()
    }

    /// Number of nights covered by the stay
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }

    pub fn timeframe(&self, today: NaiveDate) -> BookingTimeframe {
        if self.check_in_date > today {
            BookingTimeframe::Upcoming
        } else if self.check_out_date < today {
            BookingTimeframe::Past
        } else {
            BookingTimeframe::Today
        }
    }
}

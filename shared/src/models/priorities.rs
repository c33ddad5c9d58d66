//! Front desk priorities snapshot

use serde::{Deserialize, Serialize};

/// Daily counters for the receptionist priorities panel
///
/// Counters missing from the server payload read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Priorities {
    pub check_ins_today: u32,
    pub check_outs_today: u32,
    pub overdue_payments: u32,
    pub recent_bookings: u32,
    pub upcoming_check_ins: u32,
    pub total_bookings_today: u32,
}

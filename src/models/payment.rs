use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::seat::Seat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Upi,
    Netbanking,
}

/// Lifecycle of one payment attempt: Idle -> Processing -> Succeeded | Failed.
/// Succeeded and Failed are terminal for the attempt; a retry starts a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Idle,
    Processing,
    Succeeded,
    Failed,
}

/// Emitted once per successful attempt, consumed by the confirmation view.
#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    #[serde(rename = "bookingReference")]
    pub booking_reference: String,
    pub seats: Vec<Seat>,
    pub total: u32,
    pub currency: String,
    #[serde(rename = "paidAt")]
    pub paid_at: DateTime<Utc>,
}

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::booking::hhmm;
use crate::Record;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserBookingStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl fmt::Display for UserBookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserBookingStatus::Upcoming => write!(f, "upcoming"),
            UserBookingStatus::Completed => write!(f, "completed"),
            UserBookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A citizen's reservation of one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBooking {
    pub id: Uuid,
    pub user_id: String,
    pub booking_id: Uuid,
    pub slot_id: String,
    pub token_number: String,
    pub booking_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub status: UserBookingStatus,
    pub created_at: DateTime<Utc>,
}

impl UserBooking {
    pub fn is_upcoming(&self) -> bool {
        self.status == UserBookingStatus::Upcoming
    }

    /// Payload encoded in the receipt QR code.
    pub fn qr_payload(&self) -> String {
        format!("booking:{}", self.id)
    }
}

impl Record for UserBooking {
    fn id(&self) -> Uuid {
        self.id
    }
}

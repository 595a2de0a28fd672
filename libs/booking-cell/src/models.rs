use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use shared_models::booking::{hhmm, Booking, BookingSlot, DurationType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    pub available_dates: Vec<NaiveDate>,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub duration_per_person: u32,
    #[serde(default)]
    pub duration_type: DurationType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBookingRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub available_dates: Option<Vec<NaiveDate>>,
    #[serde(default, with = "hhmm::option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm::option")]
    pub end_time: Option<NaiveTime>,
    pub duration_per_person: Option<u32>,
    pub duration_type: Option<DurationType>,
}

/// Scheduling part of a booking, enough to lay out its slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotTemplate {
    pub available_dates: Vec<NaiveDate>,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub duration_per_person: u32,
    #[serde(default)]
    pub duration_type: DurationType,
}

impl SlotTemplate {
    pub fn duration_minutes(&self) -> u32 {
        self.duration_type.to_minutes(self.duration_per_person)
    }
}

impl From<&CreateBookingRequest> for SlotTemplate {
    fn from(request: &CreateBookingRequest) -> Self {
        Self {
            available_dates: request.available_dates.clone(),
            start_time: request.start_time,
            end_time: request.end_time,
            duration_per_person: request.duration_per_person,
            duration_type: request.duration_type,
        }
    }
}

impl From<&Booking> for SlotTemplate {
    fn from(booking: &Booking) -> Self {
        Self {
            available_dates: booking.available_dates.clone(),
            start_time: booking.start_time,
            end_time: booking.end_time,
            duration_per_person: booking.duration_per_person,
            duration_type: booking.duration_type,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingListQuery {
    pub available_only: Option<bool>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlotQuery {
    pub date: Option<NaiveDate>,
    pub available_only: Option<bool>,
}

/// A booking with its slot counts, as listed to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub total_slots: usize,
    pub booked_slots: usize,
    pub available_slots: usize,
}

impl From<Booking> for BookingDetails {
    fn from(booking: Booking) -> Self {
        Self {
            total_slots: booking.slots.len(),
            booked_slots: booking.booked_slot_count(),
            available_slots: booking.available_slot_count(),
            booking,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsByDate {
    pub date: NaiveDate,
    pub slots: Vec<BookingSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingUpdateOutcome {
    pub booking: BookingDetails,
    pub cancelled_reservations: usize,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),

    #[error("Booking not found")]
    NotFound,
}

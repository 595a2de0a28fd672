use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::reservation::{UserBooking, UserBookingStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub booking_id: Uuid,
    pub slot_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MyReservationsQuery {
    pub status: Option<UserBookingStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationSearchQuery {
    pub booking_id: Option<Uuid>,
    pub status: Option<UserBookingStatus>,
}

/// A reservation joined with the service it was made for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationDetails {
    #[serde(flatten)]
    pub reservation: UserBooking,
    pub service_name: Option<String>,
    pub location: Option<String>,
    pub qr_payload: String,
}

/// A citizen's reservations split the way the "My Bookings" page shows them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MyReservations {
    pub upcoming: Vec<ReservationDetails>,
    pub past: Vec<ReservationDetails>,
    pub cancelled: Vec<ReservationDetails>,
}

impl MyReservations {
    pub fn total(&self) -> usize {
        self.upcoming.len() + self.past.len() + self.cancelled.len()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ReservationError {
    #[error("Booking not found")]
    BookingNotFound,

    #[error("Slot not found")]
    SlotNotFound,

    #[error("This slot has already been booked")]
    SlotAlreadyBooked,

    #[error("Reservation not found")]
    NotFound,

    #[error("Unauthorized access to reservation")]
    Unauthorized,

    #[error("Reservation cannot be changed in current status: {0}")]
    InvalidStatusTransition(UserBookingStatus),

    #[error("Could not allocate a unique token number")]
    TokenExhausted,
}

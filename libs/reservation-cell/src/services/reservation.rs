use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use shared_database::{AppState, Table};
use shared_models::auth::User;
use shared_models::booking::Booking;
use shared_models::reservation::{UserBooking, UserBookingStatus};

use crate::models::{
    CreateReservationRequest, MyReservations, ReservationDetails, ReservationError, ReservationSearchQuery,
};
use crate::services::lifecycle::ReservationLifecycleService;
use crate::services::token::unique_token_number;

pub struct ReservationService {
    bookings: Table<Booking>,
    user_bookings: Table<UserBooking>,
    lifecycle: ReservationLifecycleService,
}

impl ReservationService {
    pub fn new(state: &AppState) -> Self {
        Self {
            bookings: state.db.bookings.clone(),
            user_bookings: state.db.user_bookings.clone(),
            lifecycle: ReservationLifecycleService::new(),
        }
    }

    /// Claims a free slot for `user` and issues its token.
    pub async fn book_slot(
        &self,
        user: &User,
        request: CreateReservationRequest,
    ) -> Result<ReservationDetails, ReservationError> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == request.booking_id)
            .ok_or(ReservationError::BookingNotFound)?;
        let (name, location) = (booking.name.clone(), booking.location.clone());
        let slot = booking.slot_mut(&request.slot_id).ok_or(ReservationError::SlotNotFound)?;

        if slot.is_booked {
            debug!("Slot {} already booked", slot.id);
            return Err(ReservationError::SlotAlreadyBooked);
        }

        let mut reservations = self.user_bookings.write().await;
        let token_number = {
            let issued: HashSet<&str> = reservations.iter().map(|r| r.token_number.as_str()).collect();
            unique_token_number(&issued)?
        };

        slot.is_booked = true;
        slot.booked_by = Some(user.id.clone());
        slot.token_number = Some(token_number.clone());

        let reservation = UserBooking {
            id: Uuid::new_v4(),
            user_id: user.id.clone(),
            booking_id: request.booking_id,
            slot_id: slot.id.clone(),
            token_number,
            booking_date: slot.date,
            start_time: slot.start_time,
            end_time: slot.end_time,
            status: UserBookingStatus::Upcoming,
            created_at: Utc::now(),
        };
        reservations.push(reservation.clone());

        info!("Reservation {} issued token {}", reservation.id, reservation.token_number);
        Ok(details(reservation, Some((name, location))))
    }

    pub async fn my_reservations(
        &self,
        user: &User,
        status: Option<UserBookingStatus>,
    ) -> MyReservations {
        let mut rows = self
            .user_bookings
            .filter(|r| r.user_id == user.id && status.map_or(true, |s| r.status == s))
            .await;
        rows.sort_by(|a, b| {
            (a.booking_date, a.start_time).cmp(&(b.booking_date, b.start_time))
        });

        let mut grouped = MyReservations::default();
        for row in self.with_services(rows).await {
            match row.reservation.status {
                UserBookingStatus::Upcoming => grouped.upcoming.push(row),
                UserBookingStatus::Completed => grouped.past.push(row),
                UserBookingStatus::Cancelled => grouped.cancelled.push(row),
            }
        }
        // Most recent first for history.
        grouped.past.reverse();
        grouped.cancelled.reverse();
        grouped
    }

    /// Visible to the owner and to administrators.
    pub async fn get_reservation(&self, user: &User, id: Uuid) -> Result<ReservationDetails, ReservationError> {
        let reservation = self.user_bookings.get(id).await.ok_or(ReservationError::NotFound)?;
        if reservation.user_id != user.id && !user.is_admin() {
            return Err(ReservationError::Unauthorized);
        }
        Ok(self.with_service(reservation).await)
    }

    pub async fn find_by_token(&self, token_number: &str) -> Result<ReservationDetails, ReservationError> {
        let wanted = token_number.trim().to_uppercase();
        let reservation = self
            .user_bookings
            .find(|r| r.token_number == wanted)
            .await
            .ok_or(ReservationError::NotFound)?;
        Ok(self.with_service(reservation).await)
    }

    pub async fn search(&self, query: &ReservationSearchQuery) -> Vec<ReservationDetails> {
        let mut rows = self
            .user_bookings
            .filter(|r| {
                query.booking_id.map_or(true, |id| r.booking_id == id)
                    && query.status.map_or(true, |s| r.status == s)
            })
            .await;
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.with_services(rows).await
    }

    /// Cancels an upcoming reservation and frees its slot.
    pub async fn cancel(&self, user: &User, id: Uuid) -> Result<ReservationDetails, ReservationError> {
        let mut bookings = self.bookings.write().await;
        let mut reservations = self.user_bookings.write().await;

        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ReservationError::NotFound)?;
        if reservation.user_id != user.id && !user.is_admin() {
            return Err(ReservationError::Unauthorized);
        }
        self.lifecycle
            .validate_status_transition(&reservation.status, &UserBookingStatus::Cancelled)?;
        reservation.status = UserBookingStatus::Cancelled;

        let booking = bookings.iter_mut().find(|b| b.id == reservation.booking_id);
        let service = booking.as_ref().map(|b| (b.name.clone(), b.location.clone()));
        if let Some(slot) = booking.and_then(|b| b.slot_mut(&reservation.slot_id)) {
            // The slot may have been regenerated and re-issued since.
            if slot.token_number.as_deref() == Some(reservation.token_number.as_str()) {
                slot.release();
            }
        }

        info!("Reservation {} cancelled by {}", id, user.id);
        Ok(details(reservation.clone(), service))
    }

    pub async fn complete(&self, id: Uuid) -> Result<ReservationDetails, ReservationError> {
        let mut reservations = self.user_bookings.write().await;
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ReservationError::NotFound)?;

        self.lifecycle
            .validate_status_transition(&reservation.status, &UserBookingStatus::Completed)?;
        reservation.status = UserBookingStatus::Completed;
        let reservation = reservation.clone();
        drop(reservations);

        info!("Reservation {} completed", id);
        Ok(self.with_service(reservation).await)
    }

    async fn with_service(&self, reservation: UserBooking) -> ReservationDetails {
        let service = self
            .bookings
            .get(reservation.booking_id)
            .await
            .map(|b| (b.name, b.location));
        details(reservation, service)
    }

    async fn with_services(&self, rows: Vec<UserBooking>) -> Vec<ReservationDetails> {
        let services: HashMap<Uuid, (String, String)> = self
            .bookings
            .all()
            .await
            .into_iter()
            .map(|b| (b.id, (b.name, b.location)))
            .collect();

        rows.into_iter()
            .map(|r| {
                let service = services.get(&r.booking_id).cloned();
                details(r, service)
            })
            .collect()
    }
}

fn details(reservation: UserBooking, service: Option<(String, String)>) -> ReservationDetails {
    let (service_name, location) = match service {
        Some((name, location)) => (Some(name), Some(location)),
        None => (None, None),
    };
    ReservationDetails {
        qr_payload: reservation.qr_payload(),
        service_name,
        location,
        reservation,
    }
}

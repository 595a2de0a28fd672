use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_database::{AppState, Table};
use shared_models::auth::User;
use shared_models::booking::{Booking, BookingSlot};
use shared_models::reservation::{UserBooking, UserBookingStatus};

use crate::models::{
    BookingError, BookingListQuery, CreateBookingRequest, SlotQuery, SlotTemplate, SlotsByDate,
    UpdateBookingRequest,
};
use crate::services::slots::{generate_slots, validate_template};

pub struct BookingService {
    bookings: Table<Booking>,
    user_bookings: Table<UserBooking>,
}

fn require_text(value: &str, field: &str) -> Result<String, BookingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BookingError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

impl BookingService {
    pub fn new(state: &AppState) -> Self {
        Self {
            bookings: state.db.bookings.clone(),
            user_bookings: state.db.user_bookings.clone(),
        }
    }

    pub async fn create_booking(&self, user: &User, request: CreateBookingRequest) -> Result<Booking, BookingError> {
        let name = require_text(&request.name, "Service name")?;
        let location = require_text(&request.location, "Location")?;
        let template = SlotTemplate::from(&request);
        validate_template(&template)?;

        let id = Uuid::new_v4();
        let slots = generate_slots(id, &template);

        let booking = Booking {
            id,
            name,
            description: request.description.trim().to_string(),
            location,
            available_dates: template.available_dates,
            start_time: template.start_time,
            end_time: template.end_time,
            duration_per_person: template.duration_per_person,
            duration_type: template.duration_type,
            created_by: user.id.clone(),
            created_at: Utc::now(),
            slots,
        };

        let booking = self.bookings.insert(booking).await;
        info!("Created booking {} with {} slots", booking.id, booking.slots.len());
        Ok(booking)
    }

    pub async fn list_bookings(&self, query: &BookingListQuery) -> Vec<Booking> {
        let available_only = query.available_only.unwrap_or(false);
        let needle = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        self.bookings
            .filter(|b| {
                if available_only && !b.has_available_slots() {
                    return false;
                }
                match &needle {
                    Some(needle) => {
                        b.name.to_lowercase().contains(needle) || b.location.to_lowercase().contains(needle)
                    }
                    None => true,
                }
            })
            .await
    }

    pub async fn get_booking(&self, id: Uuid) -> Result<Booking, BookingError> {
        self.bookings.get(id).await.ok_or(BookingError::NotFound)
    }

    /// Slots of one booking grouped per date, dates ascending.
    pub async fn get_slots(&self, id: Uuid, query: &SlotQuery) -> Result<Vec<SlotsByDate>, BookingError> {
        let booking = self.get_booking(id).await?;
        let available_only = query.available_only.unwrap_or(false);

        let mut grouped: BTreeMap<_, Vec<BookingSlot>> = BTreeMap::new();
        for slot in booking.slots {
            if query.date.is_some_and(|d| d != slot.date) || (available_only && slot.is_booked) {
                continue;
            }
            grouped.entry(slot.date).or_default().push(slot);
        }

        Ok(grouped
            .into_iter()
            .map(|(date, slots)| SlotsByDate { date, slots })
            .collect())
    }

    /// Applies the changes and lays the slots out again.
    ///
    /// A booked slot survives when the new grid has a slot with the same id and
    /// interval; otherwise its upcoming reservation is cancelled. Returns the
    /// updated booking and the number of reservations cancelled.
    pub async fn update_booking(&self, id: Uuid, request: UpdateBookingRequest) -> Result<(Booking, usize), BookingError> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings.iter_mut().find(|b| b.id == id).ok_or(BookingError::NotFound)?;

        let mut next = booking.clone();
        if let Some(name) = request.name {
            next.name = require_text(&name, "Service name")?;
        }
        if let Some(location) = request.location {
            next.location = require_text(&location, "Location")?;
        }
        if let Some(description) = request.description {
            next.description = description.trim().to_string();
        }
        if let Some(dates) = request.available_dates {
            next.available_dates = dates;
        }
        if let Some(start) = request.start_time {
            next.start_time = start;
        }
        if let Some(end) = request.end_time {
            next.end_time = end;
        }
        if let Some(duration) = request.duration_per_person {
            next.duration_per_person = duration;
        }
        if let Some(kind) = request.duration_type {
            next.duration_type = kind;
        }

        let template = SlotTemplate::from(&next);
        validate_template(&template)?;
        next.slots = generate_slots(id, &template);

        let mut lost_slots = Vec::new();
        for old in booking.slots.iter().filter(|s| s.is_booked) {
            match next.slots.iter_mut().find(|s| s.id == old.id && s.same_interval(old)) {
                Some(kept) => {
                    kept.is_booked = true;
                    kept.booked_by = old.booked_by.clone();
                    kept.token_number = old.token_number.clone();
                }
                None => lost_slots.push(old.id.clone()),
            }
        }

        let mut cancelled = 0;
        if !lost_slots.is_empty() {
            let mut reservations = self.user_bookings.write().await;
            for reservation in reservations.iter_mut().filter(|r| {
                r.booking_id == id && r.is_upcoming() && lost_slots.contains(&r.slot_id)
            }) {
                reservation.status = UserBookingStatus::Cancelled;
                cancelled += 1;
            }
            warn!("Booking {} update cancelled {} reservations", id, cancelled);
        }

        *booking = next;
        info!("Updated booking {}", id);
        Ok((booking.clone(), cancelled))
    }

    /// Removes the booking together with every reservation that references it.
    pub async fn delete_booking(&self, id: Uuid) -> Result<usize, BookingError> {
        let mut bookings = self.bookings.write().await;
        let index = bookings.iter().position(|b| b.id == id).ok_or(BookingError::NotFound)?;
        bookings.remove(index);

        let removed = {
            let mut reservations = self.user_bookings.write().await;
            let before = reservations.len();
            reservations.retain(|r| r.booking_id != id);
            before - reservations.len()
        };

        info!("Deleted booking {} and {} reservations", id, removed);
        Ok(removed)
    }

    /// Slot layout for a template that has not been saved.
    pub fn preview_slots(&self, template: &SlotTemplate) -> Result<Vec<BookingSlot>, BookingError> {
        validate_template(template)?;
        let slots = generate_slots(Uuid::nil(), template);
        debug!("Previewed {} slots", slots.len());
        Ok(slots)
    }
}

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime, Timelike};
use tracing::debug;
use uuid::Uuid;

use shared_models::booking::BookingSlot;

use crate::models::{BookingError, SlotTemplate};

fn minutes_of(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight() / 60
}

fn time_at(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_num_seconds_from_midnight_opt(minutes * 60, 0)
}

pub fn slot_id(booking_id: Uuid, date: NaiveDate, index: usize) -> String {
    format!("{}-{}-{}", booking_id, date.format("%Y-%m-%d"), index)
}

/// Rejects templates that cannot produce a sensible slot grid.
pub fn validate_template(template: &SlotTemplate) -> Result<(), BookingError> {
    if template.available_dates.is_empty() {
        return Err(BookingError::Validation("Select at least one available date".to_string()));
    }
    if template.start_time >= template.end_time {
        return Err(BookingError::Validation("Start time must be before end time".to_string()));
    }
    if template.duration_per_person == 0 {
        return Err(BookingError::Validation("Duration per person must be greater than zero".to_string()));
    }
    Ok(())
}

/// Splits each available date's window into back-to-back slots.
///
/// Dates are deduplicated and walked in ascending order; slot indices restart
/// at zero for every date. A remainder shorter than one slot is dropped, and
/// slots never run past midnight.
pub fn generate_slots(booking_id: Uuid, template: &SlotTemplate) -> Vec<BookingSlot> {
    let duration = template.duration_minutes();
    if duration == 0 {
        return Vec::new();
    }

    let window_start = minutes_of(template.start_time);
    let window_end = minutes_of(template.end_time);
    let dates: BTreeSet<NaiveDate> = template.available_dates.iter().copied().collect();

    let mut slots = Vec::new();
    for date in dates {
        let mut current = window_start;
        let mut index = 0;

        while current.saturating_add(duration) <= window_end {
            let slot_end = current + duration;
            let (Some(start_time), Some(end_time)) = (time_at(current), time_at(slot_end)) else {
                break;
            };

            slots.push(BookingSlot {
                id: slot_id(booking_id, date, index),
                booking_id,
                date,
                start_time,
                end_time,
                is_booked: false,
                booked_by: None,
                token_number: None,
            });

            index += 1;
            current = slot_end;
        }
    }

    debug!("Generated {} slots for booking {}", slots.len(), booking_id);
    slots
}

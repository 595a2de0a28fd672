//! Pure aggregations over store snapshots.

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate, Timelike};
use uuid::Uuid;

use shared_models::booking::Booking;
use shared_models::reservation::UserBooking;

use crate::models::{
    AnalyticsError, AnalyticsSummary, DailyCount, HourlyCount, RecentBookingRow, RecentBookingsPage,
    ServiceUsage, DEFAULT_PAGE_SIZE, MAX_DAILY_WINDOW, PAGE_SIZES,
};

pub fn summarize(bookings: &[Booking], reservations: &[UserBooking], notices: usize) -> AnalyticsSummary {
    let total_slots: usize = bookings.iter().map(|b| b.slots.len()).sum();
    let booked_slots: usize = bookings.iter().map(|b| b.booked_slot_count()).sum();

    AnalyticsSummary {
        total_bookings: bookings.len(),
        total_slots,
        booked_slots,
        available_slots: total_slots - booked_slots,
        active_notices: notices,
        total_reservations: reservations.len(),
        upcoming_reservations: reservations.iter().filter(|r| r.is_upcoming()).count(),
    }
}

/// Reservation count per service, busiest first; ties keep creation order.
pub fn service_distribution(bookings: &[Booking], reservations: &[UserBooking]) -> Vec<ServiceUsage> {
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for reservation in reservations {
        *counts.entry(reservation.booking_id).or_default() += 1;
    }

    let mut usage: Vec<ServiceUsage> = bookings
        .iter()
        .map(|b| ServiceUsage {
            booking_id: b.id,
            name: b.name.clone(),
            reservations: counts.get(&b.id).copied().unwrap_or(0),
        })
        .collect();
    usage.sort_by(|a, b| b.reservations.cmp(&a.reservations));
    usage
}

/// Reservations created on each of the `days` days ending `today`, oldest first.
pub fn daily_counts(reservations: &[UserBooking], today: NaiveDate, days: u32) -> Result<Vec<DailyCount>, AnalyticsError> {
    if days == 0 || days > MAX_DAILY_WINDOW {
        return Err(AnalyticsError::InvalidWindow(days));
    }

    let first = today - Duration::days(i64::from(days) - 1);
    let mut counts: BTreeMap<NaiveDate, usize> = (0..days)
        .map(|offset| (first + Duration::days(i64::from(offset)), 0))
        .collect();

    for reservation in reservations {
        if let Some(count) = counts.get_mut(&reservation.created_at.date_naive()) {
            *count += 1;
        }
    }

    Ok(counts
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect())
}

/// Reservations per slot start hour, for hours that have any.
pub fn peak_hours(reservations: &[UserBooking]) -> Vec<HourlyCount> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for reservation in reservations {
        *counts.entry(reservation.start_time.hour()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(hour, count)| HourlyCount {
            hour,
            label: format!("{:02}:00", hour),
            count,
        })
        .collect()
}

pub fn page_size(requested: Option<usize>) -> Result<usize, AnalyticsError> {
    match requested {
        None => Ok(DEFAULT_PAGE_SIZE),
        Some(size) if PAGE_SIZES.contains(&size) => Ok(size),
        Some(size) => Err(AnalyticsError::InvalidPageSize(size)),
    }
}

/// Filters `rows` by a case-insensitive `search` over name, service and
/// status, then cuts out one page. Page numbers start at 1.
pub fn paginate(
    rows: Vec<RecentBookingRow>,
    search: Option<&str>,
    page: usize,
    per_page: usize,
) -> RecentBookingsPage {
    let needle = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty());
    let matching: Vec<RecentBookingRow> = match needle {
        Some(needle) => rows
            .into_iter()
            .filter(|row| {
                row.user_name.to_lowercase().contains(&needle)
                    || row.service.to_lowercase().contains(&needle)
                    || row.status.to_string().contains(&needle)
            })
            .collect(),
        None => rows,
    };

    let total = matching.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    RecentBookingsPage {
        rows: matching.into_iter().skip((page - 1) * per_page).take(per_page).collect(),
        page,
        per_page,
        total,
        total_pages,
    }
}

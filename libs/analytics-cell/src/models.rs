use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::notice::Notice;
use shared_models::reservation::UserBookingStatus;

pub const DEFAULT_DAILY_WINDOW: u32 = 30;
pub const MAX_DAILY_WINDOW: u32 = 365;
pub const PAGE_SIZES: [usize; 3] = [5, 10, 25];
pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DASHBOARD_NOTICE_COUNT: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub total_bookings: usize,
    pub total_slots: usize,
    pub booked_slots: usize,
    pub available_slots: usize,
    pub active_notices: usize,
    pub total_reservations: usize,
    pub upcoming_reservations: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceUsage {
    pub booking_id: Uuid,
    pub name: String,
    pub reservations: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HourlyCount {
    pub hour: u32,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentBookingRow {
    pub reservation_id: Uuid,
    pub user_name: String,
    pub service: String,
    pub date: NaiveDate,
    pub status: UserBookingStatus,
    pub token_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentBookingsPage {
    pub rows: Vec<RecentBookingRow>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub upcoming_reservations: usize,
    pub available_services: usize,
    pub latest_notices: Vec<Notice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalyticsError {
    #[error("Page size must be one of 5, 10 or 25")]
    InvalidPageSize(usize),

    #[error("Days must be between 1 and {}", MAX_DAILY_WINDOW)]
    InvalidWindow(u32),
}

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_database::{AppState, Database};
use shared_models::auth::User;

use crate::models::{
    AnalyticsError, AnalyticsSummary, DailyCount, DashboardSummary, HourlyCount, RecentBookingRow,
    RecentBookingsPage, RecentQuery, ServiceUsage, DASHBOARD_NOTICE_COUNT, DEFAULT_DAILY_WINDOW,
};
use crate::services::report;

pub struct AnalyticsService {
    db: Database,
}

impl AnalyticsService {
    pub fn new(state: &AppState) -> Self {
        Self { db: state.db.clone() }
    }

    pub async fn summary(&self) -> AnalyticsSummary {
        let bookings = self.db.bookings.all().await;
        let reservations = self.db.user_bookings.all().await;
        let notices = self.db.notices.len().await;
        report::summarize(&bookings, &reservations, notices)
    }

    pub async fn service_distribution(&self) -> Vec<ServiceUsage> {
        let bookings = self.db.bookings.all().await;
        let reservations = self.db.user_bookings.all().await;
        report::service_distribution(&bookings, &reservations)
    }

    pub async fn daily(&self, days: Option<u32>) -> Result<Vec<DailyCount>, AnalyticsError> {
        let reservations = self.db.user_bookings.all().await;
        report::daily_counts(&reservations, Utc::now().date_naive(), days.unwrap_or(DEFAULT_DAILY_WINDOW))
    }

    pub async fn peak_hours(&self) -> Vec<HourlyCount> {
        report::peak_hours(&self.db.user_bookings.all().await)
    }

    /// Recent reservations, newest first, with the citizen's name and service resolved.
    pub async fn recent(&self, query: &RecentQuery) -> Result<RecentBookingsPage, AnalyticsError> {
        let per_page = report::page_size(query.per_page)?;

        let names: HashMap<String, String> = self
            .db
            .accounts
            .all()
            .await
            .into_iter()
            .map(|a| (a.id.to_string(), a.full_name))
            .collect();
        let services: HashMap<Uuid, String> = self
            .db
            .bookings
            .all()
            .await
            .into_iter()
            .map(|b| (b.id, b.name))
            .collect();

        let mut reservations = self.db.user_bookings.all().await;
        reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let rows = reservations
            .into_iter()
            .map(|r| RecentBookingRow {
                reservation_id: r.id,
                user_name: names.get(&r.user_id).cloned().unwrap_or_else(|| "Unknown user".to_string()),
                service: services.get(&r.booking_id).cloned().unwrap_or_else(|| "Unknown service".to_string()),
                date: r.booking_date,
                status: r.status,
                token_number: r.token_number,
            })
            .collect();

        let page = report::paginate(rows, query.search.as_deref(), query.page.unwrap_or(1), per_page);
        debug!("Recent bookings page {}/{} ({} rows)", page.page, page.total_pages, page.total);
        Ok(page)
    }

    /// Home page numbers for the signed-in user.
    pub async fn dashboard(&self, user: &User) -> DashboardSummary {
        let upcoming_reservations = self
            .db
            .user_bookings
            .filter(|r| r.user_id == user.id && r.is_upcoming())
            .await
            .len();
        let available_services = self.db.bookings.filter(|b| b.has_available_slots()).await.len();

        let mut latest_notices = self.db.notices.all().await;
        latest_notices.truncate(DASHBOARD_NOTICE_COUNT);

        DashboardSummary {
            upcoming_reservations,
            available_services,
            latest_notices,
        }
    }
}

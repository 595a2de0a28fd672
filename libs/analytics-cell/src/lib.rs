// =====================================================================================
// ANALYTICS CELL
// =====================================================================================
//
// Read-only reporting over bookings, reservations and notices for the admin
// dashboard, plus the small summary shown on the citizen home page.

pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

pub use models::*;
pub use router::analytics_routes;
pub use services::AnalyticsService;

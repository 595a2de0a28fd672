pub mod analytics;
pub mod report;

pub use analytics::AnalyticsService;

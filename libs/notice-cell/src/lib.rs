pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

pub use models::*;
pub use router::notice_routes;

pub mod account;
pub mod auth;
pub mod booking;
pub mod error;
pub mod forum;
pub mod notice;
pub mod reservation;

use uuid::Uuid;

/// Anything stored in an in-memory table is addressed by a UUID.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
}

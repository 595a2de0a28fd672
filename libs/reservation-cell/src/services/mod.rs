pub mod lifecycle;
pub mod reservation;
pub mod token;

pub use lifecycle::ReservationLifecycleService;
pub use reservation::ReservationService;

use tracing::{debug, info, warn};

use shared_models::reservation::UserBookingStatus;

use crate::models::ReservationError;

pub struct ReservationLifecycleService;

impl Default for ReservationLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed
    pub fn validate_status_transition(
        &self,
        current_status: &UserBookingStatus,
        new_status: &UserBookingStatus,
    ) -> Result<(), ReservationError> {
        debug!("Validating status transition from {} to {}", current_status, new_status);

        if !self.get_valid_transitions(current_status).contains(new_status) {
            warn!("Invalid status transition attempted: {} -> {}", current_status, new_status);
            return Err(ReservationError::InvalidStatusTransition(*current_status));
        }

        info!("Status transition validated: {} -> {}", current_status, new_status);
        Ok(())
    }

    pub fn get_valid_transitions(&self, current_status: &UserBookingStatus) -> Vec<UserBookingStatus> {
        match current_status {
            UserBookingStatus::Upcoming => vec![UserBookingStatus::Completed, UserBookingStatus::Cancelled],
            // Terminal states
            UserBookingStatus::Completed | UserBookingStatus::Cancelled => vec![],
        }
    }

    pub fn is_terminal(&self, status: &UserBookingStatus) -> bool {
        self.get_valid_transitions(status).is_empty()
    }
}

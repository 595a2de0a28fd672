pub mod memory;
pub mod seed;
pub mod state;

pub use memory::{Database, Table};
pub use state::AppState;

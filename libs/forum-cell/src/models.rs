use serde::{Deserialize, Serialize};

use shared_models::forum::ServiceCategory;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub category: Option<ServiceCategory>,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostQuery {
    pub category: Option<ServiceCategory>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ForumError {
    #[error("Please select a category and enter your feedback")]
    MissingFields,
}

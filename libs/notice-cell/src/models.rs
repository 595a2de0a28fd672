use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoticeRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoticeQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum NoticeError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Notice not found")]
    NotFound,
}

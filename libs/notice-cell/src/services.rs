use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use shared_database::{AppState, Table};
use shared_models::auth::User;
use shared_models::notice::Notice;

use crate::models::{CreateNoticeRequest, NoticeError};

/// Notices are kept newest first.
pub struct NoticeService {
    notices: Table<Notice>,
}

impl NoticeService {
    pub fn new(state: &AppState) -> Self {
        Self {
            notices: state.db.notices.clone(),
        }
    }

    pub async fn create_notice(&self, user: &User, request: CreateNoticeRequest) -> Result<Notice, NoticeError> {
        let title = request.title.trim();
        let description = request.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(NoticeError::MissingFields);
        }

        let notice = self
            .notices
            .insert_front(Notice {
                id: Uuid::new_v4(),
                title: title.to_string(),
                description: description.to_string(),
                created_by: user.id.clone(),
                created_at: Utc::now(),
            })
            .await;

        info!("Published notice {}", notice.id);
        Ok(notice)
    }

    pub async fn list_notices(&self, limit: Option<usize>) -> Vec<Notice> {
        let mut notices = self.notices.all().await;
        if let Some(limit) = limit {
            notices.truncate(limit);
        }
        notices
    }

    pub async fn get_notice(&self, id: Uuid) -> Result<Notice, NoticeError> {
        self.notices.get(id).await.ok_or(NoticeError::NotFound)
    }

    pub async fn delete_notice(&self, id: Uuid) -> Result<Notice, NoticeError> {
        let removed = self.notices.remove(id).await.ok_or(NoticeError::NotFound)?;
        info!("Deleted notice {}", id);
        Ok(removed)
    }
}

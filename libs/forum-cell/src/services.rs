use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use shared_database::{AppState, Table};
use shared_models::account::Account;
use shared_models::auth::User;
use shared_models::forum::{ForumPost, ServiceCategory};

use crate::models::{CreatePostRequest, ForumError};

const ANONYMOUS_AUTHOR: &str = "Citizen";

pub struct ForumService {
    posts: Table<ForumPost>,
    accounts: Table<Account>,
}

impl ForumService {
    pub fn new(state: &AppState) -> Self {
        Self {
            posts: state.db.forum_posts.clone(),
            accounts: state.db.accounts.clone(),
        }
    }

    pub async fn create_post(&self, user: &User, request: CreatePostRequest) -> Result<ForumPost, ForumError> {
        let feedback = request.feedback.trim();
        let category = match request.category {
            Some(category) if !feedback.is_empty() => category,
            _ => return Err(ForumError::MissingFields),
        };

        let name = match self.stored_name(user).await {
            Some(name) => name,
            None => user.full_name().unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
        };

        let post = self
            .posts
            .insert_front(ForumPost {
                id: Uuid::new_v4(),
                author_id: Some(user.id.clone()),
                name,
                category,
                feedback: feedback.to_string(),
                created_at: Utc::now(),
            })
            .await;

        info!("Forum post {} in {}", post.id, post.category);
        Ok(post)
    }

    /// Current name on the caller's account, which outlives the token's metadata
    /// after a profile update.
    async fn stored_name(&self, user: &User) -> Option<String> {
        let id = Uuid::parse_str(&user.id).ok()?;
        let account = self.accounts.get(id).await?;
        let name = account.full_name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    /// Newest first, optionally narrowed to one category.
    pub async fn list_posts(&self, category: Option<ServiceCategory>) -> Vec<ForumPost> {
        let mut posts = self
            .posts
            .filter(|p| category.map_or(true, |c| p.category == c))
            .await;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

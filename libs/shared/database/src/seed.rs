use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use shared_models::forum::{ForumPost, ServiceCategory};
use shared_models::notice::Notice;

use crate::memory::Database;

/// Demo content shown to first-time visitors.
pub async fn seed_demo_data(db: &Database) {
    let now = Utc::now();

    // Newest first, matching how notices are listed.
    db.notices.insert(Notice {
        id: Uuid::new_v4(),
        title: "Holiday Schedule Notice".to_string(),
        description: "Please note that our offices will be closed on upcoming public holidays. Online services will remain available.".to_string(),
        created_by: "admin".to_string(),
        created_at: now - Duration::days(1),
    }).await;
    db.notices.insert(Notice {
        id: Uuid::new_v4(),
        title: "New Online Services Available".to_string(),
        description: "We are pleased to announce the launch of new online services for citizens including passport renewal and birth certificate applications.".to_string(),
        created_by: "admin".to_string(),
        created_at: now - Duration::days(2),
    }).await;

    db.forum_posts.insert(ForumPost {
        id: Uuid::new_v4(),
        author_id: None,
        name: "Jane Citizen".to_string(),
        category: ServiceCategory::Healthcare,
        feedback: "The new appointment system is very helpful!".to_string(),
        created_at: now - Duration::hours(2),
    }).await;
    db.forum_posts.insert(ForumPost {
        id: Uuid::new_v4(),
        author_id: None,
        name: "John Doe".to_string(),
        category: ServiceCategory::Transport,
        feedback: "Bus schedules need to be updated more frequently.".to_string(),
        created_at: now - Duration::days(1),
    }).await;

    info!("Seeded demo notices and forum posts");
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::Record;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
    #[serde(rename = "Visa Services", alias = "visa_services")]
    VisaServices,
    #[serde(alias = "healthcare")]
    Healthcare,
    #[serde(alias = "transport")]
    Transport,
    #[serde(alias = "education")]
    Education,
    #[serde(alias = "housing")]
    Housing,
    #[serde(alias = "other")]
    Other,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 6] = [
        ServiceCategory::VisaServices,
        ServiceCategory::Healthcare,
        ServiceCategory::Transport,
        ServiceCategory::Education,
        ServiceCategory::Housing,
        ServiceCategory::Other,
    ];
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ServiceCategory::VisaServices => "Visa Services",
            ServiceCategory::Healthcare => "Healthcare",
            ServiceCategory::Transport => "Transport",
            ServiceCategory::Education => "Education",
            ServiceCategory::Housing => "Housing",
            ServiceCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Citizen feedback posted to the community forum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: Uuid,
    pub author_id: Option<String>,
    pub name: String,
    pub category: ServiceCategory,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}

impl Record for ForumPost {
    fn id(&self) -> Uuid {
        self.id
    }
}

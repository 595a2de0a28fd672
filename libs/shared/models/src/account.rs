use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::Role;
use crate::Record;

/// Stored account. Citizens carry NIC/address/date of birth, department
/// accounts carry a department id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub nic: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub photo_url: Option<String>,
    pub role: Role,
    pub department_id: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            nic: self.nic.clone(),
            address: self.address.clone(),
            date_of_birth: self.date_of_birth,
            photo_url: self.photo_url.clone(),
            role: self.role,
            department_id: self.department_id.clone(),
        }
    }
}

impl Record for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub nic: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub photo_url: Option<String>,
    pub role: Role,
    pub department_id: Option<String>,
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared_models::account::AccountProfile;
use shared_models::auth::Role;

// Form fields default to empty so a missing field reports the same
// "fill in all fields" message as a blank one.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterCitizenRequest {
    #[serde(default)]
    pub nic: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub address: String,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterDepartmentRequest {
    #[serde(default)]
    pub department_email: String,
    #[serde(default)]
    pub department_id: String,
    #[serde(default)]
    pub department_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_login_role")]
    pub role: Role,
}

fn default_login_role() -> Role {
    Role::Citizen
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub photo_url: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_in_hours: i64,
    pub user: AccountProfile,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("This account is not registered as {0}")]
    RoleMismatch(Role),

    #[error("Account not found")]
    AccountNotFound,

    #[error("Token error: {0}")]
    Token(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::{AppState, Table};
use shared_models::account::{Account, AccountProfile};
use shared_models::auth::{Role, User};
use shared_utils::jwt::{issue_token, user_metadata};

use crate::models::{
    AuthError, AuthResponse, LoginRequest, RegisterCitizenRequest, RegisterDepartmentRequest,
    UpdateProfileRequest,
};
use crate::services::password::PasswordService;
use crate::services::validation::{validate_citizen, validate_department, validate_password};

pub struct AccountService {
    accounts: Table<Account>,
    config: Arc<AppConfig>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl AccountService {
    pub fn new(state: &AppState) -> Self {
        Self {
            accounts: state.db.accounts.clone(),
            config: Arc::clone(&state.config),
        }
    }

    pub async fn register_citizen(&self, request: RegisterCitizenRequest) -> Result<AuthResponse, AuthError> {
        validate_citizen(&request)?;

        let account = Account {
            id: Uuid::new_v4(),
            email: normalize_email(&request.email),
            full_name: request.full_name.trim().to_string(),
            nic: Some(request.nic.trim().to_string()),
            address: Some(request.address.trim().to_string()),
            date_of_birth: request.date_of_birth,
            photo_url: None,
            role: Role::Citizen,
            department_id: None,
            password_hash: Some(self.hash(&request.password)?),
            created_at: Utc::now(),
        };

        let account = self.insert_unique(account).await?;
        info!("Registered citizen account {}", account.id);
        self.session_for(&account)
    }

    pub async fn register_department(&self, request: RegisterDepartmentRequest) -> Result<AuthResponse, AuthError> {
        validate_department(&request)?;

        let account = Account {
            id: Uuid::new_v4(),
            email: normalize_email(&request.department_email),
            full_name: request.department_name.trim().to_string(),
            nic: None,
            address: None,
            date_of_birth: None,
            photo_url: None,
            role: Role::Admin,
            department_id: Some(request.department_id.trim().to_string()),
            password_hash: Some(self.hash(&request.password)?),
            created_at: Utc::now(),
        };

        let account = self.insert_unique(account).await?;
        info!("Registered department account {}", account.id);
        self.session_for(&account)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AuthError::Validation("Please fill in all fields".to_string()));
        }

        let email = normalize_email(&request.email);
        let existing = self.accounts.find(|a| a.email == email).await;

        let account = match existing {
            Some(account) => {
                if let Some(hash) = &account.password_hash {
                    let matches = PasswordService::verify_password(&request.password, hash)
                        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
                    if !matches {
                        debug!("Password mismatch for {}", email);
                        return Err(AuthError::InvalidCredentials);
                    }
                }
                if account.role != request.role {
                    return Err(AuthError::RoleMismatch(request.role));
                }
                account
            }
            None if self.config.allow_mock_login => {
                warn!("Unknown email {}, issuing mock {} account", email, request.role);
                self.insert_unique(mock_account(&email, request.role)).await?
            }
            None => return Err(AuthError::InvalidCredentials),
        };

        debug!("Login succeeded for account {}", account.id);
        self.session_for(&account)
    }

    pub async fn get_profile(&self, user: &User) -> Result<AccountProfile, AuthError> {
        let account = self.account_for(user).await?;
        Ok(account.profile())
    }

    pub async fn update_profile(
        &self,
        user: &User,
        request: UpdateProfileRequest,
    ) -> Result<AccountProfile, AuthError> {
        let account = self.account_for(user).await?;

        let password_hash = match request.password.as_deref() {
            Some(password) => {
                validate_password(password)?;
                Some(self.hash(password)?)
            }
            None => None,
        };

        let full_name = non_empty(request.full_name);
        let address = non_empty(request.address);
        let photo_url = non_empty(request.photo_url);

        let updated = self.accounts.update(account.id, |a| {
            if let Some(name) = full_name {
                a.full_name = name;
            }
            if let Some(address) = address {
                a.address = Some(address);
            }
            if let Some(url) = photo_url {
                a.photo_url = Some(url);
            }
            if let Some(hash) = password_hash {
                a.password_hash = Some(hash);
            }
        })
        .await
        .ok_or(AuthError::AccountNotFound)?;

        info!("Updated profile for account {}", updated.id);
        Ok(updated.profile())
    }

    async fn account_for(&self, user: &User) -> Result<Account, AuthError> {
        let id = Uuid::parse_str(&user.id).map_err(|_| AuthError::AccountNotFound)?;
        self.accounts.get(id).await.ok_or(AuthError::AccountNotFound)
    }

    async fn insert_unique(&self, account: Account) -> Result<Account, AuthError> {
        let mut rows = self.accounts.write().await;
        if rows.iter().any(|a| a.email == account.email) {
            return Err(AuthError::EmailTaken);
        }
        rows.push(account.clone());
        Ok(account)
    }

    fn hash(&self, password: &str) -> Result<String, AuthError> {
        PasswordService::hash_password(password).map_err(|e| AuthError::PasswordHash(e.to_string()))
    }

    fn session_for(&self, account: &Account) -> Result<AuthResponse, AuthError> {
        let user = principal(account);
        let token = issue_token(&user, &self.config.jwt_secret, self.config.token_ttl_hours)
            .map_err(AuthError::Token)?;

        Ok(AuthResponse {
            token,
            expires_in_hours: self.config.token_ttl_hours,
            user: account.profile(),
        })
    }
}

/// Token principal for a stored account.
pub fn principal(account: &Account) -> User {
    User {
        id: account.id.to_string(),
        email: Some(account.email.clone()),
        role: Some(account.role.as_str().to_string()),
        metadata: Some(user_metadata(&account.full_name)),
        created_at: Some(account.created_at),
    }
}

/// Profile handed out when mock login meets an unknown email.
fn mock_account(email: &str, role: Role) -> Account {
    let (full_name, nic, department_id, address, date_of_birth) = match role {
        Role::Admin => ("Government Official", "GOV123456", Some("DEPT001".to_string()), None, None),
        Role::Citizen => (
            "John Doe",
            "123456789V",
            None,
            Some("123 Main Street, Colombo".to_string()),
            NaiveDate::from_ymd_opt(1990, 1, 1),
        ),
    };

    Account {
        id: Uuid::new_v4(),
        email: email.to_string(),
        full_name: full_name.to_string(),
        nic: Some(nic.to_string()),
        address,
        date_of_birth,
        photo_url: None,
        role,
        department_id,
        password_hash: None,
        created_at: Utc::now(),
    }
}

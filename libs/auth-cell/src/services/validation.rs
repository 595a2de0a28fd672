use std::sync::LazyLock;

use regex::Regex;

use crate::models::{AuthError, RegisterCitizenRequest, RegisterDepartmentRequest};

pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Passwords count as given when non-empty; whitespace is a valid password.
fn missing_password(password: &str, confirm_password: &str) -> bool {
    password.is_empty() || confirm_password.is_empty()
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::Validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

fn validate_passwords(password: &str, confirm_password: &str) -> Result<(), AuthError> {
    if password != confirm_password {
        return Err(AuthError::Validation("Passwords do not match".to_string()));
    }
    validate_password(password)
}

pub fn validate_citizen(request: &RegisterCitizenRequest) -> Result<(), AuthError> {
    let missing = [
        &request.nic,
        &request.email,
        &request.full_name,
        &request.address,
    ]
    .iter()
    .any(|v| blank(v))
        || missing_password(&request.password, &request.confirm_password)
        || request.date_of_birth.is_none();

    if missing {
        return Err(AuthError::Validation("Please fill in all fields".to_string()));
    }

    validate_passwords(&request.password, &request.confirm_password)?;

    if !is_valid_email(request.email.trim()) {
        return Err(AuthError::Validation("Please enter a valid email address".to_string()));
    }

    Ok(())
}

pub fn validate_department(request: &RegisterDepartmentRequest) -> Result<(), AuthError> {
    let missing = [
        &request.department_email,
        &request.department_id,
        &request.department_name,
    ]
    .iter()
    .any(|v| blank(v))
        || missing_password(&request.password, &request.confirm_password);

    if missing {
        return Err(AuthError::Validation("Please fill in all fields".to_string()));
    }

    validate_passwords(&request.password, &request.confirm_password)?;

    if !is_valid_email(request.department_email.trim()) {
        return Err(AuthError::Validation(
            "Please enter a valid department email address".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn citizen() -> RegisterCitizenRequest {
        RegisterCitizenRequest {
            nic: "123456789V".to_string(),
            email: "jane@example.com".to_string(),
            full_name: "Jane Citizen".to_string(),
            address: "1 Galle Road".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@c.d"));
    }

    #[test]
    fn test_valid_citizen_passes() {
        assert!(validate_citizen(&citizen()).is_ok());
    }

    #[test]
    fn test_missing_field_reported_first() {
        let request = RegisterCitizenRequest {
            address: String::new(),
            confirm_password: "different".to_string(),
            ..citizen()
        };
        assert_matches!(validate_citizen(&request), Err(AuthError::Validation(msg)) if msg == "Please fill in all fields");

        let request = RegisterCitizenRequest { date_of_birth: None, ..citizen() };
        assert_matches!(validate_citizen(&request), Err(AuthError::Validation(msg)) if msg == "Please fill in all fields");
    }

    #[test]
    fn test_whitespace_password_is_not_missing() {
        let request = RegisterCitizenRequest {
            password: "      ".to_string(),
            confirm_password: "      ".to_string(),
            ..citizen()
        };
        assert!(validate_citizen(&request).is_ok());

        let request = RegisterCitizenRequest {
            password: String::new(),
            confirm_password: String::new(),
            ..citizen()
        };
        assert_matches!(validate_citizen(&request), Err(AuthError::Validation(msg)) if msg == "Please fill in all fields");
    }

    #[test]
    fn test_password_rules() {
        let request = RegisterCitizenRequest {
            confirm_password: "secret2".to_string(),
            ..citizen()
        };
        assert_matches!(validate_citizen(&request), Err(AuthError::Validation(msg)) if msg == "Passwords do not match");

        let request = RegisterCitizenRequest {
            password: "abc".to_string(),
            confirm_password: "abc".to_string(),
            ..citizen()
        };
        assert_matches!(validate_citizen(&request), Err(AuthError::Validation(msg)) if msg == "Password must be at least 6 characters long");
    }

    #[test]
    fn test_department_email_message() {
        let request = RegisterDepartmentRequest {
            department_email: "not-an-email".to_string(),
            department_id: "DEPT001".to_string(),
            department_name: "Immigration".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };
        assert_matches!(
            validate_department(&request),
            Err(AuthError::Validation(msg)) if msg == "Please enter a valid department email address"
        );
    }
}

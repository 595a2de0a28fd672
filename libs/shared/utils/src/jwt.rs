use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use tracing::debug;
use shared_models::auth::{JwtClaims, JwtHeader, User};

type HmacSha256 = Hmac<Sha256>;

/// Signs an HS256 token for `user` that expires after `ttl_hours`.
pub fn issue_token(user: &User, jwt_secret: &str, ttl_hours: i64) -> Result<String, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    let now = Utc::now();
    let exp = now + Duration::hours(ttl_hours);

    let header = JwtHeader {
        alg: "HS256".to_string(),
        typ: "JWT".to_string(),
    };
    let claims = JwtClaims {
        sub: user.id.clone(),
        exp: Some(exp.timestamp().max(0) as u64),
        email: user.email.clone(),
        role: user.role.clone(),
        user_metadata: user.metadata.clone(),
        aud: Some("authenticated".to_string()),
        iat: Some(now.timestamp().max(0) as u64),
    };

    let header_json = serde_json::to_vec(&header).map_err(|e| e.to_string())?;
    let claims_json = serde_json::to_vec(&claims).map_err(|e| e.to_string())?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(claims_json)
    );

    let mut mac = HmacSha256::new_from_slice(jwt_secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    debug!("Issued token for user: {}", user.id);
    Ok(format!("{}.{}", signing_input, signature))
}

pub fn validate_token(token: &str, jwt_secret: &str) -> Result<User, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    // Split token into parts
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    let header_b64 = parts[0];
    let claims_b64 = parts[1];
    let signature_b64 = parts[2];

    let signature = match URL_SAFE_NO_PAD.decode(signature_b64) {
        Ok(sig) => sig,
        Err(e) => {
            debug!("Failed to decode signature: {}", e);
            return Err("Invalid signature encoding".to_string());
        }
    };

    let signature_string = format!("{}.{}", header_b64, claims_b64);

    let mut mac = match HmacSha256::new_from_slice(jwt_secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return Err("Failed to create HMAC".to_string()),
    };

    mac.update(signature_string.as_bytes());

    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return Err("Invalid token signature".to_string());
    }

    let claims_json = match URL_SAFE_NO_PAD.decode(claims_b64) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(json_str) => json_str,
            Err(_) => return Err("Invalid claims encoding".to_string()),
        },
        Err(_) => return Err("Invalid claims encoding".to_string()),
    };

    let claims: JwtClaims = match serde_json::from_str(&claims_json) {
        Ok(c) => c,
        Err(e) => {
            debug!("Failed to parse claims: {}", e);
            return Err("Invalid claims format".to_string());
        },
    };

    if let Some(exp) = claims.exp {
        let now = Utc::now().timestamp() as u64;
        if exp < now {
            debug!("Token expired at {} (now: {})", exp, now);
            return Err("Token expired".to_string());
        }
    }

    let created_at = claims.iat
        .and_then(|timestamp| Utc.timestamp_opt(timestamp as i64, 0).single());

    let user = User {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
        metadata: claims.user_metadata,
        created_at,
    };

    debug!("Token validated successfully for user: {}", user.id);
    Ok(user)
}

/// Metadata carried in the token so handlers can show the caller's name
/// without a table lookup.
pub fn user_metadata(full_name: &str) -> serde_json::Value {
    json!({ "full_name": full_name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{JwtTestUtils, TestUser};

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_issue_then_validate() {
        let user = TestUser::admin("dept@gov.lk").to_user();
        let token = issue_token(&user, SECRET, 1).unwrap();

        let decoded = validate_token(&token, SECRET).unwrap();
        assert_eq!(decoded.id, user.id);
        assert_eq!(decoded.role.as_deref(), Some("admin"));
        assert_eq!(decoded.full_name(), user.full_name());
        assert!(decoded.created_at.is_some());
    }

    #[test]
    fn test_issue_requires_secret() {
        let user = TestUser::default().to_user();
        assert_eq!(issue_token(&user, "", 1).unwrap_err(), "JWT secret is not set");
    }

    #[test]
    fn test_expired_token_rejected() {
        let user = TestUser::default();
        let token = JwtTestUtils::create_expired_token(&user, SECRET);
        assert_eq!(validate_token(&token, SECRET).unwrap_err(), "Token expired");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user = TestUser::default();
        let token = JwtTestUtils::create_invalid_signature_token(&user);
        assert_eq!(validate_token(&token, SECRET).unwrap_err(), "Invalid token signature");
    }

    #[test]
    fn test_malformed_token_rejected() {
        assert_eq!(validate_token("only.two", SECRET).unwrap_err(), "Invalid token format");
        assert!(validate_token(&JwtTestUtils::create_malformed_token(), SECRET).is_err());
    }
}

use std::env;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub server_port: u16,
    pub allow_mock_login: bool,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: 24,
            server_port: 3000,
            allow_mock_login: true,
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("JWT_SECRET not set, using empty value");
                    String::new()
                }),
            token_ttl_hours: parse_var("TOKEN_TTL_HOURS", defaults.token_ttl_hours),
            server_port: parse_var("SERVER_PORT", defaults.server_port),
            allow_mock_login: parse_var("ALLOW_MOCK_LOGIN", defaults.allow_mock_login),
            seed_demo_data: parse_var("SEED_DEMO_DATA", defaults.seed_demo_data),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty() && self.token_ttl_hours > 0
    }
}

fn parse_var<T: FromStr + std::fmt::Display + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", name, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {}", name, default);
            default
        }
    }
}

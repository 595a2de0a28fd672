use std::collections::HashSet;

use rand::Rng;

use crate::models::ReservationError;

pub const TOKEN_PREFIX: &str = "TOK";
const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const TOKEN_LENGTH: usize = 8;
const MAX_ATTEMPTS: usize = 32;

/// `TOK` followed by eight uppercase alphanumerics.
pub fn generate_token_number() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..TOKEN_LENGTH)
        .map(|_| TOKEN_CHARSET[rng.gen_range(0..TOKEN_CHARSET.len())] as char)
        .collect();
    format!("{}{}", TOKEN_PREFIX, suffix)
}

/// Draws tokens until one is not in `issued`.
pub fn unique_token_number(issued: &HashSet<&str>) -> Result<String, ReservationError> {
    (0..MAX_ATTEMPTS)
        .map(|_| generate_token_number())
        .find(|token| !issued.contains(token.as_str()))
        .ok_or(ReservationError::TokenExhausted)
}

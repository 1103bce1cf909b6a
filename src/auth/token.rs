use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// The single claim this client reads from the session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The authenticated user's unique identifier.
    pub id: i32,
}

/// Extracts the numeric user-id claim from a JWT without verifying it.
///
/// The client never holds the server's signing secret, so the token is
/// decoded with signature and expiry validation disabled; the server remains
/// the sole authority on token validity. Any decoding failure (malformed
/// token, missing claim) yields `-1`.
///
/// # Arguments
/// * `token` - The JWT string returned by the login endpoint.
pub fn extract_user_id(token: &str) -> i32 {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    match decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => data.claims.id,
        Err(_) => -1,
    }
}

use crate::error::{Error, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user_id as string
    pub sub: String,
    /// The user's email at issue time
    pub email: String,
    /// Expiration time as Unix timestamp
    pub exp: i64,
    /// Issued at time as Unix timestamp
    pub iat: i64,
}

/// Generates a signed identity token binding a user id and email.
///
/// # Example
/// ```rust,no_run
/// use crm_backend::services::jwt::generate_token;
/// use uuid::Uuid;
///
/// let user_id = Uuid::now_v7();
/// let token = generate_token(user_id, "user@example.com", "my-secret", 10_080)?;
/// # Ok::<(), crm_backend::error::Error>(())
/// ```
pub fn generate_token(
    user_id: Uuid,
    email: &str,
    secret: &str,
    expiration_minutes: i64,
) -> Result<String> {
    let now = Utc::now();
    let expiration = now + Duration::minutes(expiration_minutes);

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expiration.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| Error::Internal(format!("Failed to generate identity token: {}", e)))
}

/// Verifies a token's signature and expiry and returns its claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            Error::Unauthorized("Token has expired".to_string())
        }
        _ => Error::Unauthorized("Invalid token".to_string()),
    })?;

    Ok(token_data.claims)
}

/// Extracts the Bearer token from the Authorization header value.
pub fn extract_bearer_token(auth_header: Option<&str>) -> Result<String> {
    match auth_header {
        Some(header) if header.starts_with("Bearer ") => {
            let token = header[7..].to_string();
            if token.is_empty() {
                return Err(Error::Unauthorized("Empty token".to_string()));
            }
            Ok(token)
        }
        Some(_) => Err(Error::Unauthorized(
            "Invalid Authorization header format. Expected: 'Bearer <token>'".to_string(),
        )),
        None => Err(Error::Unauthorized(
            "Missing Authorization header".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-testing";

    #[test]
    fn test_generate_token() {
        let user_id = Uuid::now_v7();
        let token = generate_token(user_id, "user@example.com", SECRET, 15).unwrap();
        assert!(!token.is_empty());
        assert!(token.contains('.'));
    }

    #[test]
    fn test_verify_token_valid() {
        let user_id = Uuid::now_v7();
        let token = generate_token(user_id, "user@example.com", SECRET, 15).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "user@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let user_id = Uuid::now_v7();
        let token = generate_token(user_id, "user@example.com", SECRET, 15).unwrap();
        let result = verify_token(&token, "wrong-secret");
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_token_garbage() {
        assert!(verify_token("invalid.token.here", SECRET).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let user_id = Uuid::now_v7();
        // Issued with a negative lifetime, i.e. already expired.
        let token = generate_token(user_id, "user@example.com", SECRET, -120).unwrap();
        let result = verify_token(&token, SECRET);
        assert!(matches!(result, Err(Error::Unauthorized(_))));
    }

    #[test]
    fn test_extract_bearer_token_valid() {
        let header = "Bearer my-jwt-token";
        let extracted = extract_bearer_token(Some(header)).unwrap();
        assert_eq!(extracted, "my-jwt-token");
    }

    #[test]
    fn test_extract_bearer_token_missing() {
        assert!(extract_bearer_token(None).is_err());
    }

    #[test]
    fn test_extract_bearer_token_invalid_format() {
        assert!(extract_bearer_token(Some("Basic abc123")).is_err());
    }

    #[test]
    fn test_extract_bearer_token_empty() {
        assert!(extract_bearer_token(Some("Bearer ")).is_err());
    }
}

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::ExposeSecret;
use uuid::Uuid;

use crate::DbConn;
use crate::{
    config::JwtConfig,
    error::{Error, Result},
    models::users::{AuthResult, LoginRequest, NewUser, RegisterRequest, User},
    queries::users,
    services::jwt,
    validation,
};

/// Registers a new user and issues their first identity token.
///
/// The plaintext password is hashed exactly once; the duplicate-email
/// check runs before the hash so a conflict costs no hashing work.
pub async fn register_user(
    conn: &mut DbConn,
    jwt_config: &JwtConfig,
    request: RegisterRequest,
) -> Result<AuthResult> {
    let mut errors = Vec::new();
    if let Err(e) = validation::validate_email("email", &request.email) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_password("password", &request.password) {
        errors.push(e);
    }
    validation::collect(errors)?;

    if users::get_user_by_email(conn, &request.email).await?.is_some() {
        return Err(Error::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    let password_hash = hash_password(&request.password)?;

    let new_user = NewUser {
        email: request.email,
        password_hash,
        first_name: request.first_name,
        last_name: request.last_name,
    };
    let user = users::create_user(conn, &new_user).await?;
    let token = issue_token(&user, jwt_config)?;

    Ok(AuthResult { user, token })
}

/// Authenticates by email and password.
///
/// Unknown email and wrong password are indistinguishable to the caller;
/// both surface as the same `InvalidCredentials` error.
pub async fn login_user(
    conn: &mut DbConn,
    jwt_config: &JwtConfig,
    request: LoginRequest,
) -> Result<AuthResult> {
    let mut errors = Vec::new();
    if let Err(e) = validation::validate_email("email", &request.email) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_required("password", "Password", &request.password) {
        errors.push(e);
    }
    validation::collect(errors)?;

    let user = users::get_user_by_email(conn, &request.email)
        .await?
        .ok_or(Error::InvalidCredentials)?;

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(Error::InvalidCredentials);
    }

    let token = issue_token(&user, jwt_config)?;

    Ok(AuthResult { user, token })
}

/// Loads the profile for an already-authenticated user id.
pub async fn get_profile(conn: &mut DbConn, user_id: Uuid) -> Result<User> {
    users::get_user_by_id(conn, user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))
}

fn issue_token(user: &User, jwt_config: &JwtConfig) -> Result<String> {
    jwt::generate_token(
        user.id,
        &user.email,
        jwt_config.secret.expose_secret(),
        jwt_config.expiration_minutes,
    )
}

/// Hashes a password with Argon2 and a fresh random salt.
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against a stored Argon2 hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| Error::Internal(format!("Invalid password hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("same-password").unwrap();
        let second = hash_password("same-password").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(Error::Internal(_))));
    }
}

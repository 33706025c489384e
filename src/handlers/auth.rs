//! Authentication handlers: registration, login, and profile.

use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
};

use crate::{
    error::Result,
    middleware::auth::AuthenticatedUser,
    models::users::{LoginRequest, RegisterRequest},
    services::users,
    state::AppState,
};

/// POST /api/auth/register
///
/// Registers a new user and returns the stored profile together with a
/// fresh identity token.
///
/// # HTTP Status Codes
/// - `201 CREATED`: User registered successfully
/// - `400 BAD_REQUEST`: Validation error or email already registered
/// - `500 INTERNAL_SERVER_ERROR`: Database error
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let mut conn = state.pool.acquire().await?;

    let result = users::register_user(&mut conn, &state.config.jwt, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User registered successfully",
            "user": result.user,
            "token": result.token,
        })),
    ))
}

/// POST /api/auth/login
///
/// Authenticates a user with email and password. Unknown email and wrong
/// password produce the identical 401 response.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let result = users::login_user(&mut conn, &state.config.jwt, request).await?;

    Ok(Json(serde_json::json!({
        "message": "Login successful",
        "user": result.user,
        "token": result.token,
    })))
}

/// GET /api/auth/profile
///
/// Returns the authenticated user's stored profile; 404 if the id from
/// the (already verified) token no longer resolves.
pub async fn profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let user = users::get_profile(&mut conn, auth_user.id).await?;

    Ok(Json(serde_json::json!({
        "message": "Profile retrieved successfully",
        "user": user,
    })))
}

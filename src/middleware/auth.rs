//! JWT authentication middleware
//!
//! Validates the bearer token on every protected route and attaches the
//! verified identity to the request before any entity handler runs.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    services::jwt,
    state::AppState,
};

/// Authenticated user extracted from the identity token
///
/// This struct is added to request extensions by the JWT middleware
/// after successful validation.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    /// User's unique identifier
    pub id: Uuid,
    /// User's email address as recorded in the token
    pub email: String,
}

/// JWT authentication middleware
///
/// Extracts the `Authorization: Bearer <token>` header, verifies the
/// token's signature and expiry, and inserts an [`AuthenticatedUser`]
/// into request extensions. Requests without a valid token are rejected
/// with 401 before reaching any entity handler. The identity comes
/// entirely from the verified token; no database lookup happens here.
///
/// Apply to protected routes with `route_layer()`:
///
/// ```ignore
/// Router::new()
///     .route("/clients", get(list_clients))
///     .route_layer(middleware::from_fn_with_state(
///         state.clone(),
///         jwt_auth_middleware,
///     ))
/// ```
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = jwt::extract_bearer_token(auth_header)?;
    let claims = jwt::verify_token(&token, state.config.jwt.secret.expose_secret())?;

    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| Error::Unauthorized("Invalid token".to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser {
        id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

//! Reminder CRUD handlers.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    error::Result,
    middleware::auth::AuthenticatedUser,
    models::reminders::{CreateReminderRequest, ReminderListQuery, UpdateReminderRequest},
    services::reminders,
    state::AppState,
};

/// GET /api/reminders
///
/// Lists the caller's reminders, soonest due first; supports client /
/// project filters and a due-this-week window.
pub async fn list_reminders(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<ReminderListQuery>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let page = reminders::list_reminders(&mut conn, auth_user.id, query).await?;

    Ok(Json(serde_json::json!({
        "message": "Reminders retrieved successfully",
        "reminders": page.items,
        "pagination": page.pagination,
    })))
}

/// GET /api/reminders/{id}
pub async fn get_reminder(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let reminder = reminders::get_reminder(&mut conn, auth_user.id, id).await?;

    Ok(Json(serde_json::json!({
        "message": "Reminder retrieved successfully",
        "reminder": reminder,
    })))
}

/// POST /api/reminders
///
/// Requires at least one of clientId/projectId, each owned by the caller.
pub async fn create_reminder(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateReminderRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let mut conn = state.pool.acquire().await?;

    let reminder = reminders::create_reminder(&mut conn, auth_user.id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Reminder created successfully",
            "reminder": reminder,
        })),
    ))
}

/// PUT /api/reminders/{id}
pub async fn update_reminder(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateReminderRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let reminder = reminders::update_reminder(&mut conn, auth_user.id, id, request).await?;

    Ok(Json(serde_json::json!({
        "message": "Reminder updated successfully",
        "reminder": reminder,
    })))
}

/// DELETE /api/reminders/{id}
pub async fn delete_reminder(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    reminders::delete_reminder(&mut conn, auth_user.id, id).await?;

    Ok(Json(serde_json::json!({
        "message": "Reminder deleted successfully",
    })))
}

//! Dashboard handler.

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::{
    error::Result, middleware::auth::AuthenticatedUser, services::dashboard, state::AppState,
};

/// GET /api/dashboard
///
/// Returns the composite dashboard for the authenticated user: entity
/// counts, project status breakdown, and the three bounded activity
/// facets (upcoming reminders, recent interactions, upcoming deadlines).
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let dashboard_data = dashboard::get_dashboard(&mut conn, auth_user.id).await?;

    Ok(Json(serde_json::json!({
        "message": "Dashboard data retrieved successfully",
        "dashboardData": dashboard_data,
    })))
}

use chrono::{Duration, Utc};
use indexmap::IndexMap;
use uuid::Uuid;

use crate::DbConn;
use crate::{error::Result, models::dashboard::DashboardData, queries::dashboard};

/// How many rows each bounded dashboard facet returns.
const FACET_LIMIT: i64 = 5;

/// Assembles the dashboard from five independent reads. Each facet is a
/// pure read over the caller's own rows; an empty facet contributes an
/// empty list or a zero, never an error.
pub async fn get_dashboard(conn: &mut DbConn, owner_id: Uuid) -> Result<DashboardData> {
    let now = Utc::now();
    let week_ahead = now + Duration::days(7);

    let total_clients = dashboard::count_clients(conn, owner_id).await?;
    let total_projects = dashboard::count_projects(conn, owner_id).await?;

    let projects_by_status: IndexMap<String, i64> =
        dashboard::project_status_counts(conn, owner_id)
            .await?
            .into_iter()
            .map(|(status, count)| (status.to_string(), count))
            .collect();

    let upcoming_reminders =
        dashboard::upcoming_reminders(conn, owner_id, now, week_ahead, FACET_LIMIT).await?;
    let recent_interactions =
        dashboard::recent_interactions(conn, owner_id, FACET_LIMIT).await?;
    let upcoming_deadlines =
        dashboard::upcoming_deadlines(conn, owner_id, now, week_ahead, FACET_LIMIT).await?;

    Ok(DashboardData {
        total_clients,
        total_projects,
        projects_by_status,
        upcoming_reminders,
        recent_interactions,
        upcoming_deadlines,
    })
}

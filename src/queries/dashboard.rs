//! Dashboard reads. Five independent owner-scoped queries; each facet
//! stands alone so an empty one never disturbs the others.

use chrono::{DateTime, Utc};
use sqlx::Postgres;
use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::Result,
    models::interactions::InteractionView,
    models::projects::{ProjectStatus, ProjectWithClient},
    models::reminders::ReminderView,
};

use super::interactions::{INTERACTION_JOIN_COLUMNS, INTERACTION_JOINS, InteractionViewRow};
use super::projects::{PROJECT_JOIN_COLUMNS, ProjectWithClientRow};
use super::reminders::{REMINDER_JOIN_COLUMNS, REMINDER_JOINS, ReminderViewRow};

pub async fn count_clients(conn: &mut DbConn, owner_id: Uuid) -> Result<i64> {
    let count = sqlx::query_scalar::<Postgres, i64>(
        "SELECT COUNT(*) FROM clients WHERE owner_id = $1",
    )
    .bind(owner_id)
    .fetch_one(conn)
    .await?;

    Ok(count)
}

pub async fn count_projects(conn: &mut DbConn, owner_id: Uuid) -> Result<i64> {
    let count = sqlx::query_scalar::<Postgres, i64>(
        "SELECT COUNT(*) FROM projects WHERE owner_id = $1",
    )
    .bind(owner_id)
    .fetch_one(conn)
    .await?;

    Ok(count)
}

/// Project counts grouped by status. Statuses with no projects simply
/// don't appear in the result.
pub async fn project_status_counts(
    conn: &mut DbConn,
    owner_id: Uuid,
) -> Result<Vec<(ProjectStatus, i64)>> {
    let counts = sqlx::query_as::<Postgres, (ProjectStatus, i64)>(
        "SELECT status, COUNT(*) FROM projects WHERE owner_id = $1 GROUP BY status ORDER BY status",
    )
    .bind(owner_id)
    .fetch_all(conn)
    .await?;

    Ok(counts)
}

/// Up to `limit` incomplete reminders due inside the window, soonest first.
pub async fn upcoming_reminders(
    conn: &mut DbConn,
    owner_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<ReminderView>> {
    let sql = format!(
        "SELECT {REMINDER_JOIN_COLUMNS} {REMINDER_JOINS} \
         WHERE r.owner_id = $1 AND r.completed = FALSE \
           AND r.due_date >= $2 AND r.due_date <= $3 \
         ORDER BY r.due_date ASC LIMIT $4"
    );

    let rows = sqlx::query_as::<Postgres, ReminderViewRow>(&sql)
        .bind(owner_id)
        .bind(from)
        .bind(to)
        .bind(limit)
        .fetch_all(conn)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// The `limit` most recent interactions, any date.
pub async fn recent_interactions(
    conn: &mut DbConn,
    owner_id: Uuid,
    limit: i64,
) -> Result<Vec<InteractionView>> {
    let sql = format!(
        "SELECT {INTERACTION_JOIN_COLUMNS} {INTERACTION_JOINS} \
         WHERE i.owner_id = $1 \
         ORDER BY i.date DESC LIMIT $2"
    );

    let rows = sqlx::query_as::<Postgres, InteractionViewRow>(&sql)
        .bind(owner_id)
        .bind(limit)
        .fetch_all(conn)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Up to `limit` unfinished projects whose deadline falls inside the
/// window, earliest deadline first.
pub async fn upcoming_deadlines(
    conn: &mut DbConn,
    owner_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<ProjectWithClient>> {
    let sql = format!(
        "SELECT {PROJECT_JOIN_COLUMNS} FROM projects p \
         JOIN clients c ON c.id = p.client_id \
         WHERE p.owner_id = $1 AND p.deadline >= $2 AND p.deadline <= $3 \
           AND p.status <> $4 \
         ORDER BY p.deadline ASC LIMIT $5"
    );

    let rows = sqlx::query_as::<Postgres, ProjectWithClientRow>(&sql)
        .bind(owner_id)
        .bind(from)
        .bind(to)
        .bind(ProjectStatus::Completed)
        .bind(limit)
        .fetch_all(conn)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

//! Reminder queries, owner-scoped, with the same left-joined reference
//! identities as interactions.

use chrono::{DateTime, Duration, Utc};
use sqlx::Postgres;
use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::Result,
    models::clients::ClientRef,
    models::projects::ProjectRef,
    models::reminders::{
        NewReminder, Reminder, ReminderListParams, ReminderView, UpdateReminderRequest,
    },
};

const REMINDER_COLUMNS: &str =
    "id, title, description, due_date, completed, client_id, project_id, owner_id";

pub(super) const REMINDER_JOIN_COLUMNS: &str =
    "r.id, r.title, r.description, r.due_date, r.completed, r.client_id, r.project_id, \
     r.owner_id, c.name AS client_name, p.title AS project_title";

pub(super) const REMINDER_JOINS: &str = "FROM reminders r \
     LEFT JOIN clients c ON c.id = r.client_id \
     LEFT JOIN projects p ON p.id = r.project_id";

#[derive(sqlx::FromRow)]
pub(super) struct ReminderViewRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    due_date: DateTime<Utc>,
    completed: bool,
    client_id: Option<Uuid>,
    project_id: Option<Uuid>,
    owner_id: Uuid,
    client_name: Option<String>,
    project_title: Option<String>,
}

impl From<ReminderViewRow> for ReminderView {
    fn from(row: ReminderViewRow) -> Self {
        ReminderView {
            client: row
                .client_id
                .zip(row.client_name)
                .map(|(id, name)| ClientRef { id, name }),
            project: row
                .project_id
                .zip(row.project_title)
                .map(|(id, title)| ProjectRef { id, title }),
            reminder: Reminder {
                id: row.id,
                title: row.title,
                description: row.description,
                due_date: row.due_date,
                completed: row.completed,
                client_id: row.client_id,
                project_id: row.project_id,
                owner_id: row.owner_id,
            },
        }
    }
}

pub async fn create_reminder(conn: &mut DbConn, new_reminder: &NewReminder) -> Result<Reminder> {
    let sql = format!(
        "INSERT INTO reminders (title, description, due_date, completed, client_id, project_id, owner_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {REMINDER_COLUMNS}"
    );

    let reminder = sqlx::query_as::<Postgres, Reminder>(&sql)
        .bind(&new_reminder.title)
        .bind(new_reminder.description.as_ref())
        .bind(new_reminder.due_date)
        .bind(new_reminder.completed)
        .bind(new_reminder.client_id)
        .bind(new_reminder.project_id)
        .bind(new_reminder.owner_id)
        .fetch_one(conn)
        .await?;

    Ok(reminder)
}

/// Plain owner-scoped lookup, used for update merging.
pub async fn get_reminder_by_id(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
) -> Result<Option<Reminder>> {
    let sql = format!("SELECT {REMINDER_COLUMNS} FROM reminders WHERE id = $1 AND owner_id = $2");

    let reminder = sqlx::query_as::<Postgres, Reminder>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;

    Ok(reminder)
}

pub async fn get_reminder_view(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
) -> Result<Option<ReminderView>> {
    let sql = format!(
        "SELECT {REMINDER_JOIN_COLUMNS} {REMINDER_JOINS} \
         WHERE r.id = $1 AND r.owner_id = $2"
    );

    let row = sqlx::query_as::<Postgres, ReminderViewRow>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;

    Ok(row.map(Into::into))
}

pub async fn list_reminders(
    conn: &mut DbConn,
    owner_id: Uuid,
    params: &ReminderListParams,
) -> Result<(Vec<ReminderView>, i64)> {
    let mut where_clause = String::from("r.owner_id = $1");
    let mut next_placeholder = 2;

    if params.client_id.is_some() {
        where_clause.push_str(&format!(" AND r.client_id = ${next_placeholder}"));
        next_placeholder += 1;
    }
    if params.project_id.is_some() {
        where_clause.push_str(&format!(" AND r.project_id = ${next_placeholder}"));
        next_placeholder += 1;
    }

    let week_window = params.due_this_week.then(|| {
        let now = Utc::now();
        (now, now + Duration::days(7))
    });
    if week_window.is_some() {
        where_clause.push_str(&format!(
            " AND r.due_date >= ${from} AND r.due_date <= ${to}",
            from = next_placeholder,
            to = next_placeholder + 1
        ));
        next_placeholder += 2;
    }

    let count_sql = format!("SELECT COUNT(*) FROM reminders r WHERE {where_clause}");
    let mut count_query = sqlx::query_scalar::<Postgres, i64>(&count_sql).bind(owner_id);
    if let Some(client_id) = params.client_id {
        count_query = count_query.bind(client_id);
    }
    if let Some(project_id) = params.project_id {
        count_query = count_query.bind(project_id);
    }
    if let Some((from, to)) = week_window {
        count_query = count_query.bind(from).bind(to);
    }
    let total_count = count_query.fetch_one(&mut *conn).await?;

    let select_sql = format!(
        "SELECT {REMINDER_JOIN_COLUMNS} {REMINDER_JOINS} \
         WHERE {where_clause} \
         ORDER BY r.{column} {order} LIMIT ${limit} OFFSET ${offset}",
        column = params.sort.column,
        order = params.sort.order.as_sql(),
        limit = next_placeholder,
        offset = next_placeholder + 1,
    );
    let mut select_query = sqlx::query_as::<Postgres, ReminderViewRow>(&select_sql).bind(owner_id);
    if let Some(client_id) = params.client_id {
        select_query = select_query.bind(client_id);
    }
    if let Some(project_id) = params.project_id {
        select_query = select_query.bind(project_id);
    }
    if let Some((from, to)) = week_window {
        select_query = select_query.bind(from).bind(to);
    }
    let rows = select_query
        .bind(params.page.limit)
        .bind(params.page.offset())
        .fetch_all(&mut *conn)
        .await?;

    Ok((rows.into_iter().map(Into::into).collect(), total_count))
}

pub async fn update_reminder(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
    update: &UpdateReminderRequest,
) -> Result<Option<Reminder>> {
    let sql = format!(
        "UPDATE reminders \
         SET title = COALESCE($3, title), \
             description = COALESCE($4, description), \
             due_date = COALESCE($5, due_date), \
             completed = COALESCE($6, completed), \
             client_id = COALESCE($7, client_id), \
             project_id = COALESCE($8, project_id) \
         WHERE id = $1 AND owner_id = $2 \
         RETURNING {REMINDER_COLUMNS}"
    );

    let reminder = sqlx::query_as::<Postgres, Reminder>(&sql)
        .bind(id)
        .bind(owner_id)
        .bind(update.title.as_ref())
        .bind(update.description.as_ref())
        .bind(update.due_date)
        .bind(update.completed)
        .bind(update.client_id)
        .bind(update.project_id)
        .fetch_optional(conn)
        .await?;

    Ok(reminder)
}

pub async fn delete_reminder(conn: &mut DbConn, owner_id: Uuid, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM reminders WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

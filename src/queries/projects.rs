//! Project queries, owner-scoped throughout. Reads join the owning
//! client so responses can carry its identity without a second query.

use chrono::{DateTime, Utc};
use sqlx::Postgres;
use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::Result,
    models::clients::ClientSummary,
    models::projects::{
        NewProject, Project, ProjectListParams, ProjectStatus, ProjectWithClient,
        UpdateProjectRequest,
    },
};

const PROJECT_COLUMNS: &str = "id, title, description, budget, deadline, status, client_id, \
     owner_id, created_at, updated_at";

pub(super) const PROJECT_JOIN_COLUMNS: &str = "p.id, p.title, p.description, p.budget, p.deadline, \
     p.status, p.client_id, p.owner_id, p.created_at, p.updated_at, \
     c.name AS client_name, c.email AS client_email";

#[derive(sqlx::FromRow)]
pub(super) struct ProjectWithClientRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    budget: Option<f64>,
    deadline: Option<DateTime<Utc>>,
    status: ProjectStatus,
    client_id: Uuid,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    client_name: String,
    client_email: String,
}

impl From<ProjectWithClientRow> for ProjectWithClient {
    fn from(row: ProjectWithClientRow) -> Self {
        ProjectWithClient {
            client: ClientSummary {
                id: row.client_id,
                name: row.client_name,
                email: row.client_email,
            },
            project: Project {
                id: row.id,
                title: row.title,
                description: row.description,
                budget: row.budget,
                deadline: row.deadline,
                status: row.status,
                client_id: row.client_id,
                owner_id: row.owner_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

pub async fn create_project(conn: &mut DbConn, new_project: &NewProject) -> Result<Project> {
    let sql = format!(
        "INSERT INTO projects (title, description, budget, deadline, status, client_id, owner_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {PROJECT_COLUMNS}"
    );

    let project = sqlx::query_as::<Postgres, Project>(&sql)
        .bind(&new_project.title)
        .bind(new_project.description.as_ref())
        .bind(new_project.budget)
        .bind(new_project.deadline)
        .bind(new_project.status)
        .bind(new_project.client_id)
        .bind(new_project.owner_id)
        .fetch_one(conn)
        .await?;

    Ok(project)
}

/// Plain owner-scoped lookup, used for reference checks.
pub async fn get_project_by_id(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
) -> Result<Option<Project>> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 AND owner_id = $2");

    let project = sqlx::query_as::<Postgres, Project>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;

    Ok(project)
}

pub async fn get_project_with_client(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
) -> Result<Option<ProjectWithClient>> {
    let sql = format!(
        "SELECT {PROJECT_JOIN_COLUMNS} FROM projects p \
         JOIN clients c ON c.id = p.client_id \
         WHERE p.id = $1 AND p.owner_id = $2"
    );

    let row = sqlx::query_as::<Postgres, ProjectWithClientRow>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;

    Ok(row.map(Into::into))
}

pub async fn list_projects(
    conn: &mut DbConn,
    owner_id: Uuid,
    params: &ProjectListParams,
) -> Result<(Vec<ProjectWithClient>, i64)> {
    let mut where_clause = String::from("p.owner_id = $1");
    let search_pattern = params.search.as_ref().map(|s| format!("%{s}%"));
    let mut next_placeholder = 2;

    if search_pattern.is_some() {
        where_clause.push_str(&format!(
            " AND (p.title ILIKE ${n} OR p.description ILIKE ${n})",
            n = next_placeholder
        ));
        next_placeholder += 1;
    }
    if params.status.is_some() {
        where_clause.push_str(&format!(" AND p.status = ${next_placeholder}"));
        next_placeholder += 1;
    }
    if params.client_id.is_some() {
        where_clause.push_str(&format!(" AND p.client_id = ${next_placeholder}"));
        next_placeholder += 1;
    }

    let count_sql = format!("SELECT COUNT(*) FROM projects p WHERE {where_clause}");
    let mut count_query = sqlx::query_scalar::<Postgres, i64>(&count_sql).bind(owner_id);
    if let Some(pattern) = &search_pattern {
        count_query = count_query.bind(pattern);
    }
    if let Some(status) = params.status {
        count_query = count_query.bind(status);
    }
    if let Some(client_id) = params.client_id {
        count_query = count_query.bind(client_id);
    }
    let total_count = count_query.fetch_one(&mut *conn).await?;

    let select_sql = format!(
        "SELECT {PROJECT_JOIN_COLUMNS} FROM projects p \
         JOIN clients c ON c.id = p.client_id \
         WHERE {where_clause} \
         ORDER BY p.{column} {order} LIMIT ${limit} OFFSET ${offset}",
        column = params.sort.column,
        order = params.sort.order.as_sql(),
        limit = next_placeholder,
        offset = next_placeholder + 1,
    );
    let mut select_query =
        sqlx::query_as::<Postgres, ProjectWithClientRow>(&select_sql).bind(owner_id);
    if let Some(pattern) = &search_pattern {
        select_query = select_query.bind(pattern);
    }
    if let Some(status) = params.status {
        select_query = select_query.bind(status);
    }
    if let Some(client_id) = params.client_id {
        select_query = select_query.bind(client_id);
    }
    let rows = select_query
        .bind(params.page.limit)
        .bind(params.page.offset())
        .fetch_all(&mut *conn)
        .await?;

    Ok((rows.into_iter().map(Into::into).collect(), total_count))
}

pub async fn update_project(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
    update: &UpdateProjectRequest,
) -> Result<Option<Project>> {
    let sql = format!(
        "UPDATE projects \
         SET title = COALESCE($3, title), \
             description = COALESCE($4, description), \
             budget = COALESCE($5, budget), \
             deadline = COALESCE($6, deadline), \
             status = COALESCE($7, status), \
             client_id = COALESCE($8, client_id), \
             updated_at = NOW() \
         WHERE id = $1 AND owner_id = $2 \
         RETURNING {PROJECT_COLUMNS}"
    );

    let project = sqlx::query_as::<Postgres, Project>(&sql)
        .bind(id)
        .bind(owner_id)
        .bind(update.title.as_ref())
        .bind(update.description.as_ref())
        .bind(update.budget)
        .bind(update.deadline)
        .bind(update.status)
        .bind(update.client_id)
        .fetch_optional(conn)
        .await?;

    Ok(project)
}

/// Deletes a project; its interactions and reminders cascade with it.
pub async fn delete_project(conn: &mut DbConn, owner_id: Uuid, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::pagination::Page,
    models::projects::{
        CreateProjectRequest, NewProject, Project, ProjectListQuery, ProjectStatus,
        ProjectWithClient, UpdateProjectRequest,
    },
    queries::{clients, projects},
    validation,
};

pub async fn list_projects(
    conn: &mut DbConn,
    owner_id: Uuid,
    query: ProjectListQuery,
) -> Result<Page<ProjectWithClient>> {
    let params = query.into_params()?;
    let (items, total_count) = projects::list_projects(conn, owner_id, &params).await?;

    Ok(Page::new(items, params.page, total_count))
}

pub async fn get_project(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
) -> Result<ProjectWithClient> {
    projects::get_project_with_client(conn, owner_id, id)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))
}

/// Creates a project after proving the target client belongs to the
/// caller; the reference check always precedes the insert.
pub async fn create_project(
    conn: &mut DbConn,
    owner_id: Uuid,
    request: CreateProjectRequest,
) -> Result<Project> {
    let mut errors = Vec::new();
    if let Err(e) = validation::validate_required("title", "Title", &request.title) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_positive("budget", "Budget", request.budget) {
        errors.push(e);
    }
    validation::collect(errors)?;

    if clients::get_client_by_id(conn, owner_id, request.client_id)
        .await?
        .is_none()
    {
        return Err(Error::NotFound("Client not found".to_string()));
    }

    let new_project = NewProject {
        title: request.title,
        description: request.description,
        budget: request.budget,
        deadline: request.deadline,
        status: request.status.unwrap_or(ProjectStatus::NotStarted),
        client_id: request.client_id,
        owner_id,
    };
    projects::create_project(conn, &new_project).await
}

pub async fn update_project(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
    request: UpdateProjectRequest,
) -> Result<Project> {
    let mut errors = Vec::new();
    if let Some(title) = &request.title
        && let Err(e) = validation::validate_required("title", "Title", title)
    {
        errors.push(e);
    }
    if let Err(e) = validation::validate_positive("budget", "Budget", request.budget) {
        errors.push(e);
    }
    validation::collect(errors)?;

    if projects::get_project_by_id(conn, owner_id, id).await?.is_none() {
        return Err(Error::NotFound("Project not found".to_string()));
    }

    // A reassigned client must also belong to the caller.
    if let Some(client_id) = request.client_id
        && clients::get_client_by_id(conn, owner_id, client_id)
            .await?
            .is_none()
    {
        return Err(Error::NotFound("Client not found".to_string()));
    }

    projects::update_project(conn, owner_id, id, &request)
        .await?
        .ok_or_else(|| Error::NotFound("Project not found".to_string()))
}

/// Deletes the project along with its interactions and reminders.
pub async fn delete_project(conn: &mut DbConn, owner_id: Uuid, id: Uuid) -> Result<()> {
    let rows_affected = projects::delete_project(conn, owner_id, id).await?;

    if rows_affected == 0 {
        return Err(Error::NotFound("Project not found".to_string()));
    }

    Ok(())
}

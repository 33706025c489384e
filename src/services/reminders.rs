use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::pagination::Page,
    models::reminders::{
        CreateReminderRequest, NewReminder, Reminder, ReminderListQuery, ReminderView,
        UpdateReminderRequest,
    },
    queries::reminders,
    services::ensure_owned_references,
    validation,
};

const MISSING_REFERENCE: &str = "Either clientId or projectId must be provided";

pub async fn list_reminders(
    conn: &mut DbConn,
    owner_id: Uuid,
    query: ReminderListQuery,
) -> Result<Page<ReminderView>> {
    let params = query.into_params()?;
    let (items, total_count) = reminders::list_reminders(conn, owner_id, &params).await?;

    Ok(Page::new(items, params.page, total_count))
}

pub async fn get_reminder(conn: &mut DbConn, owner_id: Uuid, id: Uuid) -> Result<ReminderView> {
    reminders::get_reminder_view(conn, owner_id, id)
        .await?
        .ok_or_else(|| Error::NotFound("Reminder not found".to_string()))
}

pub async fn create_reminder(
    conn: &mut DbConn,
    owner_id: Uuid,
    request: CreateReminderRequest,
) -> Result<Reminder> {
    let mut errors = Vec::new();
    if let Err(e) = validation::validate_required("title", "Title", &request.title) {
        errors.push(e);
    }
    validation::collect(errors)?;

    if request.client_id.is_none() && request.project_id.is_none() {
        return Err(Error::validation(MISSING_REFERENCE));
    }

    ensure_owned_references(conn, owner_id, request.client_id, request.project_id).await?;

    let new_reminder = NewReminder {
        title: request.title,
        description: request.description,
        due_date: request.due_date,
        completed: request.completed.unwrap_or(false),
        client_id: request.client_id,
        project_id: request.project_id,
        owner_id,
    };
    reminders::create_reminder(conn, &new_reminder).await
}

pub async fn update_reminder(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
    request: UpdateReminderRequest,
) -> Result<Reminder> {
    let mut errors = Vec::new();
    if let Some(title) = &request.title
        && let Err(e) = validation::validate_required("title", "Title", title)
    {
        errors.push(e);
    }
    validation::collect(errors)?;

    let existing = reminders::get_reminder_by_id(conn, owner_id, id)
        .await?
        .ok_or_else(|| Error::NotFound("Reminder not found".to_string()))?;

    // The invariant must hold for the row as it will be after the patch.
    let merged_client = request.client_id.or(existing.client_id);
    let merged_project = request.project_id.or(existing.project_id);
    if merged_client.is_none() && merged_project.is_none() {
        return Err(Error::validation(MISSING_REFERENCE));
    }

    ensure_owned_references(conn, owner_id, request.client_id, request.project_id).await?;

    reminders::update_reminder(conn, owner_id, id, &request)
        .await?
        .ok_or_else(|| Error::NotFound("Reminder not found".to_string()))
}

pub async fn delete_reminder(conn: &mut DbConn, owner_id: Uuid, id: Uuid) -> Result<()> {
    let rows_affected = reminders::delete_reminder(conn, owner_id, id).await?;

    if rows_affected == 0 {
        return Err(Error::NotFound("Reminder not found".to_string()));
    }

    Ok(())
}

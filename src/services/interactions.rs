use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::interactions::{
        CreateInteractionRequest, Interaction, InteractionListQuery, InteractionView,
        NewInteraction, UpdateInteractionRequest,
    },
    models::pagination::Page,
    queries::interactions,
    services::ensure_owned_references,
};

const MISSING_REFERENCE: &str = "Either clientId or projectId must be provided";

pub async fn list_interactions(
    conn: &mut DbConn,
    owner_id: Uuid,
    query: InteractionListQuery,
) -> Result<Page<InteractionView>> {
    let params = query.into_params()?;
    let (items, total_count) = interactions::list_interactions(conn, owner_id, &params).await?;

    Ok(Page::new(items, params.page, total_count))
}

pub async fn get_interaction(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
) -> Result<InteractionView> {
    interactions::get_interaction_view(conn, owner_id, id)
        .await?
        .ok_or_else(|| Error::NotFound("Interaction not found".to_string()))
}

/// Creates an interaction. The at-least-one-reference rule is checked
/// before anything touches storage; reference ownership right after.
pub async fn create_interaction(
    conn: &mut DbConn,
    owner_id: Uuid,
    request: CreateInteractionRequest,
) -> Result<Interaction> {
    if request.client_id.is_none() && request.project_id.is_none() {
        return Err(Error::validation(MISSING_REFERENCE));
    }

    ensure_owned_references(conn, owner_id, request.client_id, request.project_id).await?;

    let new_interaction = NewInteraction {
        date: request.date,
        kind: request.kind,
        notes: request.notes,
        client_id: request.client_id,
        project_id: request.project_id,
        owner_id,
    };
    interactions::create_interaction(conn, &new_interaction).await
}

pub async fn update_interaction(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
    request: UpdateInteractionRequest,
) -> Result<Interaction> {
    let existing = interactions::get_interaction_by_id(conn, owner_id, id)
        .await?
        .ok_or_else(|| Error::NotFound("Interaction not found".to_string()))?;

    // The invariant must hold for the row as it will be after the patch.
    let merged_client = request.client_id.or(existing.client_id);
    let merged_project = request.project_id.or(existing.project_id);
    if merged_client.is_none() && merged_project.is_none() {
        return Err(Error::validation(MISSING_REFERENCE));
    }

    ensure_owned_references(conn, owner_id, request.client_id, request.project_id).await?;

    interactions::update_interaction(conn, owner_id, id, &request)
        .await?
        .ok_or_else(|| Error::NotFound("Interaction not found".to_string()))
}

pub async fn delete_interaction(conn: &mut DbConn, owner_id: Uuid, id: Uuid) -> Result<()> {
    let rows_affected = interactions::delete_interaction(conn, owner_id, id).await?;

    if rows_affected == 0 {
        return Err(Error::NotFound("Interaction not found".to_string()));
    }

    Ok(())
}

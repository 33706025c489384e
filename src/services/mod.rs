pub mod clients;
pub mod dashboard;
pub mod interactions;
pub mod jwt;
pub mod projects;
pub mod reminders;
pub mod users;

use uuid::Uuid;

use crate::DbConn;
use crate::error::{Error, Result};
use crate::queries;

/// Verifies that every provided reference resolves to a row owned by the
/// caller. Runs before the dependent write so a mutation never lands with
/// a dangling or foreign reference. A reference owned by someone else
/// reports the same "not found" as a missing one.
pub(crate) async fn ensure_owned_references(
    conn: &mut DbConn,
    owner_id: Uuid,
    client_id: Option<Uuid>,
    project_id: Option<Uuid>,
) -> Result<()> {
    if let Some(client_id) = client_id
        && queries::clients::get_client_by_id(conn, owner_id, client_id)
            .await?
            .is_none()
    {
        return Err(Error::NotFound("Client not found".to_string()));
    }

    if let Some(project_id) = project_id
        && queries::projects::get_project_by_id(conn, owner_id, project_id)
            .await?
            .is_none()
    {
        return Err(Error::NotFound("Project not found".to_string()));
    }

    Ok(())
}

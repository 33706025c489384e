use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::clients::{
        Client, ClientListQuery, CreateClientRequest, NewClient, UpdateClientRequest,
    },
    models::pagination::Page,
    queries::clients,
    validation,
};

pub async fn list_clients(
    conn: &mut DbConn,
    owner_id: Uuid,
    query: ClientListQuery,
) -> Result<Page<Client>> {
    let params = query.into_params()?;
    let (items, total_count) = clients::list_clients(conn, owner_id, &params).await?;

    Ok(Page::new(items, params.page, total_count))
}

pub async fn get_client(conn: &mut DbConn, owner_id: Uuid, id: Uuid) -> Result<Client> {
    clients::get_client_by_id(conn, owner_id, id)
        .await?
        .ok_or_else(|| Error::NotFound("Client not found".to_string()))
}

pub async fn create_client(
    conn: &mut DbConn,
    owner_id: Uuid,
    request: CreateClientRequest,
) -> Result<Client> {
    let mut errors = Vec::new();
    if let Err(e) = validation::validate_required("name", "Name", &request.name) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_email("email", &request.email) {
        errors.push(e);
    }
    if let Err(e) = validation::validate_required("phone", "Phone number", &request.phone) {
        errors.push(e);
    }
    validation::collect(errors)?;

    let new_client = NewClient {
        name: request.name,
        email: request.email,
        phone: request.phone,
        company: request.company,
        notes: request.notes,
        owner_id,
    };
    clients::create_client(conn, &new_client).await
}

pub async fn update_client(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
    request: UpdateClientRequest,
) -> Result<Client> {
    let mut errors = Vec::new();
    if let Some(name) = &request.name
        && let Err(e) = validation::validate_required("name", "Name", name)
    {
        errors.push(e);
    }
    if let Some(email) = &request.email
        && let Err(e) = validation::validate_email("email", email)
    {
        errors.push(e);
    }
    if let Some(phone) = &request.phone
        && let Err(e) = validation::validate_required("phone", "Phone number", phone)
    {
        errors.push(e);
    }
    validation::collect(errors)?;

    clients::update_client(conn, owner_id, id, &request)
        .await?
        .ok_or_else(|| Error::NotFound("Client not found".to_string()))
}

/// Deletes the client and, through the schema's cascading foreign keys,
/// every project, interaction, and reminder hanging off it.
pub async fn delete_client(conn: &mut DbConn, owner_id: Uuid, id: Uuid) -> Result<()> {
    let rows_affected = clients::delete_client(conn, owner_id, id).await?;

    if rows_affected == 0 {
        return Err(Error::NotFound("Client not found".to_string()));
    }

    Ok(())
}

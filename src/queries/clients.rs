//! Client queries. Every statement is owner-scoped: a row belonging to
//! another user is indistinguishable from a missing row.

use sqlx::Postgres;
use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::Result,
    models::clients::{Client, ClientListParams, NewClient, UpdateClientRequest},
};

const CLIENT_COLUMNS: &str =
    "id, name, email, phone, company, notes, owner_id, created_at, updated_at";

pub async fn create_client(conn: &mut DbConn, new_client: &NewClient) -> Result<Client> {
    let sql = format!(
        "INSERT INTO clients (name, email, phone, company, notes, owner_id) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING {CLIENT_COLUMNS}"
    );

    let client = sqlx::query_as::<Postgres, Client>(&sql)
        .bind(&new_client.name)
        .bind(&new_client.email)
        .bind(&new_client.phone)
        .bind(new_client.company.as_ref())
        .bind(new_client.notes.as_ref())
        .bind(new_client.owner_id)
        .fetch_one(conn)
        .await?;

    Ok(client)
}

pub async fn get_client_by_id(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
) -> Result<Option<Client>> {
    let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1 AND owner_id = $2");

    let client = sqlx::query_as::<Postgres, Client>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;

    Ok(client)
}

/// Lists an owner's clients with optional free-text search; returns the
/// requested page plus the total matching row count.
pub async fn list_clients(
    conn: &mut DbConn,
    owner_id: Uuid,
    params: &ClientListParams,
) -> Result<(Vec<Client>, i64)> {
    let mut where_clause = String::from("owner_id = $1");
    let search_pattern = params.search.as_ref().map(|s| format!("%{s}%"));
    let mut next_placeholder = 2;

    if search_pattern.is_some() {
        where_clause.push_str(&format!(
            " AND (name ILIKE ${n} OR email ILIKE ${n} OR phone ILIKE ${n} OR company ILIKE ${n})",
            n = next_placeholder
        ));
        next_placeholder += 1;
    }

    let count_sql = format!("SELECT COUNT(*) FROM clients WHERE {where_clause}");
    let mut count_query = sqlx::query_scalar::<Postgres, i64>(&count_sql).bind(owner_id);
    if let Some(pattern) = &search_pattern {
        count_query = count_query.bind(pattern);
    }
    let total_count = count_query.fetch_one(&mut *conn).await?;

    let select_sql = format!(
        "SELECT {CLIENT_COLUMNS} FROM clients WHERE {where_clause} \
         ORDER BY {column} {order} LIMIT ${limit} OFFSET ${offset}",
        column = params.sort.column,
        order = params.sort.order.as_sql(),
        limit = next_placeholder,
        offset = next_placeholder + 1,
    );
    let mut select_query = sqlx::query_as::<Postgres, Client>(&select_sql).bind(owner_id);
    if let Some(pattern) = &search_pattern {
        select_query = select_query.bind(pattern);
    }
    let clients = select_query
        .bind(params.page.limit)
        .bind(params.page.offset())
        .fetch_all(&mut *conn)
        .await?;

    Ok((clients, total_count))
}

/// Applies a partial update; absent fields keep their stored values.
pub async fn update_client(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
    update: &UpdateClientRequest,
) -> Result<Option<Client>> {
    let sql = format!(
        "UPDATE clients \
         SET name = COALESCE($3, name), \
             email = COALESCE($4, email), \
             phone = COALESCE($5, phone), \
             company = COALESCE($6, company), \
             notes = COALESCE($7, notes), \
             updated_at = NOW() \
         WHERE id = $1 AND owner_id = $2 \
         RETURNING {CLIENT_COLUMNS}"
    );

    let client = sqlx::query_as::<Postgres, Client>(&sql)
        .bind(id)
        .bind(owner_id)
        .bind(update.name.as_ref())
        .bind(update.email.as_ref())
        .bind(update.phone.as_ref())
        .bind(update.company.as_ref())
        .bind(update.notes.as_ref())
        .fetch_optional(conn)
        .await?;

    Ok(client)
}

/// Deletes a client; dependent projects, interactions, and reminders go
/// with it atomically via the schema's cascading foreign keys.
pub async fn delete_client(conn: &mut DbConn, owner_id: Uuid, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM clients WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

//! Interaction queries. Reads left-join the optional client/project so
//! views carry their identities; both joins tolerate absent references.

use chrono::{DateTime, Utc};
use sqlx::Postgres;
use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::Result,
    models::clients::ClientRef,
    models::interactions::{
        Interaction, InteractionListParams, InteractionType, InteractionView,
        NewInteraction, UpdateInteractionRequest,
    },
    models::projects::ProjectRef,
};

const INTERACTION_COLUMNS: &str = "id, date, type, notes, client_id, project_id, owner_id";

pub(super) const INTERACTION_JOIN_COLUMNS: &str =
    "i.id, i.date, i.type, i.notes, i.client_id, i.project_id, i.owner_id, \
     c.name AS client_name, p.title AS project_title";

pub(super) const INTERACTION_JOINS: &str = "FROM interactions i \
     LEFT JOIN clients c ON c.id = i.client_id \
     LEFT JOIN projects p ON p.id = i.project_id";

#[derive(sqlx::FromRow)]
pub(super) struct InteractionViewRow {
    id: Uuid,
    date: DateTime<Utc>,
    #[sqlx(rename = "type")]
    kind: InteractionType,
    notes: Option<String>,
    client_id: Option<Uuid>,
    project_id: Option<Uuid>,
    owner_id: Uuid,
    client_name: Option<String>,
    project_title: Option<String>,
}

impl From<InteractionViewRow> for InteractionView {
    fn from(row: InteractionViewRow) -> Self {
        InteractionView {
            client: row
                .client_id
                .zip(row.client_name)
                .map(|(id, name)| ClientRef { id, name }),
            project: row
                .project_id
                .zip(row.project_title)
                .map(|(id, title)| ProjectRef { id, title }),
            interaction: Interaction {
                id: row.id,
                date: row.date,
                kind: row.kind,
                notes: row.notes,
                client_id: row.client_id,
                project_id: row.project_id,
                owner_id: row.owner_id,
            },
        }
    }
}

pub async fn create_interaction(
    conn: &mut DbConn,
    new_interaction: &NewInteraction,
) -> Result<Interaction> {
    let sql = format!(
        "INSERT INTO interactions (date, type, notes, client_id, project_id, owner_id) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING {INTERACTION_COLUMNS}"
    );

    let interaction = sqlx::query_as::<Postgres, Interaction>(&sql)
        .bind(new_interaction.date)
        .bind(new_interaction.kind)
        .bind(new_interaction.notes.as_ref())
        .bind(new_interaction.client_id)
        .bind(new_interaction.project_id)
        .bind(new_interaction.owner_id)
        .fetch_one(conn)
        .await?;

    Ok(interaction)
}

/// Plain owner-scoped lookup, used for update merging.
pub async fn get_interaction_by_id(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
) -> Result<Option<Interaction>> {
    let sql =
        format!("SELECT {INTERACTION_COLUMNS} FROM interactions WHERE id = $1 AND owner_id = $2");

    let interaction = sqlx::query_as::<Postgres, Interaction>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;

    Ok(interaction)
}

pub async fn get_interaction_view(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
) -> Result<Option<InteractionView>> {
    let sql = format!(
        "SELECT {INTERACTION_JOIN_COLUMNS} {INTERACTION_JOINS} \
         WHERE i.id = $1 AND i.owner_id = $2"
    );

    let row = sqlx::query_as::<Postgres, InteractionViewRow>(&sql)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;

    Ok(row.map(Into::into))
}

pub async fn list_interactions(
    conn: &mut DbConn,
    owner_id: Uuid,
    params: &InteractionListParams,
) -> Result<(Vec<InteractionView>, i64)> {
    let mut where_clause = String::from("i.owner_id = $1");
    let mut next_placeholder = 2;

    if params.client_id.is_some() {
        where_clause.push_str(&format!(" AND i.client_id = ${next_placeholder}"));
        next_placeholder += 1;
    }
    if params.project_id.is_some() {
        where_clause.push_str(&format!(" AND i.project_id = ${next_placeholder}"));
        next_placeholder += 1;
    }

    let count_sql = format!("SELECT COUNT(*) FROM interactions i WHERE {where_clause}");
    let mut count_query = sqlx::query_scalar::<Postgres, i64>(&count_sql).bind(owner_id);
    if let Some(client_id) = params.client_id {
        count_query = count_query.bind(client_id);
    }
    if let Some(project_id) = params.project_id {
        count_query = count_query.bind(project_id);
    }
    let total_count = count_query.fetch_one(&mut *conn).await?;

    let select_sql = format!(
        "SELECT {INTERACTION_JOIN_COLUMNS} {INTERACTION_JOINS} \
         WHERE {where_clause} \
         ORDER BY i.{column} {order} LIMIT ${limit} OFFSET ${offset}",
        column = params.sort.column,
        order = params.sort.order.as_sql(),
        limit = next_placeholder,
        offset = next_placeholder + 1,
    );
    let mut select_query =
        sqlx::query_as::<Postgres, InteractionViewRow>(&select_sql).bind(owner_id);
    if let Some(client_id) = params.client_id {
        select_query = select_query.bind(client_id);
    }
    if let Some(project_id) = params.project_id {
        select_query = select_query.bind(project_id);
    }
    let rows = select_query
        .bind(params.page.limit)
        .bind(params.page.offset())
        .fetch_all(&mut *conn)
        .await?;

    Ok((rows.into_iter().map(Into::into).collect(), total_count))
}

pub async fn update_interaction(
    conn: &mut DbConn,
    owner_id: Uuid,
    id: Uuid,
    update: &UpdateInteractionRequest,
) -> Result<Option<Interaction>> {
    let sql = format!(
        "UPDATE interactions \
         SET date = COALESCE($3, date), \
             type = COALESCE($4, type), \
             notes = COALESCE($5, notes), \
             client_id = COALESCE($6, client_id), \
             project_id = COALESCE($7, project_id) \
         WHERE id = $1 AND owner_id = $2 \
         RETURNING {INTERACTION_COLUMNS}"
    );

    let interaction = sqlx::query_as::<Postgres, Interaction>(&sql)
        .bind(id)
        .bind(owner_id)
        .bind(update.date)
        .bind(update.kind)
        .bind(update.notes.as_ref())
        .bind(update.client_id)
        .bind(update.project_id)
        .fetch_optional(conn)
        .await?;

    Ok(interaction)
}

pub async fn delete_interaction(conn: &mut DbConn, owner_id: Uuid, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM interactions WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

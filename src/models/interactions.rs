use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::clients::ClientRef;
use crate::models::pagination::{PageParams, Sort, SortOrder};
use crate::models::projects::ProjectRef;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum InteractionType {
    Call,
    Email,
    Meeting,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: InteractionType,
    pub notes: Option<String>,
    pub client_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewInteraction {
    pub date: DateTime<Utc>,
    pub kind: InteractionType,
    pub notes: Option<String>,
    pub client_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub owner_id: Uuid,
}

/// An interaction joined with the identities of its references.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionView {
    #[serde(flatten)]
    pub interaction: Interaction,
    pub client: Option<ClientRef>,
    pub project: Option<ProjectRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInteractionRequest {
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: InteractionType,
    pub notes: Option<String>,
    pub client_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInteractionRequest {
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: Option<InteractionType>,
    pub notes: Option<String>,
    pub client_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
}

/// Raw query-string parameters for `GET /api/interactions`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct InteractionListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub client_id: Option<String>,
    pub project_id: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone)]
pub struct InteractionListParams {
    pub page: PageParams,
    pub client_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub sort: Sort,
}

impl InteractionListQuery {
    pub fn into_params(self) -> Result<InteractionListParams> {
        let page = PageParams::resolve(self.page, self.limit)?;

        let client_id = match self.client_id.as_deref().filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => Some(
                Uuid::parse_str(raw)
                    .map_err(|_| Error::field("clientId", "Invalid client ID"))?,
            ),
        };
        let project_id = match self.project_id.as_deref().filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => Some(
                Uuid::parse_str(raw)
                    .map_err(|_| Error::field("projectId", "Invalid project ID"))?,
            ),
        };

        // Interactions carry no created_at; they sort by their own date.
        let order = match self.sort_order.as_deref() {
            None => SortOrder::Desc,
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::field("sortOrder", "sortOrder must be 'asc' or 'desc'"))?,
        };

        Ok(InteractionListParams {
            page,
            client_id,
            project_id,
            sort: Sort {
                column: "date",
                order,
            },
        })
    }
}

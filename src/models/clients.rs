use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::pagination::{PageParams, Sort, SortOrder};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub owner_id: Uuid,
}

/// Minimal client identity embedded in interaction/reminder views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRef {
    pub id: Uuid,
    pub name: String,
}

/// Client identity embedded in project views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

/// Raw query-string parameters for `GET /api/clients`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ClientListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Validated list parameters with the sort resolved against the whitelist.
#[derive(Debug, Clone)]
pub struct ClientListParams {
    pub page: PageParams,
    pub search: Option<String>,
    pub sort: Sort,
}

fn sort_column(key: &str) -> Option<&'static str> {
    match key {
        "name" => Some("name"),
        "email" => Some("email"),
        "company" => Some("company"),
        "createdAt" => Some("created_at"),
        "updatedAt" => Some("updated_at"),
        _ => None,
    }
}

impl ClientListQuery {
    pub fn into_params(self) -> Result<ClientListParams> {
        let page = PageParams::resolve(self.page, self.limit)?;

        let column = match self.sort_by.as_deref() {
            None => "created_at",
            Some(key) => sort_column(key)
                .ok_or_else(|| Error::field("sortBy", format!("Cannot sort clients by '{key}'")))?,
        };
        let order = match self.sort_order.as_deref() {
            None => SortOrder::Desc,
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::field("sortOrder", "sortOrder must be 'asc' or 'desc'"))?,
        };

        Ok(ClientListParams {
            page,
            search: self.search.filter(|s| !s.trim().is_empty()),
            sort: Sort { column, order },
        })
    }
}

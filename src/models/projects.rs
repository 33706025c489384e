use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::clients::ClientSummary;
use crate::models::pagination::{PageParams, Sort, SortOrder};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    OnHold,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: ProjectStatus,
    pub client_id: Uuid,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: ProjectStatus,
    pub client_id: Uuid,
    pub owner_id: Uuid,
}

/// Minimal project identity embedded in interaction/reminder views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: Uuid,
    pub title: String,
}

/// A project joined with its client's identity, as returned by reads.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithClient {
    #[serde(flatten)]
    pub project: Project,
    pub client: ClientSummary,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: Option<ProjectStatus>,
    pub client_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: Option<ProjectStatus>,
    pub client_id: Option<Uuid>,
}

/// Raw query-string parameters for `GET /api/projects`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ProjectListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub client_id: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectListParams {
    pub page: PageParams,
    pub search: Option<String>,
    pub status: Option<ProjectStatus>,
    pub client_id: Option<Uuid>,
    pub sort: Sort,
}

fn sort_column(key: &str) -> Option<&'static str> {
    match key {
        "title" => Some("title"),
        "budget" => Some("budget"),
        "deadline" => Some("deadline"),
        "status" => Some("status"),
        "createdAt" => Some("created_at"),
        "updatedAt" => Some("updated_at"),
        _ => None,
    }
}

impl ProjectListQuery {
    pub fn into_params(self) -> Result<ProjectListParams> {
        let page = PageParams::resolve(self.page, self.limit)?;

        let status = match self.status.as_deref().filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => Some(raw.parse::<ProjectStatus>().map_err(|_| {
                Error::field("status", format!("'{raw}' is not a valid project status"))
            })?),
        };
        let client_id = match self.client_id.as_deref().filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => Some(
                Uuid::parse_str(raw)
                    .map_err(|_| Error::field("clientId", "Invalid client ID"))?,
            ),
        };

        let column = match self.sort_by.as_deref() {
            None => "created_at",
            Some(key) => sort_column(key)
                .ok_or_else(|| Error::field("sortBy", format!("Cannot sort projects by '{key}'")))?,
        };
        let order = match self.sort_order.as_deref() {
            None => SortOrder::Desc,
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::field("sortOrder", "sortOrder must be 'asc' or 'desc'"))?,
        };

        Ok(ProjectListParams {
            page,
            search: self.search.filter(|s| !s.trim().is_empty()),
            status,
            client_id,
            sort: Sort { column, order },
        })
    }
}

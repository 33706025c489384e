use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::clients::ClientRef;
use crate::models::pagination::{PageParams, Sort, SortOrder};
use crate::models::projects::ProjectRef;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
    pub client_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewReminder {
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub completed: bool,
    pub client_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub owner_id: Uuid,
}

/// A reminder joined with the identities of its references.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderView {
    #[serde(flatten)]
    pub reminder: Reminder,
    pub client: Option<ClientRef>,
    pub project: Option<ProjectRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub completed: Option<bool>,
    pub client_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReminderRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
    pub client_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
}

/// Raw query-string parameters for `GET /api/reminders`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ReminderListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub client_id: Option<String>,
    pub project_id: Option<String>,
    pub due_this_week: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReminderListParams {
    pub page: PageParams,
    pub client_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub due_this_week: bool,
    pub sort: Sort,
}

fn sort_column(key: &str) -> Option<&'static str> {
    match key {
        "title" => Some("title"),
        "dueDate" => Some("due_date"),
        _ => None,
    }
}

impl ReminderListQuery {
    pub fn into_params(self) -> Result<ReminderListParams> {
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

        let column = match self.sort_by.as_deref() {
            None => "due_date",
            Some(key) => sort_column(key).ok_or_else(|| {
                Error::field("sortBy", format!("Cannot sort reminders by '{key}'"))
            })?,
        };
        // Reminders read soonest-first unless asked otherwise.
        let order = match self.sort_order.as_deref() {
            None => SortOrder::Asc,
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::field("sortOrder", "sortOrder must be 'asc' or 'desc'"))?,
        };

        Ok(ReminderListParams {
            page,
            client_id,
            project_id,
            due_this_week: self.due_this_week.unwrap_or(false),
            sort: Sort { column, order },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sort_is_due_date_asc() {
        let params = ReminderListQuery::default().into_params().unwrap();
        assert_eq!(params.sort.column, "due_date");
        assert_eq!(params.sort.order, SortOrder::Asc);
        assert!(!params.due_this_week);
    }

    #[test]
    fn due_this_week_flag_is_carried() {
        let query = ReminderListQuery {
            due_this_week: Some(true),
            ..Default::default()
        };
        assert!(query.into_params().unwrap().due_this_week);
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        let query = ReminderListQuery {
            sort_by: Some("completed".to_string()),
            ..Default::default()
        };
        assert!(query.into_params().is_err());
    }
}

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::interactions::InteractionView;
use crate::models::projects::ProjectWithClient;
use crate::models::reminders::ReminderView;

/// The composite dashboard payload. Each facet is computed by its own
/// read; an empty facet is just an empty list or zero count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub total_clients: i64,
    pub total_projects: i64,
    /// Status -> project count; statuses with no projects are omitted.
    pub projects_by_status: IndexMap<String, i64>,
    pub upcoming_reminders: Vec<ReminderView>,
    pub recent_interactions: Vec<InteractionView>,
    pub upcoming_deadlines: Vec<ProjectWithClient>,
}

pub mod clients;
pub mod dashboard;
pub mod interactions;
pub mod pagination;
pub mod projects;
pub mod reminders;
pub mod users;

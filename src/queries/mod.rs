pub mod clients;
pub mod dashboard;
pub mod interactions;
pub mod projects;
pub mod reminders;
pub mod users;

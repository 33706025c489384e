pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod interactions;
pub mod projects;
pub mod reminders;

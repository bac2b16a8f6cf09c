pub mod classify;
pub mod forums;
pub mod health;
pub mod instruments;
pub mod ui;
pub mod users;

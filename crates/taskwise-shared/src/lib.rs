pub mod analytics;
pub mod datetime;
pub mod draft;
pub mod filter;
pub mod lateness;
pub mod model;
pub mod reminders;
pub mod timer;

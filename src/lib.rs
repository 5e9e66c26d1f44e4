pub mod cli;
pub mod config;
pub mod database;
pub mod logging;
pub mod models;
pub mod render;
pub mod server;
pub mod utils;
pub mod weekly;

pub use config::Config;
pub use database::Database;
pub use models::{Category, Entry, EntryForm, NewEntry};
pub use utils::Profile;
pub use weekly::{WeekBucket, WeekStart, group_by_week};

use chrono::NaiveDate;
use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;
use thiserror::Error;

/// Storage and display format for entry dates and week keys
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

impl Profile {
    fn app_name(self) -> &'static str {
        match self {
            Profile::Dev => "weeknotes-dev",
            Profile::Prod => "weeknotes",
        }
    }
}

/// Get the configuration directory path.
/// The dev profile uses "weeknotes-dev" instead of "weeknotes"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "weeknotes", profile.app_name())
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path (database lives here)
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    ProjectDirs::from("com", "weeknotes", profile.app_name())
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[derive(Debug, Error)]
pub enum DateError {
    #[error("Failed to parse date: {0}")]
    ParseError(#[from] chrono::ParseError),
    #[error("'{0}' is not a fixed-width YYYY-MM-DD date")]
    NotFixedWidth(String),
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD).
///
/// Only the fixed-width form is accepted: a four-digit year, zero-padded
/// month and day. Signed or five-digit years and unpadded fields are
/// rejected, so string order of valid dates is chronological order.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, DateError> {
    let date_str = date_str.trim();
    let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)?;
    if date_str.len() != 10 || format_date(date) != date_str {
        return Err(DateError::NotFixedWidth(date_str.to_string()));
    }
    Ok(date)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Get the current local date as an ISO 8601 string (YYYY-MM-DD)
pub fn get_current_date_string() -> String {
    format_date(chrono::Local::now().date_naive())
}

/// Current UTC wall-clock time, used for the row insertion stamp
pub fn get_current_timestamp_string() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

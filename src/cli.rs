use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::database::{Database, DatabaseError};
use crate::models::{Category, Entry, EntryForm, ValidationErrors};
use crate::render::{Markup, week_heading};
use crate::utils::get_current_date_string;
use crate::weekly::{WeekBucket, WeekStart, group_by_week_with};

#[derive(Parser)]
#[command(name = "weeknotes")]
#[command(about = "Work journal - learnings and doings, summarized weekly")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web journal (default if no subcommand)
    Serve {
        /// Address to listen on, overrides `bind_addr` from the config
        #[arg(long)]
        bind: Option<String>,
    },
    /// Quickly add a journal entry
    Add {
        /// Entry text
        text: String,
        /// Entry date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// work, learning or interesting-thing
        #[arg(long, default_value = "learning")]
        category: String,
    },
    /// Print the weekly summary
    Weeks,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
    #[error(transparent)]
    ValidationError(#[from] ValidationErrors),
}

/// Handle the add command
pub fn handle_add(text: String, date: Option<String>, category: String, db: &Database) -> Result<Entry, CliError> {
    let form = EntryForm {
        created_at: Some(date.unwrap_or_else(get_current_date_string)),
        category: Some(category),
        text: Some(text),
    };
    let new_entry = form.validate()?;

    let entry = db.insert_entry(&new_entry)?;
    println!("Entry created successfully (ID: {})", entry.id);

    Ok(entry)
}

/// Handle the weeks command
pub fn handle_weeks(db: &Database, week_start: WeekStart) -> Result<(), CliError> {
    let entries = db.get_all_entries()?;
    let weeks = group_by_week_with(&entries, week_start);
    print!("{}", format_weeks(&weeks));
    Ok(())
}

/// Plain-text weekly summary, oldest week first, empty sections left out
pub fn format_weeks(weeks: &[(String, WeekBucket)]) -> String {
    let mut out = String::new();
    for (key, bucket) in weeks.iter().filter(|(_, bucket)| !bucket.is_empty()) {
        out.push_str(&week_heading(key, Markup::Plain));
        out.push('\n');
        for category in Category::ALL {
            let entries = bucket.slot(category);
            if entries.is_empty() {
                continue;
            }
            out.push_str(&format!("  {}\n", category.heading()));
            for entry in entries {
                out.push_str(&format!("    - {}\n", entry.text));
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weekly::group_by_week;

    #[test]
    fn add_validates_before_inserting() {
        let db = Database::open_in_memory().unwrap();

        let err = handle_add("x".to_string(), Some("yesterday".to_string()), "misc".to_string(), &db).unwrap_err();

        assert!(matches!(err, CliError::ValidationError(_)));
        assert_eq!(db.count_entries().unwrap(), 0);
    }

    #[test]
    fn add_defaults_to_today() {
        let db = Database::open_in_memory().unwrap();

        let entry = handle_add("noted".to_string(), None, "learning".to_string(), &db).unwrap();

        assert_eq!(entry.created_at, get_current_date_string());
        assert_eq!(entry.category, "learning");
    }

    #[test]
    fn weeks_text_skips_empty_sections() {
        let db = Database::open_in_memory().unwrap();
        db.insert_raw("2024-01-16", "work", "X").unwrap();
        db.insert_raw("2024-01-14", "learning", "Y").unwrap();
        db.insert_raw("2024-01-23", "other", "hidden").unwrap();

        let text = format_weeks(&group_by_week(&db.get_all_entries().unwrap()));

        assert_eq!(text, "Week of January 14th\n  Work\n    - X\n  Learnings\n    - Y\n\n");
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::utils::{format_date, parse_date};

/// A stored journal record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub created_at: String, // YYYY-MM-DD
    pub category: String,   // work, learning, interesting-thing (anything else is kept but never displayed)
    pub text: String,
    pub inserted_at: String,
}

/// The closed set of categories an entry can be displayed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Work,
    #[default]
    Learning,
    InterestingThing,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Learning, Category::InterestingThing];

    /// Label used in storage and in form values
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Learning => "learning",
            Category::InterestingThing => "interesting-thing",
        }
    }

    /// Label shown next to the form's radio button
    pub fn form_label(self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Learning => "Learning",
            Category::InterestingThing => "Interesting",
        }
    }

    /// Section heading used inside a week
    pub fn heading(self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Learning => "Learnings",
            Category::InterestingThing => "Interesting things",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Category::Work),
            "learning" => Ok(Category::Learning),
            "interesting-thing" => Ok(Category::InterestingThing),
            other => Err(ValidationError::UnknownCategory(other.to_string())),
        }
    }
}

/// A validated entry that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub created_at: NaiveDate,
    pub category: Category,
    pub text: String,
}

impl NewEntry {
    pub fn new(created_at: NaiveDate, category: Category, text: impl Into<String>) -> Self {
        Self {
            created_at,
            category,
            text: text.into(),
        }
    }

    /// Date in the stored `YYYY-MM-DD` form
    pub fn created_at_string(&self) -> String {
        format_date(self.created_at)
    }
}

/// Raw submission as it arrives from the create form.
///
/// Every field is optional so that a missing field surfaces as a
/// [`ValidationError`] rather than as an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryForm {
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("'{0}' is not a known category")]
    UnknownCategory(String),
    #[error("text must not be empty")]
    EmptyText,
}

impl ValidationError {
    /// Form field the problem belongs to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => *field,
            ValidationError::InvalidDate(_) => "createdAt",
            ValidationError::UnknownCategory(_) => "category",
            ValidationError::EmptyText => "text",
        }
    }
}

/// All problems found in one submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid entry: {}", describe(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(ValidationError::field).collect()
    }
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl EntryForm {
    pub fn new(created_at: &str, category: &str, text: &str) -> Self {
        Self {
            created_at: Some(created_at.to_string()),
            category: Some(category.to_string()),
            text: Some(text.to_string()),
        }
    }

    /// Check every field and build a [`NewEntry`], collecting all problems
    pub fn validate(&self) -> Result<NewEntry, ValidationErrors> {
        let mut errors = Vec::new();

        let created_at = match non_blank(&self.created_at) {
            None => {
                errors.push(ValidationError::MissingField("createdAt"));
                None
            }
            Some(raw) => match parse_date(raw) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(ValidationError::InvalidDate(raw.to_string()));
                    None
                }
            },
        };

        let category = match non_blank(&self.category) {
            None => {
                errors.push(ValidationError::MissingField("category"));
                None
            }
            Some(raw) => match raw.parse::<Category>() {
                Ok(category) => Some(category),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
        };

        let text = match self.text.as_deref() {
            None => {
                errors.push(ValidationError::MissingField("text"));
                None
            }
            Some(text) if text.trim().is_empty() => {
                errors.push(ValidationError::EmptyText);
                None
            }
            Some(text) => Some(text.to_string()),
        };

        match (created_at, category, text) {
            (Some(created_at), Some(category), Some(text)) => Ok(NewEntry {
                created_at,
                category,
                text,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }
}

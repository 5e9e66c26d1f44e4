//! Weekly summary of journal entries.
//!
//! Entries are bucketed by the first day of the week they fall in, then split
//! by category. Weeks are ordered by their start date and only formatted as
//! `YYYY-MM-DD` keys on the way out.
//!
//! Entries whose category is outside [`Category::ALL`] are grouped like any
//! other entry but land in no slot. Entries whose stored date cannot be parsed
//! are skipped entirely.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::models::{Category, Entry};
use crate::utils::{format_date, parse_date};

/// First day of the week used to assign dates to weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

/// Entries of one week, split by category, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekBucket {
    pub work: Vec<Entry>,
    pub learnings: Vec<Entry>,
    pub interesting_things: Vec<Entry>,
}

impl WeekBucket {
    pub fn slot(&self, category: Category) -> &[Entry] {
        match category {
            Category::Work => &self.work,
            Category::Learning => &self.learnings,
            Category::InterestingThing => &self.interesting_things,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Vec<Entry> {
        match category {
            Category::Work => &mut self.work,
            Category::Learning => &mut self.learnings,
            Category::InterestingThing => &mut self.interesting_things,
        }
    }

    pub fn len(&self) -> usize {
        self.work.len() + self.learnings.len() + self.interesting_things.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Latest date on or before `date` that falls on the week start
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    date.week(week_start.weekday()).first_day()
}

/// `YYYY-MM-DD` key of the week `date` belongs to
pub fn week_key(date: NaiveDate, week_start: WeekStart) -> String {
    format_date(start_of_week(date, week_start))
}

/// Group entries by Sunday-started weeks, oldest week first
pub fn group_by_week(entries: &[Entry]) -> Vec<(String, WeekBucket)> {
    group_by_week_with(entries, WeekStart::Sunday)
}

/// Group entries by week using an explicit week-start convention
pub fn group_by_week_with(entries: &[Entry], week_start: WeekStart) -> Vec<(String, WeekBucket)> {
    let mut weeks: BTreeMap<NaiveDate, Vec<&Entry>> = BTreeMap::new();

    for entry in entries {
        let date = match parse_date(&entry.created_at) {
            Ok(date) => date,
            Err(e) => {
                warn!(id = entry.id, created_at = %entry.created_at, error = %e, "skipping entry with malformed date");
                continue;
            }
        };
        weeks.entry(start_of_week(date, week_start)).or_default().push(entry);
    }

    weeks
        .into_iter()
        .map(|(start, members)| {
            let mut bucket = WeekBucket::default();
            for entry in members {
                if let Ok(category) = entry.category.parse::<Category>() {
                    bucket.slot_mut(category).push(entry.clone());
                }
            }
            (format_date(start), bucket)
        })
        .collect()
}

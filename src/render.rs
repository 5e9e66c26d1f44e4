//! Server-side HTML for the journal page.

use chrono::Datelike;

use crate::models::{Category, EntryForm, ValidationErrors};
use crate::utils::{get_current_date_string, parse_date};
use crate::weekly::WeekBucket;

pub const PAGE_TITLE: &str = "Work Journals";
pub const PAGE_DESCRIPTION: &str = "Welcome to my work journals";

/// Outcome of the last submission, driving how the form is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    /// Text cleared and focused, date and category kept
    Saved,
    /// Submitted values kept, problems listed
    Rejected(ValidationErrors),
}

/// Values pre-filled in the create form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub created_at: String,
    pub category: String,
    pub text: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            created_at: get_current_date_string(),
            category: Category::default().as_str().to_string(),
            text: String::new(),
        }
    }
}

impl FormValues {
    /// Keep whatever was submitted so a rejected form can be corrected
    pub fn from_form(form: &EntryForm) -> Self {
        let defaults = Self::default();
        Self {
            created_at: form.created_at.clone().unwrap_or(defaults.created_at),
            category: form.category.clone().unwrap_or(defaults.category),
            text: form.text.clone().unwrap_or_default(),
        }
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Output flavour for [`week_heading`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Html,
    Plain,
}

/// "Week of January 14<sup>th</sup>" (or "Week of January 14th" in plain
/// text) for a `YYYY-MM-DD` week key
pub fn week_heading(week_key: &str, markup: Markup) -> String {
    let Ok(date) = parse_date(week_key) else {
        return match markup {
            Markup::Html => format!("Week of {}", escape_html(week_key)),
            Markup::Plain => format!("Week of {}", week_key),
        };
    };
    let suffix = ordinal_suffix(date.day());
    match markup {
        Markup::Html => format!("Week of {} {}<sup>{}</sup>", date.format("%B"), date.day(), suffix),
        Markup::Plain => format!("Week of {} {}{}", date.format("%B"), date.day(), suffix),
    }
}

/// One `<article>` per week. Empty category sections are left out, and so
/// is a week with nothing to show.
pub fn render_weeks(weeks: &[(String, WeekBucket)]) -> String {
    let mut html = String::new();
    for (key, bucket) in weeks.iter().filter(|(_, bucket)| !bucket.is_empty()) {
        html.push_str(&format!(
            "<article class=\"week\" data-week=\"{}\">\n<header><h2>{}</h2></header>\n<div class=\"sections\">\n",
            escape_html(key),
            week_heading(key, Markup::Html)
        ));
        for category in Category::ALL {
            let entries = bucket.slot(category);
            if entries.is_empty() {
                continue;
            }
            html.push_str(&format!(
                "<article class=\"{}\">\n<h3>{}</h3>\n<ul>\n",
                category.as_str(),
                category.heading()
            ));
            for entry in entries {
                html.push_str(&format!("<li>{}</li>\n", escape_html(&entry.text)));
            }
            html.push_str("</ul>\n</article>\n");
        }
        html.push_str("</div>\n</article>\n");
    }
    html
}

fn render_errors(status: &SubmissionStatus) -> String {
    match status {
        SubmissionStatus::Rejected(errors) => {
            let items: String = errors
                .iter()
                .map(|e| format!("<li data-field=\"{}\">{}</li>", e.field(), escape_html(&e.to_string())))
                .collect();
            format!("<ul class=\"errors\">{}</ul>", items)
        }
        SubmissionStatus::Saved => "<p class=\"saved\">Saved.</p>".to_string(),
        SubmissionStatus::Idle => String::new(),
    }
}

pub fn render_form(values: &FormValues, status: &SubmissionStatus) -> String {
    let radios: String = Category::ALL
        .iter()
        .map(|category| {
            let checked = if values.category == category.as_str() { " checked" } else { "" };
            format!(
                "<label><input type=\"radio\" name=\"category\" value=\"{}\" required{}> {}</label>\n",
                category.as_str(),
                checked,
                category.form_label()
            )
        })
        .collect();

    let autofocus = if *status == SubmissionStatus::Saved { " autofocus" } else { "" };

    format!(
        r#"<div class="create">
<form method="post" action="/">
<fieldset>
<legend>Create an entry</legend>
{errors}
<input type="date" name="createdAt" required value="{created_at}">
<div class="categories">
{radios}</div>
<textarea name="text" placeholder="Write your entry..." required{autofocus}>{text}</textarea>
<button type="submit">Save</button>
</fieldset>
</form>
</div>"#,
        errors = render_errors(status),
        created_at = escape_html(&values.created_at),
        radios = radios,
        autofocus = autofocus,
        text = escape_html(&values.text),
    )
}

pub fn render_page(weeks: &[(String, WeekBucket)], values: &FormValues, status: &SubmissionStatus) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <meta name="description" content="{description}">
    <style>
        body {{ font-family: -apple-system, system-ui, sans-serif; max-width: 800px; margin: 0 auto; padding: 40px 20px; background: #0d1117; color: #c9d1d9; }}
        h1 {{ font-size: 2.5em; font-weight: 500; margin-bottom: 0; }}
        .tagline {{ color: #8b949e; font-size: 1.1em; }}
        .create {{ border: 1px solid #30363d; padding: 12px; margin: 28px 0; }}
        fieldset {{ border: none; padding: 0; display: flex; flex-direction: column; gap: 12px; }}
        legend {{ font-style: italic; color: #8b949e; }}
        .categories {{ display: flex; gap: 28px; }}
        textarea {{ width: 100%; min-height: 80px; }}
        button {{ align-self: flex-end; background: #1f6feb; color: white; border: none; padding: 4px 16px; font-weight: 500; }}
        .errors {{ color: #f85149; }}
        .saved {{ color: #3fb950; }}
        .week {{ margin-top: 28px; }}
        .week h2 {{ font-weight: bold; font-size: 1.1em; }}
        .week h3 {{ margin: 12px 0 4px; font-size: 1em; }}
        .week ul {{ margin-left: 28px; list-style: disc; }}
    </style>
</head>
<body>
<main>
<h1>{title}</h1>
<p class="tagline">Learnings and doings. Updated weekly.</p>
{form}
{weeks}</main>
</body>
</html>
"#,
        title = PAGE_TITLE,
        description = PAGE_DESCRIPTION,
        form = render_form(values, status),
        weeks = render_weeks(weeks),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, ValidationError};
    use crate::weekly::group_by_week;

    fn entry(id: i64, created_at: &str, category: &str, text: &str) -> Entry {
        Entry {
            id,
            created_at: created_at.to_string(),
            category: category.to_string(),
            text: text.to_string(),
            inserted_at: "2024-01-20 10:00:00".to_string(),
        }
    }

    #[test]
    fn ordinal_suffixes() {
        let cases = [(1, "st"), (2, "nd"), (3, "rd"), (4, "th"), (11, "th"), (12, "th"), (13, "th"), (21, "st"), (22, "nd"), (23, "rd"), (30, "th"), (31, "st")];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {}", day);
        }
    }

    #[test]
    fn week_heading_uses_month_name_and_ordinal() {
        assert_eq!(week_heading("2024-01-14", Markup::Html), "Week of January 14<sup>th</sup>");
        assert_eq!(week_heading("2023-12-31", Markup::Html), "Week of December 31<sup>st</sup>");
    }

    #[test]
    fn plain_week_heading_has_no_markup() {
        assert_eq!(week_heading("2024-01-14", Markup::Plain), "Week of January 14th");
        assert_eq!(week_heading("2024-03-03", Markup::Plain), "Week of March 3rd");
        assert_eq!(week_heading("<bad>", Markup::Plain), "Week of <bad>");
        assert_eq!(week_heading("<bad>", Markup::Html), "Week of &lt;bad&gt;");
    }

    #[test]
    fn empty_slots_get_no_heading() {
        let weeks = group_by_week(&[entry(1, "2024-01-16", "learning", "only a learning")]);

        let html = render_weeks(&weeks);

        assert!(html.contains("<h3>Learnings</h3>"));
        assert!(!html.contains("<h3>Work</h3>"));
        assert!(!html.contains("<h3>Interesting things</h3>"));
    }

    #[test]
    fn weeks_without_visible_entries_are_not_rendered() {
        let weeks = group_by_week(&[entry(1, "2024-01-16", "other", "hidden")]);
        assert_eq!(render_weeks(&weeks), "");
    }

    #[test]
    fn sections_follow_category_order() {
        let weeks = group_by_week(&[
            entry(1, "2024-01-16", "interesting-thing", "i"),
            entry(2, "2024-01-16", "work", "w"),
            entry(3, "2024-01-16", "learning", "l"),
        ]);

        let html = render_weeks(&weeks);

        let work = html.find("<h3>Work</h3>").unwrap();
        let learnings = html.find("<h3>Learnings</h3>").unwrap();
        let interesting = html.find("<h3>Interesting things</h3>").unwrap();
        assert!(work < learnings && learnings < interesting);
    }

    #[test]
    fn entry_text_is_escaped() {
        let weeks = group_by_week(&[entry(1, "2024-01-16", "work", "<script>alert('x')</script> & co")]);

        let html = render_weeks(&weeks);

        assert!(html.contains("<li>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co</li>"));
    }

    #[test]
    fn saved_status_focuses_an_empty_textarea() {
        let values = FormValues {
            created_at: "2024-01-16".to_string(),
            category: "work".to_string(),
            text: String::new(),
        };

        let html = render_form(&values, &SubmissionStatus::Saved);

        assert!(html.contains("required autofocus></textarea>"));
        assert!(html.contains("value=\"2024-01-16\""));
        assert!(html.contains("value=\"work\" required checked"));
    }

    #[test]
    fn rejected_status_lists_problems_and_keeps_text() {
        let values = FormValues {
            created_at: "2024-01-16".to_string(),
            category: "other".to_string(),
            text: "draft".to_string(),
        };
        let status = SubmissionStatus::Rejected(ValidationErrors(vec![ValidationError::UnknownCategory(
            "other".to_string(),
        )]));

        let html = render_form(&values, &status);

        assert!(html.contains("<li data-field=\"category\">"));
        assert!(html.contains(">draft</textarea>"));
        assert!(!html.contains("autofocus"));
        assert!(!html.contains("checked"));
    }

    #[test]
    fn idle_form_defaults_to_learning() {
        let html = render_form(&FormValues::default(), &SubmissionStatus::Idle);
        assert!(html.contains("value=\"learning\" required checked"));
        assert!(html.contains(&format!("value=\"{}\"", get_current_date_string())));
    }

    #[test]
    fn page_has_title_and_description() {
        let html = render_page(&[], &FormValues::default(), &SubmissionStatus::Idle);
        assert!(html.contains("<title>Work Journals</title>"));
        assert!(html.contains("content=\"Welcome to my work journals\""));
        assert!(html.contains("Learnings and doings. Updated weekly."));
        assert!(!html.contains("class=\"week\""));
    }
}

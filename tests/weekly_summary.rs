use weeknotes::models::{Category, EntryForm};
use weeknotes::weekly::{WeekStart, group_by_week_with};
use weeknotes::{Database, group_by_week};

fn seeded() -> Database {
    let db = Database::open_in_memory().unwrap();
    for (date, category, text) in [
        ("2024-01-22", "work", "Reviewed the migration plan"),
        ("2024-01-16", "work", "Fixed the flaky importer"),
        ("2024-01-14", "learning", "Sunday reading on SQLite WAL"),
        ("2024-01-18", "interesting-thing", "A talk on CRDTs"),
        ("2024-01-16", "other", "Kept in storage, never shown"),
        ("2024-01-17", "work", "Paired on the release"),
    ] {
        db.insert_raw(date, category, text).unwrap();
    }
    db
}

fn texts(bucket: &weeknotes::WeekBucket, category: Category) -> Vec<&str> {
    bucket.slot(category).iter().map(|e| e.text.as_str()).collect()
}

#[test]
fn stored_entries_group_into_sunday_weeks() {
    let db = seeded();

    let weeks = group_by_week(&db.get_all_entries().unwrap());

    let keys: Vec<&str> = weeks.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["2024-01-14", "2024-01-21"]);

    let (_, first) = &weeks[0];
    assert_eq!(
        texts(first, Category::Work),
        vec!["Fixed the flaky importer", "Paired on the release"]
    );
    assert_eq!(texts(first, Category::Learning), vec!["Sunday reading on SQLite WAL"]);
    assert_eq!(texts(first, Category::InterestingThing), vec!["A talk on CRDTs"]);

    let (_, second) = &weeks[1];
    assert_eq!(texts(second, Category::Work), vec!["Reviewed the migration plan"]);
    assert!(second.learnings.is_empty());
    assert!(second.interesting_things.is_empty());
}

#[test]
fn unrecognized_rows_stay_stored_but_hidden() {
    let db = seeded();
    let entries = db.get_all_entries().unwrap();

    assert!(entries.iter().any(|e| e.category == "other"));

    let weeks = group_by_week(&entries);
    let shown: usize = weeks.iter().map(|(_, b)| b.len()).sum();
    assert_eq!(shown, entries.len() - 1);
}

#[test]
fn validated_form_entries_are_summarized() {
    let db = Database::open_in_memory().unwrap();
    let new_entry = EntryForm::new("2024-01-16", "work", "X").validate().unwrap();
    db.insert_entry(&new_entry).unwrap();
    let new_entry = EntryForm::new("2024-01-14", "learning", "Y").validate().unwrap();
    db.insert_entry(&new_entry).unwrap();

    let weeks = group_by_week(&db.get_all_entries().unwrap());

    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].0, "2024-01-14");
    assert_eq!(texts(&weeks[0].1, Category::Work), vec!["X"]);
    assert_eq!(texts(&weeks[0].1, Category::Learning), vec!["Y"]);
    assert!(weeks[0].1.interesting_things.is_empty());
}

#[test]
fn monday_weeks_from_the_same_store() {
    let db = seeded();

    let weeks = group_by_week_with(&db.get_all_entries().unwrap(), WeekStart::Monday);

    let keys: Vec<&str> = weeks.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["2024-01-08", "2024-01-15", "2024-01-22"]);
}

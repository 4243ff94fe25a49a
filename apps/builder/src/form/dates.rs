use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

use crate::form::sections::{FieldKind, FieldSlot, SectionEntry};
use crate::models::Resume;

const CANONICAL: &str = "%Y-%m-%d";

/// Converts a stored date (ISO timestamp, plain date or empty) into the
/// canonical `YYYY-MM-DD` string used while editing.
///
/// Timestamps carrying an offset are moved to UTC before the date is taken.
/// Input that cannot be parsed yields an empty string.
pub fn to_editable_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    match parse_date(raw) {
        Some(date) => date.format(CANONICAL).to_string(),
        None => {
            warn!("Unparseable date '{raw}', clearing field");
            String::new()
        }
    }
}

/// Parses a canonical (or stored) date string, for comparisons and display.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, CANONICAL) {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Prepares a stored resume for editing: every date field in every section
/// is normalised to its canonical form.
pub fn hydrate(mut resume: Resume) -> Resume {
    normalize_entries(&mut resume.experiences);
    normalize_entries(&mut resume.projects);
    normalize_entries(&mut resume.education);
    normalize_entries(&mut resume.certifications);
    resume
}

fn normalize_entries<E: SectionEntry>(entries: &mut [E]) {
    let date_keys = E::SECTION
        .fields()
        .iter()
        .filter(|d| d.kind == FieldKind::Date)
        .map(|d| d.key);

    for key in date_keys {
        for entry in entries.iter_mut() {
            if let Some(FieldSlot::Text(value)) = entry.slot(key) {
                let normalized = to_editable_date(value.as_str());
                *value = normalized;
            }
        }
    }
}

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::form::dates::parse_date;
use crate::form::fields::ScalarField;
use crate::form::sections::{Section, SectionList};
use crate::models::Resume;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email";
pub const INVALID_PHONE_MESSAGE: &str = "Enter a valid 10-digit phone number";
pub const DATE_ORDER_MESSAGE: &str = "End date must be after start date";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern"));
// Ten ASCII digits, leading 6-9.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("phone pattern"));

/// Messages keyed by scalar field, plus per-entry messages keyed by
/// (section, index).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub fields: BTreeMap<ScalarField, String>,
    pub sections: BTreeMap<Section, BTreeMap<usize, String>>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.sections.is_empty()
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        self.fields.len() + self.sections.values().map(BTreeMap::len).sum::<usize>()
    }

    pub fn field(&self, field: ScalarField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn entry(&self, section: Section, index: usize) -> Option<&str> {
        self.sections
            .get(&section)
            .and_then(|entries| entries.get(&index))
            .map(String::as_str)
    }

    fn add_entry(&mut self, section: Section, index: usize, message: &str) {
        self.sections
            .entry(section)
            .or_default()
            .insert(index, message.to_string());
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, message) in &self.fields {
            writeln!(f, "{}: {}", field.label(), message)?;
        }
        for (section, entries) in &self.sections {
            for (index, message) in entries {
                writeln!(f, "{} #{}: {}", section.label(), index + 1, message)?;
            }
        }
        Ok(())
    }
}

/// Checks a resume before it is saved. An empty result means the resume may
/// be submitted.
pub fn validate(resume: &Resume) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    for field in ScalarField::REQUIRED {
        if resume.field(field).trim().is_empty() {
            errors.fields.insert(field, REQUIRED_MESSAGE.to_string());
        }
    }

    if !resume.email.trim().is_empty() && !EMAIL_RE.is_match(&resume.email) {
        errors
            .fields
            .insert(ScalarField::Email, INVALID_EMAIL_MESSAGE.to_string());
    }

    if !resume.phone.trim().is_empty() && !PHONE_RE.is_match(&resume.phone) {
        errors
            .fields
            .insert(ScalarField::Phone, INVALID_PHONE_MESSAGE.to_string());
    }

    for section in Section::ALL.into_iter().filter(Section::has_date_range) {
        check_date_order(resume.section(section), section, &mut errors);
    }

    errors
}

fn check_date_order(entries: &dyn SectionList, section: Section, errors: &mut ValidationErrors) {
    for index in 0..entries.len() {
        let start = entries.field_value(index, "startDate").unwrap_or_default();
        let end = entries.field_value(index, "endDate").unwrap_or_default();
        if start.is_empty() || end.is_empty() {
            continue;
        }
        if ends_before_start(&start, &end) {
            errors.add_entry(section, index, DATE_ORDER_MESSAGE);
        }
    }
}

fn ends_before_start(start: &str, end: &str) -> bool {
    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => s > e,
        // Free-form input: fall back to comparing the text.
        _ => start > end,
    }
}

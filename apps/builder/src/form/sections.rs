//! Section editor: one generic editor for all four repeating sections.
//!
//! Each section declares its fields once, as a descriptor table. Adding,
//! removing and editing entries is implemented a single time over
//! [`SectionEntry`], so experiences, projects, education and certifications
//! share identical semantics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::form::FormError;
use crate::models::{Certification, Education, Experience, Project, Resume};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Experiences,
    Projects,
    Education,
    Certifications,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Calendar date, `YYYY-MM-DD` or empty.
    Date,
    /// Edited as a comma-separated string, stored as a list.
    List,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub optional: bool,
}

impl FieldDescriptor {
    const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            optional: false,
        }
    }

    const fn optional(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            optional: true,
        }
    }
}

const EXPERIENCE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::required("company", "Company", FieldKind::Text),
    FieldDescriptor::required("position", "Position", FieldKind::Text),
    FieldDescriptor::required("startDate", "Start Date", FieldKind::Date),
    FieldDescriptor::optional("endDate", "End Date", FieldKind::Date),
    FieldDescriptor::required("description", "Description", FieldKind::Text),
];

const PROJECT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::required("title", "Title", FieldKind::Text),
    FieldDescriptor::required("description", "Description", FieldKind::Text),
    FieldDescriptor::required("startDate", "Start Date", FieldKind::Date),
    FieldDescriptor::optional("endDate", "End Date", FieldKind::Date),
    FieldDescriptor::optional("technologies", "Technologies", FieldKind::List),
    FieldDescriptor::optional("link", "Link", FieldKind::Url),
];

const EDUCATION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::required("school", "School", FieldKind::Text),
    FieldDescriptor::required("degree", "Degree", FieldKind::Text),
    FieldDescriptor::required("startDate", "Start Date", FieldKind::Date),
    FieldDescriptor::required("endDate", "End Date", FieldKind::Date),
];

const CERTIFICATION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::required("title", "Title", FieldKind::Text),
    FieldDescriptor::required("issuer", "Issuer", FieldKind::Text),
    FieldDescriptor::required("date", "Date", FieldKind::Date),
];

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Experiences,
        Section::Projects,
        Section::Education,
        Section::Certifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Experiences => "experiences",
            Section::Projects => "projects",
            Section::Education => "education",
            Section::Certifications => "certifications",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Experiences => "Experiences",
            Section::Projects => "Projects",
            Section::Education => "Education",
            Section::Certifications => "Certifications",
        }
    }

    pub fn fields(&self) -> &'static [FieldDescriptor] {
        match self {
            Section::Experiences => EXPERIENCE_FIELDS,
            Section::Projects => PROJECT_FIELDS,
            Section::Education => EDUCATION_FIELDS,
            Section::Certifications => CERTIFICATION_FIELDS,
        }
    }

    pub fn descriptor(&self, key: &str) -> Option<&'static FieldDescriptor> {
        self.fields().iter().find(|d| d.key == key)
    }

    /// Sections whose entries carry a start/end range that must be ordered.
    pub fn has_date_range(&self) -> bool {
        !matches!(self, Section::Certifications)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|sec| sec.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::UnknownSection(s.to_string()))
    }
}

/// Mutable view onto one field of an entry, as described by its descriptor.
pub enum FieldSlot<'a> {
    Text(&'a mut String),
    List(&'a mut Vec<String>),
}

/// A record that can live in a repeating section.
pub trait SectionEntry: Clone + Default + PartialEq {
    const SECTION: Section;

    fn slot(&mut self, key: &str) -> Option<FieldSlot<'_>>;

    /// Display value of a field; lists are joined with ", ".
    fn value(&self, key: &str) -> Option<String>;
}

impl SectionEntry for Experience {
    const SECTION: Section = Section::Experiences;

    fn slot(&mut self, key: &str) -> Option<FieldSlot<'_>> {
        let s = match key {
            "company" => &mut self.company,
            "position" => &mut self.position,
            "startDate" => &mut self.start_date,
            "endDate" => &mut self.end_date,
            "description" => &mut self.description,
            _ => return None,
        };
        Some(FieldSlot::Text(s))
    }

    fn value(&self, key: &str) -> Option<String> {
        let s = match key {
            "company" => &self.company,
            "position" => &self.position,
            "startDate" => &self.start_date,
            "endDate" => &self.end_date,
            "description" => &self.description,
            _ => return None,
        };
        Some(s.clone())
    }
}

impl SectionEntry for Project {
    const SECTION: Section = Section::Projects;

    fn slot(&mut self, key: &str) -> Option<FieldSlot<'_>> {
        let s = match key {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "startDate" => &mut self.start_date,
            "endDate" => &mut self.end_date,
            "link" => &mut self.link,
            "technologies" => return Some(FieldSlot::List(&mut self.technologies)),
            _ => return None,
        };
        Some(FieldSlot::Text(s))
    }

    fn value(&self, key: &str) -> Option<String> {
        let s = match key {
            "title" => &self.title,
            "description" => &self.description,
            "startDate" => &self.start_date,
            "endDate" => &self.end_date,
            "link" => &self.link,
            "technologies" => return Some(self.technologies.join(", ")),
            _ => return None,
        };
        Some(s.clone())
    }
}

impl SectionEntry for Education {
    const SECTION: Section = Section::Education;

    fn slot(&mut self, key: &str) -> Option<FieldSlot<'_>> {
        let s = match key {
            "school" => &mut self.school,
            "degree" => &mut self.degree,
            "startDate" => &mut self.start_date,
            "endDate" => &mut self.end_date,
            _ => return None,
        };
        Some(FieldSlot::Text(s))
    }

    fn value(&self, key: &str) -> Option<String> {
        let s = match key {
            "school" => &self.school,
            "degree" => &self.degree,
            "startDate" => &self.start_date,
            "endDate" => &self.end_date,
            _ => return None,
        };
        Some(s.clone())
    }
}

impl SectionEntry for Certification {
    const SECTION: Section = Section::Certifications;

    fn slot(&mut self, key: &str) -> Option<FieldSlot<'_>> {
        let s = match key {
            "title" => &mut self.title,
            "issuer" => &mut self.issuer,
            "date" => &mut self.date,
            _ => return None,
        };
        Some(FieldSlot::Text(s))
    }

    fn value(&self, key: &str) -> Option<String> {
        let s = match key {
            "title" => &self.title,
            "issuer" => &self.issuer,
            "date" => &self.date,
            _ => return None,
        };
        Some(s.clone())
    }
}

/// Appends `template` to the section. Never fails.
pub fn add_entry<E: SectionEntry>(entries: &mut Vec<E>, template: E) {
    entries.push(template);
}

pub fn remove_entry<E: SectionEntry>(entries: &mut Vec<E>, index: usize) -> Result<E, FormError> {
    check_index::<E>(entries.len(), index)?;
    Ok(entries.remove(index))
}

/// Replaces one field of one entry, leaving the rest of the entry untouched.
pub fn update_entry_field<E: SectionEntry>(
    entries: &mut [E],
    index: usize,
    key: &str,
    value: &str,
) -> Result<(), FormError> {
    check_index::<E>(entries.len(), index)?;
    let unknown = || FormError::UnknownField {
        section: E::SECTION,
        key: key.to_string(),
    };
    if E::SECTION.descriptor(key).is_none() {
        return Err(unknown());
    }
    match entries[index].slot(key).ok_or_else(unknown)? {
        FieldSlot::Text(s) => *s = value.to_string(),
        FieldSlot::List(items) => *items = split_list(value),
    }
    Ok(())
}

fn check_index<E: SectionEntry>(len: usize, index: usize) -> Result<(), FormError> {
    if index < len {
        Ok(())
    } else {
        Err(FormError::IndexOutOfRange {
            section: E::SECTION,
            index,
            len,
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Object-safe view of a section so a [`Resume`] can dispatch by [`Section`].
pub trait SectionList {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn add_blank(&mut self);
    fn remove_at(&mut self, index: usize) -> Result<(), FormError>;
    fn update_field(&mut self, index: usize, key: &str, value: &str) -> Result<(), FormError>;
    fn field_value(&self, index: usize, key: &str) -> Result<String, FormError>;
}

impl<E: SectionEntry> SectionList for Vec<E> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn add_blank(&mut self) {
        add_entry(self, E::default());
    }

    fn remove_at(&mut self, index: usize) -> Result<(), FormError> {
        remove_entry(self, index).map(|_| ())
    }

    fn update_field(&mut self, index: usize, key: &str, value: &str) -> Result<(), FormError> {
        update_entry_field(self, index, key, value)
    }

    fn field_value(&self, index: usize, key: &str) -> Result<String, FormError> {
        check_index::<E>(Vec::len(self), index)?;
        self[index]
            .value(key)
            .ok_or_else(|| FormError::UnknownField {
                section: E::SECTION,
                key: key.to_string(),
            })
    }
}

impl Resume {
    pub fn section(&self, section: Section) -> &dyn SectionList {
        match section {
            Section::Experiences => &self.experiences,
            Section::Projects => &self.projects,
            Section::Education => &self.education,
            Section::Certifications => &self.certifications,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut dyn SectionList {
        match section {
            Section::Experiences => &mut self.experiences,
            Section::Projects => &mut self.projects,
            Section::Education => &mut self.education,
            Section::Certifications => &mut self.certifications,
        }
    }

    /// Appends a blank entry (every field empty) to `section`.
    pub fn add_entry(&mut self, section: Section) {
        self.section_mut(section).add_blank();
    }

    pub fn remove_entry(&mut self, section: Section, index: usize) -> Result<(), FormError> {
        self.section_mut(section).remove_at(index)
    }

    pub fn update_entry_field(
        &mut self,
        section: Section,
        index: usize,
        key: &str,
        value: &str,
    ) -> Result<(), FormError> {
        self.section_mut(section).update_field(index, key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_remove_restores_sequence() {
        let mut r = Resume::blank();
        r.update_entry_field(Section::Experiences, 0, "company", "Acme")
            .unwrap();
        let before = r.clone();

        r.add_entry(Section::Experiences);
        assert_eq!(r.experiences.len(), 2);
        r.remove_entry(Section::Experiences, 1).unwrap();

        assert_eq!(r, before);
    }

    #[test]
    fn test_added_entry_is_blank() {
        let mut r = Resume::default();
        r.add_entry(Section::Projects);
        assert_eq!(r.projects, vec![Project::default()]);
    }

    #[test]
    fn test_add_entry_with_template() {
        let mut entries: Vec<Certification> = Vec::new();
        let template = Certification {
            issuer: "AWS".to_string(),
            ..Certification::default()
        };
        add_entry(&mut entries, template.clone());
        assert_eq!(entries, vec![template]);
    }

    #[test]
    fn test_update_preserves_other_fields() {
        let mut r = Resume::blank();
        r.update_entry_field(Section::Education, 0, "school", "MIT")
            .unwrap();
        r.update_entry_field(Section::Education, 0, "degree", "BSc")
            .unwrap();
        assert_eq!(r.education[0].school, "MIT");
        assert_eq!(r.education[0].degree, "BSc");
        assert_eq!(r.education[0].start_date, "");
    }

    #[test]
    fn test_update_list_field_splits_on_commas() {
        let mut r = Resume::blank();
        r.update_entry_field(Section::Projects, 0, "technologies", "Rust, Tokio,, Axum ")
            .unwrap();
        assert_eq!(r.projects[0].technologies, vec!["Rust", "Tokio", "Axum"]);
        assert_eq!(
            r.section(Section::Projects)
                .field_value(0, "technologies")
                .unwrap(),
            "Rust, Tokio, Axum"
        );
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut r = Resume::blank();
        let err = r.remove_entry(Section::Certifications, 3).unwrap_err();
        assert_eq!(
            err,
            FormError::IndexOutOfRange {
                section: Section::Certifications,
                index: 3,
                len: 1
            }
        );
        assert_eq!(r.certifications.len(), 1);
    }

    #[test]
    fn test_update_out_of_range() {
        let mut r = Resume::default();
        assert!(matches!(
            r.update_entry_field(Section::Experiences, 0, "company", "Acme"),
            Err(FormError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_update_unknown_field() {
        let mut r = Resume::blank();
        let err = r
            .update_entry_field(Section::Certifications, 0, "startDate", "2020-01-01")
            .unwrap_err();
        assert!(matches!(err, FormError::UnknownField { .. }));
    }

    #[test]
    fn test_every_descriptor_has_a_slot() {
        fn check<E: SectionEntry>() {
            let mut entry = E::default();
            for d in E::SECTION.fields() {
                assert!(entry.slot(d.key).is_some(), "{} missing {}", E::SECTION, d.key);
                assert!(entry.value(d.key).is_some());
            }
        }
        check::<Experience>();
        check::<Project>();
        check::<Education>();
        check::<Certification>();
    }

    #[test]
    fn test_parse_section() {
        assert_eq!("Education".parse::<Section>(), Ok(Section::Education));
        assert!("hobbies".parse::<Section>().is_err());
    }

    #[test]
    fn test_date_range_sections() {
        assert!(Section::Experiences.has_date_range());
        assert!(!Section::Certifications.has_date_range());
    }
}

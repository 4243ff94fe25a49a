use serde::{Deserialize, Serialize};

/// The edit model for one resume.
///
/// Dates inside the sections are kept as calendar-date strings (`YYYY-MM-DD`)
/// or empty. An empty `end_date` means "present".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    /// Assigned by the remote store. `None` until the resume has been created.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub github: String,
    pub website: String,
    pub summary: String,
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub hobbies: Vec<String>,
}

impl Resume {
    /// A fresh resume for the create flow: every section seeded with one blank entry.
    pub fn blank() -> Self {
        Self {
            experiences: vec![Experience::default()],
            projects: vec![Project::default()],
            education: vec![Education::default()],
            certifications: vec![Certification::default()],
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub title: String,
    pub issuer: String,
    pub date: String,
}

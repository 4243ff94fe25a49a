use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::form::FormError;
use crate::models::Resume;

/// The free-text attributes at the top of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarField {
    Name,
    Title,
    Email,
    Phone,
    Address,
    Github,
    Website,
    Summary,
}

impl ScalarField {
    pub const ALL: [ScalarField; 8] = [
        ScalarField::Name,
        ScalarField::Title,
        ScalarField::Email,
        ScalarField::Phone,
        ScalarField::Address,
        ScalarField::Github,
        ScalarField::Website,
        ScalarField::Summary,
    ];

    /// Fields that must be filled in before a resume can be saved.
    pub const REQUIRED: [ScalarField; 5] = [
        ScalarField::Name,
        ScalarField::Title,
        ScalarField::Email,
        ScalarField::Phone,
        ScalarField::Address,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarField::Name => "name",
            ScalarField::Title => "title",
            ScalarField::Email => "email",
            ScalarField::Phone => "phone",
            ScalarField::Address => "address",
            ScalarField::Github => "github",
            ScalarField::Website => "website",
            ScalarField::Summary => "summary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScalarField::Name => "Name",
            ScalarField::Title => "Title",
            ScalarField::Email => "Email",
            ScalarField::Phone => "Phone",
            ScalarField::Address => "Address",
            ScalarField::Github => "Github",
            ScalarField::Website => "Website",
            ScalarField::Summary => "Summary",
        }
    }
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScalarField::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::UnknownScalar(s.to_string()))
    }
}

impl Resume {
    pub fn field(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::Name => &self.name,
            ScalarField::Title => &self.title,
            ScalarField::Email => &self.email,
            ScalarField::Phone => &self.phone,
            ScalarField::Address => &self.address,
            ScalarField::Github => &self.github,
            ScalarField::Website => &self.website,
            ScalarField::Summary => &self.summary,
        }
    }

    /// Replaces one scalar attribute. No validation happens here; that is
    /// deferred to submission.
    pub fn set_field(&mut self, field: ScalarField, value: impl Into<String>) {
        let slot = match field {
            ScalarField::Name => &mut self.name,
            ScalarField::Title => &mut self.title,
            ScalarField::Email => &mut self.email,
            ScalarField::Phone => &mut self.phone,
            ScalarField::Address => &mut self.address,
            ScalarField::Github => &mut self.github,
            ScalarField::Website => &mut self.website,
            ScalarField::Summary => &mut self.summary,
        };
        *slot = value.into();
    }
}

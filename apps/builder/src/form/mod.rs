// Resume form core: scalar setters, the generic section editor, date
// normalisation, validation and the submission state machine.
// Nothing in here talks to the network directly; the store, navigation and
// notification collaborators are passed in as traits.

pub mod dates;
pub mod fields;
pub mod sections;
pub mod submission;
pub mod suggestions;
pub mod validation;

use thiserror::Error;

pub use fields::ScalarField;
pub use sections::{FieldDescriptor, FieldKind, Section};
pub use submission::{FormSession, SubmissionState, SubmitError, SubmitOutcome};
pub use suggestions::TagList;
pub use validation::{validate, ValidationErrors};

/// Misuse of the form core. These are caller bugs, never shown to the user
/// as validation messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{section} has no entry at index {index} (length {len})")]
    IndexOutOfRange {
        section: Section,
        index: usize,
        len: usize,
    },

    #[error("{section} entries have no field '{key}'")]
    UnknownField { section: Section, key: String },

    #[error("Unknown resume field '{0}'")]
    UnknownScalar(String),

    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    #[error("Form cannot be edited while {0}")]
    NotEditable(&'static str),
}

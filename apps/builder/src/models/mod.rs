pub mod resume;
pub mod user;

pub use resume::{Certification, Education, Experience, Project, Resume};

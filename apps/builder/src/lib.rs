//! Resume builder client: the form core (fields, sections, dates,
//! validation, submission), the HTTP-backed resume store, authentication,
//! navigation and Markdown preview/export.

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod form;
pub mod models;
pub mod navigation;
pub mod render;
pub mod store;

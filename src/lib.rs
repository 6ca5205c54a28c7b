//! Scene Report: tabular reports of a novel project's chapters and scenes.
//!
//! Selects rows by structural kind and a scene filter, selects columns by
//! toggles, and renders the result as an HTML table or a CSV file.

pub mod core;
pub mod schema;

//! Admin-facing services: case study and category management, site
//! settings, and the dashboard.

pub mod case_studies;
pub mod categories;
pub mod dashboard;
pub mod settings;

//! View models and askama template plumbing.

pub mod admin;
pub mod views;

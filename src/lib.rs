//! Lustro is a self-hosted portfolio and lead-capture site for a
//! photo-retouching studio: a server-rendered trilingual showcase with
//! before/after comparisons, a contact form that relays leads to Telegram,
//! and an admin panel for managing case studies.
//!
//! The crate is layered the same way top to bottom: `domain` holds pure
//! state machines and records, `application` holds services and repository
//! traits, `infra` holds Postgres, HTTP, and outbound API adapters, and
//! `presentation` holds the askama view models.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;

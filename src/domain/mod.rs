//! Pure domain logic: no I/O, no framework types.

pub mod consent;
pub mod contact;
pub mod entities;
pub mod locale;
pub mod slider;

//! Application services orchestrating domain logic over repository and
//! transport traits.

pub mod admin;
pub mod error;
pub mod geo;
pub mod leads;
pub mod repos;
pub mod session;
pub mod showcase;

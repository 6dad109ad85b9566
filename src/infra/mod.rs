//! Infrastructure adapters: Postgres, HTTP surfaces, outbound APIs,
//! filesystem uploads, and telemetry.

pub mod assets;
pub mod db;
pub mod error;
pub mod geoip;
pub mod http;
pub mod telegram;
pub mod telemetry;
pub mod uploads;

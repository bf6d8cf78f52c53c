//! Person intake service: accepts name/email submissions, validates and
//! sanitizes them, stores them in SQLite, and serves the record listing.

pub mod config;
pub mod error;
pub mod intake;
pub mod telemetry;

//! Shared library modules providing error types, version ordering, and telemetry initialization.

pub mod errors;
pub mod telemetry;
pub mod version;

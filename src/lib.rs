//! Library crate root re-exporting the CLI, settings, and launch pipeline modules.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod cli;
pub mod launch;
pub mod settings;

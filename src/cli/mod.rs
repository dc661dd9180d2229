//! Command-line surface: argument splitting and the defaults resolver.

pub mod args;
pub mod resolve;

pub use args::{split_args, LauncherArgs, SplitArgs};
pub use resolve::{derive_mode, env_toggle, is_truthy, resolve_request, DEFAULTS_ENV_KEY};

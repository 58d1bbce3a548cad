// ABOUTME: Environment variable names and typed lookup helpers
// ABOUTME: Shared by the API server and the CLI so both read the same settings

pub mod constants;
pub mod env;

pub use env::{env_flag, env_string, parse_env_or_default, parse_env_with_fallback};

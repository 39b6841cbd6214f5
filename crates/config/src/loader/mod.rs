//! Configuration loader for environment variables and `.env` files.
//!
//! Responsibilities:
//! - Load configuration from an optional `.env` file and environment variables.
//! - Provide a builder-pattern `ConfigLoader` where explicit builder calls win over env.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Reloading configuration after startup (configuration is immutable once built).
//!
//! Invariants / Assumptions:
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - Variables already present in the process environment are not overridden by `.env`.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests;

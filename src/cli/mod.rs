//! # CLI Module
//!
//! Entry points behind the binary's subcommands:
//!
//! - [`serve`] - Runs the HTTP server, optionally opening the login page
//! - [`authorize_url`] - Prints a one-off authorize URL for manual testing
//!
//! Both take an already loaded [`crate::config::Config`]; `main` owns
//! environment loading and fatal error reporting.

mod auth;
mod serve;

pub use auth::authorize_url;
pub use serve::serve;

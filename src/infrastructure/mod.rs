//! Zellij sandbox environment helpers.
//!
//! Inside the plugin sandbox the user's host filesystem is mounted under
//! `/host`; these helpers map user-facing paths onto it.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};

//! Domain layer for the Cinedex plugin.
//!
//! Core types independent of Zellij APIs or the catalog wire format.
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie summaries, details and the overlay selection

pub mod error;
pub mod movie;

pub use error::{CinedexError, NetworkFailure, Result};
pub use movie::{MovieDetail, MovieSummary, Selection};

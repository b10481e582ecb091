//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Action>` and the
//! plugin shim (main.rs) turns each one into a Zellij host call, in order.
//!
//! # Example
//!
//! ```rust
//! use cinedex::app::Action;
//! use cinedex::catalog::CatalogRequest;
//!
//! let actions = vec![Action::Fetch(CatalogRequest::top_rated(1, 20))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::catalog::CatalogRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly asks to leave (pressing 'q').
    CloseFocus,

    /// Hands a ticketed catalog request to the host as a web request.
    ///
    /// The result comes back later as a `WebRequestResult` event carrying the
    /// same ticket in its context map.
    Fetch(CatalogRequest),
}

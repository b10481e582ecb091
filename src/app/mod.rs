//! Application layer coordinating discovery state, events, and actions.
//!
//! This layer sits between the plugin runtime (main.rs) and the catalog/domain
//! layers. Nothing in it performs I/O: catalog requests leave as actions and
//! come back as events.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → DiscoveryController → Actions → Web Requests
//!                           ↑                                                ↓
//!                           └──────────── Catalog Responses ─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transition coordinator
//! - [`discovery`]: Result-set fetches, stale discard, failure notices
//! - [`detail`]: Detail overlay resolution with id-guarded write-back
//! - [`modes`]: Discovery and input mode types
//! - [`state`]: UI-local state and view model computation

pub mod actions;
pub mod detail;
pub mod discovery;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use detail::DetailResolver;
pub use discovery::{
    DiscardReason, DiscoveryController, DiscoverySettings, DiscoveryState, FetchNotice, MainFetch,
    Settlement, DEFAULT_PAGE_SIZE, DEFAULT_TOP_LIMIT,
};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Mode};
pub use state::AppState;

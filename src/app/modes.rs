//! Discovery and input mode types.
//!
//! [`Mode`] is the discriminator of the discovery state: it decides which
//! result set is on screen and doubles as the active tab. [`InputMode`]
//! decides how key presses are interpreted.
//!
//! # State Machine
//!
//! ```text
//!            issue fetch              commit N>0 (top)
//!  Idle ───────────────▶ Loading ───────────────────▶ Top
//!   ▲                    │  ▲  │  commit N>0 (search)
//!   │ failure of the     │  │  └──────────────────▶ Search
//!   │ first fetch        │  │     commit N=0
//!   └────────────────────┘  │  ───────────────────▶ Empty
//!                           └── any settled mode, on the next fetch
//! ```
//!
//! A failed fetch returns to whichever settled mode was active before it.

/// Which result set the discovery view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Nothing has ever been committed.
    Idle,

    /// A main fetch is in flight; the previous results stay visible.
    Loading,

    /// Top rated list committed.
    Top,

    /// Title search results committed.
    Search,

    /// The last committed fetch returned zero results.
    Empty,
}

impl Mode {
    /// Whether this mode is a settled (non-loading) state.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Current input handling mode.
///
/// Overlay routing is not an input mode: whenever a movie is selected the
/// overlay owns the keyboard, independently of this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and command keys (j/k, t, /, r, Enter, q).
    Browsing,

    /// Keys edit the search draft; Enter submits, Esc cancels.
    Editing,
}

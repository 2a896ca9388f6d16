//! Lifecycle states of the core components.
//!
//! Each component has exactly two states:
//! - [`SessionPhase`]: a search session is either idle or has one fetch in flight
//! - [`FavoritesPhase`]: a favorites store has or has not read its persisted set
//!
//! # Example
//!
//! ```rust
//! use cinesearch::app::{FavoritesPhase, SessionPhase};
//!
//! assert_eq!(SessionPhase::default(), SessionPhase::Idle);
//! assert_eq!(FavoritesPhase::default(), FavoritesPhase::NotLoaded);
//! ```

/// Fetch state of a [`SearchSession`](crate::app::SearchSession).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No request outstanding.
    #[default]
    Idle,

    /// A catalog request is outstanding.
    ///
    /// Page-advance requests arriving in this state are dropped.
    Fetching,
}

/// Load state of a [`FavoritesStore`](crate::app::FavoritesStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoritesPhase {
    /// The persisted set has not been read yet.
    #[default]
    NotLoaded,

    /// The in-memory set reflects the last read or write.
    Loaded,
}

//! Load lifecycle of the feed.

use std::fmt;

/// Where the feed is in its load lifecycle.
///
/// `Idle` is initial; there is no terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet (or an in-flight load was cancelled before
    /// anything was shown).
    #[default]
    Idle,
    /// A cache load or bulk fetch is in flight with nothing to show yet,
    /// or a reset is being performed.
    Loading,
    /// Records are available.
    Loaded,
    /// The last bulk fetch failed after exhausting retries.
    Failed {
        /// Human-readable failure reason.
        message: String,
    },
}

impl LoadState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Stable name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { message } => write!(f, "failed: {message}"),
            other => f.write_str(other.as_str()),
        }
    }
}

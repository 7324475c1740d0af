/// Walk state definitions for a listing's pagination chain
///
/// Each listing root is walked through the cycle
/// `FetchPage -> ExtractEach -> Advance -> FetchPage ...` until `Done`.
use std::fmt;

/// Represents the walker's position within one listing chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkState {
    /// Fetch the current listing page and read its supplier links
    FetchPage,

    /// Extract a record for every supplier link on the current page
    ExtractEach,

    /// Move to the next page, or finish when there is none
    Advance,

    /// The chain is exhausted, truncated, or aborted by a failed page
    Done,
}

impl WalkState {
    /// Returns true if the walk has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if moving from this state to `next` is a legal step
    ///
    /// A listing fetch failure or a guard (page limit, revisited page) may end
    /// the chain from `FetchPage` or `Advance`; extraction always advances.
    pub fn can_transition_to(&self, next: WalkState) -> bool {
        matches!(
            (self, next),
            (Self::FetchPage, Self::ExtractEach)
                | (Self::FetchPage, Self::Done)
                | (Self::ExtractEach, Self::Advance)
                | (Self::Advance, Self::FetchPage)
                | (Self::Advance, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchPage => "fetch_page",
            Self::ExtractEach => "extract_each",
            Self::Advance => "advance",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for WalkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Widget seams consumed by the matcher and the calendar navigator.
//!
//! Implementations wrap a live UI session (`SessionSuggestions`,
//! `SessionCalendar`) or a scripted double in tests. Any read may fail with [`RoamerError::StaleView`] when
//! the underlying list or page was replaced mid-read.

use crate::result::{RoamerError, RoamerResult};
use std::fmt::Debug;

/// One selectable item in a dynamic suggestion list.
///
/// Candidates are re-fetched on every attempt and carry no identity beyond it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<H> {
    /// Visible label
    pub label: String,
    /// Opaque handle to the underlying element
    pub handle: H,
}

impl<H> Candidate<H> {
    /// Create a candidate
    pub fn new(label: impl Into<String>, handle: H) -> Self {
        Self {
            label: label.into(),
            handle,
        }
    }
}

/// A live, possibly re-rendering suggestion list
pub trait SuggestionSource {
    /// Element handle type
    type Handle: Clone + Debug;

    /// Query the current candidates in display order
    fn candidates(&mut self) -> RoamerResult<Vec<Candidate<Self::Handle>>>;

    /// Bring a candidate into view before interacting with it
    fn scroll_into_view(&mut self, _handle: &Self::Handle) -> RoamerResult<()> {
        Ok(())
    }

    /// Whether the candidate can be clicked right now
    fn is_interactable(&mut self, _handle: &Self::Handle) -> RoamerResult<bool> {
        Ok(true)
    }

    /// Commit the selection
    fn select(&mut self, handle: &Self::Handle) -> RoamerResult<()>;
}

/// Closure-backed [`SuggestionSource`]
pub struct FnSuggestions<C, S> {
    query: C,
    select: S,
}

impl<C, S> Debug for FnSuggestions<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSuggestions").finish_non_exhaustive()
    }
}

impl<H, C, S> FnSuggestions<C, S>
where
    C: FnMut() -> RoamerResult<Vec<Candidate<H>>>,
    S: FnMut(&H) -> RoamerResult<()>,
{
    /// Build a source from a candidate query and a select action
    pub fn new(query: C, select: S) -> Self {
        Self { query, select }
    }
}

impl<H, C, S> SuggestionSource for FnSuggestions<C, S>
where
    H: Clone + Debug,
    C: FnMut() -> RoamerResult<Vec<Candidate<H>>>,
    S: FnMut(&H) -> RoamerResult<()>,
{
    type Handle = H;

    fn candidates(&mut self) -> RoamerResult<Vec<Candidate<H>>> {
        (self.query)()
    }

    fn select(&mut self, handle: &H) -> RoamerResult<()> {
        (self.select)(handle)
    }
}

/// A paginated month-view date picker
pub trait CalendarWidget {
    /// Text of the current-page label (e.g. "July 2025")
    fn page_label(&mut self) -> RoamerResult<String>;

    /// Advance one page
    fn next_page(&mut self) -> RoamerResult<()>;

    /// Whether the widget has a previous-page control
    fn can_page_back(&self) -> bool {
        false
    }

    /// Go back one page
    fn prev_page(&mut self) -> RoamerResult<()> {
        Err(RoamerError::Config {
            message: "calendar widget has no previous-page control".into(),
        })
    }

    /// Labels of the day cells on the displayed page, in document order
    fn day_labels(&mut self) -> RoamerResult<Vec<String>>;

    /// Click the day cell at `index` (an index into [`Self::day_labels`])
    fn select_day(&mut self, index: usize) -> RoamerResult<()>;
}

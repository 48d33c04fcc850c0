//! UI session seam.
//!
//! Page objects never reach for a global driver; they are handed a
//! [`UiSession`] through a [`SessionContext`]. Any element read may fail with
//! [`RoamerError::StaleView`] once the element has been re-rendered.

use crate::calendar::{CalendarNavigator, NavigatorConfig};
use crate::clock::{SharedClock, SystemClock};
use crate::config::SuiteConfig;
use crate::locator::Selector;
use crate::matcher::SuggestionMatcher;
use crate::result::{RoamerError, RoamerResult};
use std::fmt;

/// Opaque reference to an element in the live UI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(pub String);

impl ElementRef {
    /// Create an element reference
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A live UI the page objects act on
pub trait UiSession {
    /// All elements matching `selector`, in document order
    fn find_all(&mut self, selector: &Selector) -> RoamerResult<Vec<ElementRef>>;

    /// Visible text of an element
    fn text(&mut self, element: &ElementRef) -> RoamerResult<String>;

    /// Click an element
    fn click(&mut self, element: &ElementRef) -> RoamerResult<()>;

    /// Scroll an element into view
    fn scroll_into_view(&mut self, element: &ElementRef) -> RoamerResult<()>;

    /// Whether the element is displayed and enabled
    fn is_interactable(&mut self, element: &ElementRef) -> RoamerResult<bool>;

    /// Type into an element
    fn send_keys(&mut self, element: &ElementRef, keys: &str) -> RoamerResult<()>;

    /// PNG bytes of the current viewport
    fn screenshot(&mut self) -> RoamerResult<Vec<u8>>;

    /// First element matching `selector`
    fn find(&mut self, selector: &Selector) -> RoamerResult<ElementRef> {
        self.find_all(selector)?
            .into_iter()
            .next()
            .ok_or_else(|| RoamerError::ElementNotFound {
                selector: selector.to_string(),
            })
    }

    /// Click the first element matching `selector`
    fn click_on(&mut self, selector: &Selector) -> RoamerResult<()> {
        let element = self.find(selector)?;
        self.click(&element)
    }
}

/// Session plus the suite settings and clock a scenario runs with
pub struct SessionContext<S> {
    session: S,
    config: SuiteConfig,
    clock: SharedClock,
}

impl<S> fmt::Debug for SessionContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl<S: UiSession> SessionContext<S> {
    /// Wrap a session with default settings
    pub fn new(session: S) -> Self {
        Self::with_config(session, SuiteConfig::default())
    }

    /// Wrap a session with explicit settings
    pub fn with_config(session: S, config: SuiteConfig) -> Self {
        Self {
            session,
            config,
            clock: SystemClock::shared(),
        }
    }

    /// Replace the clock
    #[must_use]
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Suite settings
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// The wrapped session
    pub fn session(&mut self) -> &mut S {
        &mut self.session
    }

    /// Matcher configured for a call site
    pub fn matcher(&self, call_site: &str) -> SuggestionMatcher {
        SuggestionMatcher::with_clock(self.config.matcher_config_for(call_site), self.clock.clone())
    }

    /// Navigator configured for a call site
    pub fn navigator(&self, call_site: &str) -> CalendarNavigator {
        self.navigator_with(self.config.navigator_config(call_site))
    }

    /// Navigator with explicit settings on this context's clock
    pub fn navigator_with(&self, config: NavigatorConfig) -> CalendarNavigator {
        CalendarNavigator::with_clock(config, self.clock.clone())
    }

    /// Release the session
    pub fn into_session(self) -> S {
        self.session
    }
}

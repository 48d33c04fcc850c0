//! Roamer: resilient widget automation for travel-booking UI suites
//!
//! Two algorithms sit at the core, both driven through narrow widget traits
//! so they run the same against a live session or a scripted double:
//!
//! - [`SuggestionMatcher`] resolves free text against a re-rendering
//!   autocomplete list (exact match first, else the shortest fuzzy match) and
//!   clicks the winner.
//! - [`CalendarNavigator`] pages a month-view date picker to a target month,
//!   re-reading the page label after every turn, and clicks the target day.
//!
//! Every read of a live list goes through [`retry_on_stale`], bounded only by
//! the operation's [`Deadline`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────────┐   ┌────────────────────┐
//! │ Page objects │──►│ SuggestionSource  │──►│ SuggestionMatcher  │
//! │ (UiSession)  │   │ CalendarWidget    │   │ CalendarNavigator  │
//! └──────────────┘   └───────────────────┘   └─────────┬──────────┘
//!                                                      │
//!                                    retry_on_stale + Deadline + Clock
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

#[allow(clippy::missing_errors_doc)]
mod artifacts;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod calendar;
mod clock;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod config;
#[allow(clippy::missing_errors_doc)]
mod date_format;
mod locator;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod matcher;
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value
)]
mod page;
mod result;
#[allow(clippy::missing_errors_doc)]
mod scenario_retry;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod session;
mod stale;
#[allow(clippy::missing_errors_doc)]
mod store;
#[allow(clippy::missing_errors_doc)]
mod time_of_day;
mod wait;
#[allow(clippy::missing_errors_doc)]
mod widget;

pub use artifacts::{capture_screenshot, clean_report_dirs, screenshot_path, SCREENSHOT_TIMESTAMP};
pub use calendar::{
    parse_day, CalendarNavigator, Direction, NavigationOutcome, NavigationPlan, NavigatorConfig,
    TargetDate, DEFAULT_MAX_PAGE_TURNS,
};
pub use clock::{Clock, FakeClock, SharedClock, SystemClock};
pub use config::{CallSiteConfig, SuiteConfig};
pub use date_format::{
    CalendarPage, DateFormat, DAY_MONTH_YEAR, DAY_MON_YEAR, MONTH_YEAR, MON_YEAR,
};
pub use locator::Selector;
pub use matcher::{
    best_match, normalize, MatchChoice, MatchKind, MatchOutcome, MatchQuery, MatchStrategy,
    MatcherConfig, NoMatchPolicy, SuggestionMatcher,
};
pub use page::{
    ActivitiesPage, AirportTransferPage, CabFare, CalendarSelectors, HourlyRentalPage,
    OutstationPage, PageObject, SessionCalendar, SessionSuggestions, SuggestionField,
    TimePickerSelectors, TransferType, ACTIVITIES_CALL_SITE, ACTIVITY_RESULT_LIMIT,
    AIRPORT_CALL_SITE, HOURLY_CALL_SITE, OUTSTATION_CALL_SITE,
};
pub use result::{RoamerError, RoamerResult};
pub use scenario_retry::{ScenarioRetry, ScenarioRun, DEFAULT_MAX_RETRIES};
pub use session::{ElementRef, SessionContext, UiSession};
pub use stale::retry_on_stale;
pub use store::{JsonStore, TextLog};
pub use time_of_day::{Meridiem, PickupTime};
pub use wait::{
    wait_for, wait_until, Deadline, WaitOptions, WaitResult, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_WAIT_TIMEOUT_MS,
};
pub use widget::{CalendarWidget, Candidate, FnSuggestions, SuggestionSource};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::{
        CalendarNavigator, CalendarWidget, Candidate, MatchStrategy, NavigatorConfig,
        NoMatchPolicy, RoamerError, RoamerResult, SessionContext, SuggestionMatcher,
        SuggestionSource, SuiteConfig, UiSession,
    };
}

//! Page Object Model Support
//!
//! Page objects encapsulate the selectors and flows of one booking page and
//! act on a [`UiSession`]. The adapters in this module bridge a session to the
//! widget traits consumed by the matcher and the calendar navigator; the
//! booking pages themselves live in one submodule each.

mod activities;
mod airport;
#[cfg(test)]
mod fake_session;
mod hourly;
mod outstation;

pub use activities::{ActivitiesPage, ACTIVITIES_CALL_SITE, ACTIVITY_RESULT_LIMIT};
pub use airport::{AirportTransferPage, TransferType, AIRPORT_CALL_SITE};
pub use hourly::{HourlyRentalPage, HOURLY_CALL_SITE};
pub use outstation::{CabFare, OutstationPage, OUTSTATION_CALL_SITE};

use crate::locator::Selector;
use crate::matcher::MatchOutcome;
use crate::result::{RoamerError, RoamerResult};
use crate::session::{ElementRef, SessionContext, UiSession};
use crate::time_of_day::{Meridiem, PickupTime};
use crate::widget::{CalendarWidget, Candidate, SuggestionSource};

/// A page or component in the UI
pub trait PageObject {
    /// URL pattern that matches this page (e.g., "/cabs", "/cabs/*")
    fn url_pattern(&self) -> &str;

    /// Element that is present once the page has rendered
    fn load_marker(&self) -> Selector;

    /// Get the page name for logging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

// =============================================================================
// SUGGESTION LIST ADAPTER
// =============================================================================

/// Suggestion list read through a session
#[derive(Debug)]
pub struct SessionSuggestions<'s, S: ?Sized> {
    session: &'s mut S,
    items: Selector,
}

impl<'s, S: UiSession + ?Sized> SessionSuggestions<'s, S> {
    /// Adapt the elements matched by `items`
    pub fn new(session: &'s mut S, items: Selector) -> Self {
        Self { session, items }
    }
}

impl<S: UiSession + ?Sized> SuggestionSource for SessionSuggestions<'_, S> {
    type Handle = ElementRef;

    fn candidates(&mut self) -> RoamerResult<Vec<Candidate<ElementRef>>> {
        let elements = self.session.find_all(&self.items)?;
        elements
            .into_iter()
            .map(|e| Ok(Candidate::new(self.session.text(&e)?, e)))
            .collect()
    }

    fn scroll_into_view(&mut self, handle: &ElementRef) -> RoamerResult<()> {
        self.session.scroll_into_view(handle)
    }

    fn is_interactable(&mut self, handle: &ElementRef) -> RoamerResult<bool> {
        self.session.is_interactable(handle)
    }

    fn select(&mut self, handle: &ElementRef) -> RoamerResult<()> {
        self.session.click(handle)
    }
}

/// A typed field with an autocomplete list under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionField {
    /// Control clicked before typing, if the input is hidden behind one
    pub opener: Option<Selector>,
    /// Text input
    pub input: Selector,
    /// Suggestion items
    pub items: Selector,
}

/// Type `text` into `field` and let the call site's matcher pick a suggestion
fn type_and_pick<S: UiSession>(
    ctx: &mut SessionContext<S>,
    call_site: &str,
    field: &SuggestionField,
    text: &str,
) -> RoamerResult<MatchOutcome> {
    let matcher = ctx.matcher(call_site);
    let session = ctx.session();
    if let Some(opener) = &field.opener {
        session.click_on(opener)?;
    }
    let input = session.find(&field.input)?;
    session.send_keys(&input, text)?;
    let mut list = SessionSuggestions::new(session, field.items.clone());
    matcher.match_and_select(text, &mut list)
}

// =============================================================================
// CALENDAR ADAPTER
// =============================================================================

/// Selectors of a month-view date picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSelectors {
    /// Label parts, read in order and joined with a space
    pub label: Vec<Selector>,
    /// Next-page control
    pub next: Selector,
    /// Previous-page control, when the widget has one
    pub prev: Option<Selector>,
    /// Day cells
    pub days: Selector,
}

/// Calendar widget read through a session
#[derive(Debug)]
pub struct SessionCalendar<'s, S: ?Sized> {
    session: &'s mut S,
    selectors: CalendarSelectors,
}

impl<'s, S: UiSession + ?Sized> SessionCalendar<'s, S> {
    /// Adapt a date picker
    pub fn new(session: &'s mut S, selectors: CalendarSelectors) -> Self {
        Self { session, selectors }
    }
}

impl<S: UiSession + ?Sized> CalendarWidget for SessionCalendar<'_, S> {
    fn page_label(&mut self) -> RoamerResult<String> {
        let mut parts = Vec::with_capacity(self.selectors.label.len());
        for selector in &self.selectors.label {
            let element = self.session.find(selector)?;
            parts.push(self.session.text(&element)?.trim().to_string());
        }
        Ok(parts.join(" "))
    }

    fn next_page(&mut self) -> RoamerResult<()> {
        self.session.click_on(&self.selectors.next)
    }

    fn can_page_back(&self) -> bool {
        self.selectors.prev.is_some()
    }

    fn prev_page(&mut self) -> RoamerResult<()> {
        match &self.selectors.prev {
            Some(prev) => self.session.click_on(prev),
            None => Err(RoamerError::ElementNotFound {
                selector: "previous-page control".into(),
            }),
        }
    }

    fn day_labels(&mut self) -> RoamerResult<Vec<String>> {
        let cells = self.session.find_all(&self.selectors.days)?;
        cells.iter().map(|c| self.session.text(c)).collect()
    }

    fn select_day(&mut self, index: usize) -> RoamerResult<()> {
        let cells = self.session.find_all(&self.selectors.days)?;
        let cell = cells
            .get(index)
            .ok_or_else(|| RoamerError::stale("day cells changed between read and click"))?;
        self.session.click(cell)
    }
}

// =============================================================================
// SHARED CONTROLS
// =============================================================================

/// Selectors of an AM/PM hour and minute picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePickerSelectors {
    /// AM toggle
    pub am: Selector,
    /// PM toggle
    pub pm: Selector,
    /// Hour items, labelled like `"9 Hr."`
    pub hours: Selector,
    /// Minute items, labelled like `"05 Min."`
    pub minutes: Selector,
    /// Confirm button
    pub done: Selector,
}

/// Set `time` on a time picker
fn set_time<S: UiSession + ?Sized>(
    session: &mut S,
    picker: &TimePickerSelectors,
    time: &PickupTime,
) -> RoamerResult<()> {
    let meridiem = match time.meridiem {
        Meridiem::Am => &picker.am,
        Meridiem::Pm => &picker.pm,
    };
    session.click_on(meridiem)?;
    let hour = time.hour_label();
    click_option(session, &picker.hours, |text| text == hour)?;
    let minute = time.minute_label();
    click_option(session, &picker.minutes, |text| text == minute)?;
    session.click_on(&picker.done)
}

/// Click the first item whose trimmed text passes `accept`
fn click_option<S, F>(session: &mut S, items: &Selector, accept: F) -> RoamerResult<()>
where
    S: UiSession + ?Sized,
    F: Fn(&str) -> bool,
{
    for item in session.find_all(items)? {
        if accept(session.text(&item)?.trim()) {
            return session.click(&item);
        }
    }
    Err(RoamerError::ElementNotFound {
        selector: items.to_string(),
    })
}

/// Click `selector` if it is displayed and enabled
fn click_if_interactable<S: UiSession + ?Sized>(session: &mut S, selector: &Selector) -> RoamerResult<()> {
    let element = session.find(selector)?;
    if !session.is_interactable(&element)? {
        return Err(RoamerError::ElementNotFound {
            selector: selector.to_string(),
        });
    }
    session.click(&element)
}

/// Trimmed texts of every element matching `selector`; none is an error
fn texts<S: UiSession + ?Sized>(session: &mut S, selector: &Selector) -> RoamerResult<Vec<String>> {
    let elements = session.find_all(selector)?;
    let texts = elements
        .iter()
        .map(|e| session.text(e).map(|t| t.trim().to_string()))
        .collect::<RoamerResult<Vec<_>>>()?;
    if texts.is_empty() {
        return Err(RoamerError::ElementNotFound {
            selector: selector.to_string(),
        });
    }
    Ok(texts)
}

//! Calendar Navigation
//!
//! Drives a paginated month-view date picker to a target month and clicks
//! the target day.
//!
//! Navigation is a convergence loop: the page label is re-read after every
//! page turn and compared with the target again, so widgets that skip or
//! clamp at their range boundaries never cause an overshoot. A page-turn cap
//! stops the loop when the target is out of reach.

use crate::clock::{SharedClock, SystemClock};
use crate::date_format::{CalendarPage, DateFormat, MONTH_YEAR};
use crate::result::{RoamerError, RoamerResult};
use crate::stale::retry_on_stale;
use crate::wait::{Deadline, WaitOptions};
use crate::widget::CalendarWidget;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

/// Default cap on page turns per navigation
pub const DEFAULT_MAX_PAGE_TURNS: usize = 60;

/// A parsed target date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDate {
    /// Day of month
    pub day: u32,
    /// Month, 1-12
    pub month: u32,
    /// Year
    pub year: i32,
}

impl TargetDate {
    /// Page that shows this date
    #[must_use]
    pub const fn page(&self) -> CalendarPage {
        CalendarPage {
            year: self.year,
            month: self.month,
        }
    }
}

impl From<NaiveDate> for TargetDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
            year: date.year(),
        }
    }
}

/// Which way the widget has to page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Displayed period is before the target
    Forward,
    /// Displayed period is after the target
    Backward,
    /// Displayed period is the target
    None,
}

impl Direction {
    /// Direction from `displayed` towards `target`
    #[must_use]
    pub fn between(displayed: CalendarPage, target: CalendarPage) -> Self {
        match displayed.cmp(&target) {
            Ordering::Less => Self::Forward,
            Ordering::Greater => Self::Backward,
            Ordering::Equal => Self::None,
        }
    }
}

/// Per-call-site navigator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Format of the caller's target date text
    #[serde(default = "default_date_format")]
    pub date_format: DateFormat,
    /// Format of the widget's month/year label
    #[serde(default = "default_page_label_format")]
    pub page_label_format: DateFormat,
    /// Page turns allowed before giving up
    #[serde(default = "default_max_page_turns")]
    pub max_page_turns: usize,
    /// Stale-view retry bound for each widget read or action
    #[serde(default)]
    pub wait: WaitOptions,
}

fn default_date_format() -> DateFormat {
    DateFormat::default()
}

fn default_page_label_format() -> DateFormat {
    DateFormat::from_pattern(MONTH_YEAR).unwrap_or_default()
}

const fn default_max_page_turns() -> usize {
    DEFAULT_MAX_PAGE_TURNS
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            page_label_format: default_page_label_format(),
            max_page_turns: DEFAULT_MAX_PAGE_TURNS,
            wait: WaitOptions::default(),
        }
    }
}

impl NavigatorConfig {
    /// Build a config from date and label patterns
    pub fn from_patterns(date_pattern: &str, label_pattern: &str) -> RoamerResult<Self> {
        Ok(Self {
            date_format: DateFormat::from_pattern(date_pattern)?,
            page_label_format: DateFormat::from_pattern(label_pattern)?,
            ..Self::default()
        })
    }

    /// Set the page-turn cap
    #[must_use]
    pub const fn with_max_page_turns(mut self, max: usize) -> Self {
        self.max_page_turns = max;
        self
    }

    /// Set the stale-retry timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.wait.timeout_ms = timeout_ms;
        self
    }
}

/// Result of a completed navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationOutcome {
    /// Date that was selected
    pub target: TargetDate,
    /// Page turns performed
    pub page_turns: usize,
    /// Index of the clicked day cell
    pub day_index: usize,
}

/// Expected navigation, computed without touching a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationPlan {
    /// Parsed target
    pub target: TargetDate,
    /// Parsed displayed page
    pub displayed: CalendarPage,
    /// Paging direction
    pub direction: Direction,
    /// Page turns needed on a widget that pages one month at a time
    pub page_turns: u64,
}

/// Pages a calendar widget to a target date
#[derive(Debug, Clone)]
pub struct CalendarNavigator {
    config: NavigatorConfig,
    clock: SharedClock,
}

impl Default for CalendarNavigator {
    fn default() -> Self {
        Self::new(NavigatorConfig::default())
    }
}

impl CalendarNavigator {
    /// Create a navigator on the system clock
    #[must_use]
    pub fn new(config: NavigatorConfig) -> Self {
        Self::with_clock(config, SystemClock::shared())
    }

    /// Create a navigator on an explicit clock
    #[must_use]
    pub fn with_clock(config: NavigatorConfig, clock: SharedClock) -> Self {
        Self { config, clock }
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Parse target date text with the configured format
    pub fn parse_target(&self, text: &str) -> RoamerResult<TargetDate> {
        self.config.date_format.parse_date(text).map(TargetDate::from)
    }

    /// Deadline for one widget read or action
    fn step_deadline(&self) -> Deadline<'_> {
        Deadline::new(self.clock.as_ref(), self.config.wait.timeout())
    }

    /// Compute direction and distance from a page label to a target date
    pub fn plan(&self, target_text: &str, page_label: &str) -> RoamerResult<NavigationPlan> {
        let target = self.parse_target(target_text)?;
        let displayed = self.config.page_label_format.parse_page(page_label)?;
        Ok(NavigationPlan {
            target,
            displayed,
            direction: Direction::between(displayed, target.page()),
            page_turns: displayed.months_until(target.page()).unsigned_abs(),
        })
    }

    /// Page `widget` to the month of `target_text` and click its day.
    ///
    /// The date is parsed before the widget is touched. Fails with
    /// `NavigationUnsupported` when the target is behind the displayed page
    /// and the widget cannot page back, `NavigationTimeout` after
    /// `max_page_turns` turns without reaching the target, and `DayNotFound`
    /// when the target page has no matching day cell.
    ///
    /// The wait timeout bounds each label read, page turn and day click on
    /// its own; the whole navigation is bounded by the page-turn cap.
    pub fn navigate_to_date<W>(&self, target_text: &str, widget: &mut W) -> RoamerResult<NavigationOutcome>
    where
        W: CalendarWidget + ?Sized,
    {
        let target = self.parse_target(target_text)?;
        let goal = target.page();
        let mut page_turns = 0;

        loop {
            let label = retry_on_stale(&self.step_deadline(), "calendar label", || widget.page_label())?;
            let displayed = self.config.page_label_format.parse_page(&label)?;
            let direction = Direction::between(displayed, goal);

            if direction == Direction::None {
                break;
            }
            if direction == Direction::Backward && !widget.can_page_back() {
                return Err(RoamerError::NavigationUnsupported {
                    displayed: displayed.to_string(),
                    target: goal.to_string(),
                });
            }
            if page_turns >= self.config.max_page_turns {
                return Err(RoamerError::NavigationTimeout {
                    attempts: page_turns,
                    target: goal.to_string(),
                });
            }

            debug!(%displayed, target = %goal, ?direction, page_turns, "turning calendar page");
            match direction {
                Direction::Forward => {
                    retry_on_stale(&self.step_deadline(), "next page", || widget.next_page())?;
                }
                Direction::Backward => {
                    retry_on_stale(&self.step_deadline(), "previous page", || widget.prev_page())?;
                }
                Direction::None => {}
            }
            page_turns += 1;
        }

        let day_index = click_day(&self.step_deadline(), widget, target.day)?;
        info!(date = target_text.trim(), page_turns, "calendar date selected");
        Ok(NavigationOutcome {
            target,
            page_turns,
            day_index,
        })
    }

    /// Click a bare day-of-month on the page the widget is showing
    pub fn select_day<W>(&self, day_text: &str, widget: &mut W) -> RoamerResult<usize>
    where
        W: CalendarWidget + ?Sized,
    {
        let day = parse_day(day_text)?;
        let index = click_day(&self.step_deadline(), widget, day)?;
        info!(day, "calendar day selected");
        Ok(index)
    }
}

/// Parse a day-of-month in 1..=31
pub fn parse_day(text: &str) -> RoamerResult<u32> {
    text.trim()
        .parse::<u32>()
        .ok()
        .filter(|d| (1..=31).contains(d))
        .ok_or_else(|| RoamerError::InvalidDateFormat {
            input: text.to_string(),
            format: "d".into(),
        })
}

/// Day cell label with whitespace and leading zeros removed
fn day_key(label: &str) -> &str {
    label.trim().trim_start_matches('0')
}

/// Click the first cell, in document order, labelled `day`.
///
/// Greyed-out cells of adjacent months are not told apart from in-month ones.
fn click_day<W>(deadline: &Deadline<'_>, widget: &mut W, day: u32) -> RoamerResult<usize>
where
    W: CalendarWidget + ?Sized,
{
    let wanted = day.to_string();
    retry_on_stale(deadline, "day cells", || {
        let labels = widget.day_labels()?;
        let index = labels
            .iter()
            .position(|l| day_key(l) == wanted)
            .ok_or(RoamerError::DayNotFound { day })?;
        widget.select_day(index)?;
        Ok(index)
    })
}

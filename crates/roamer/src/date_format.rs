//! Date patterns used by the booking widgets.
//!
//! Call sites describe their date text with pattern tokens such as
//! `dd/MMM/yyyy` or `MMMM yyyy`. A [`DateFormat`] translates those tokens to
//! chrono strftime items once, then parses target dates and calendar page
//! labels strictly: impossible dates such as `31/02/2025` are rejected.

use crate::result::{RoamerError, RoamerResult};
use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `dd/MM/yyyy`, e.g. `15/07/2025`
pub const DAY_MONTH_YEAR: &str = "dd/MM/yyyy";

/// `dd/MMM/yyyy`, e.g. `15/Jul/2025`
pub const DAY_MON_YEAR: &str = "dd/MMM/yyyy";

/// `MMMM yyyy`, e.g. `July 2025`
pub const MONTH_YEAR: &str = "MMMM yyyy";

/// `MMM yyyy`, e.g. `Jul 2025`
pub const MON_YEAR: &str = "MMM yyyy";

/// A date pattern and its strftime translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateFormat {
    pattern: String,
    strftime: String,
}

impl DateFormat {
    /// Translate a token pattern.
    ///
    /// Supported tokens: `d`, `dd`, `M`, `MM`, `MMM`, `MMMM`, `yy`, `yyyy`.
    /// Any other letter is rejected; everything else is a literal.
    pub fn from_pattern(pattern: &str) -> RoamerResult<Self> {
        if pattern.trim().is_empty() {
            return Err(RoamerError::Config {
                message: "empty date pattern".into(),
            });
        }

        let chars: Vec<char> = pattern.chars().collect();
        let mut strftime = String::with_capacity(pattern.len() * 2);
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let run = chars[i..].iter().take_while(|&&n| n == c).count();

            if c.is_ascii_alphabetic() {
                let item = match (c, run) {
                    ('d', 1) => "%-d",
                    ('d', 2) => "%d",
                    ('M', 1) => "%-m",
                    ('M', 2) => "%m",
                    ('M', 3) => "%b",
                    ('M', _) => "%B",
                    ('y', 2) => "%y",
                    ('y', _) => "%Y",
                    _ => {
                        let token: String = chars[i..i + run].iter().collect();
                        return Err(RoamerError::Config {
                            message: format!(
                                "unsupported token '{token}' in date pattern '{pattern}'"
                            ),
                        });
                    }
                };
                strftime.push_str(item);
            } else {
                for _ in 0..run {
                    if c == '%' {
                        strftime.push_str("%%");
                    } else {
                        strftime.push(c);
                    }
                }
            }
            i += run;
        }

        Ok(Self {
            pattern: pattern.to_string(),
            strftime,
        })
    }

    /// Original token pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// chrono strftime translation
    #[must_use]
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Parse a full calendar date
    pub fn parse_date(&self, text: &str) -> RoamerResult<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), &self.strftime).map_err(|_| {
            RoamerError::InvalidDateFormat {
                input: text.to_string(),
                format: self.pattern.clone(),
            }
        })
    }

    /// Parse a month/year page label; the day is implied.
    pub fn parse_page(&self, label: &str) -> RoamerResult<CalendarPage> {
        let invalid = || RoamerError::InvalidPageLabel {
            label: label.to_string(),
            format: self.pattern.clone(),
        };

        let mut parsed = Parsed::default();
        parse(&mut parsed, label.trim(), StrftimeItems::new(&self.strftime)).map_err(|_| invalid())?;
        if !self.pattern.contains('d') {
            parsed.set_day(1).map_err(|_| invalid())?;
        }
        let date = parsed.to_naive_date().map_err(|_| invalid())?;
        Ok(CalendarPage::from_date(date))
    }

    /// Render a date with this pattern
    #[must_use]
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.strftime).to_string()
    }

    /// Render a page label with this pattern
    #[must_use]
    pub fn format_page(&self, page: CalendarPage) -> Option<String> {
        page.first_day().map(|d| self.format_date(d))
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: DAY_MONTH_YEAR.to_string(),
            strftime: "%d/%m/%Y".to_string(),
        }
    }
}

impl TryFrom<String> for DateFormat {
    type Error = RoamerError;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        Self::from_pattern(&pattern)
    }
}

impl From<DateFormat> for String {
    fn from(format: DateFormat) -> Self {
        format.pattern
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// The month and year a calendar widget is displaying
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarPage {
    /// Year
    pub year: i32,
    /// Month, 1-12
    pub month: u32,
}

impl CalendarPage {
    /// Create a page; `None` for an out-of-range month
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Page containing `date`
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the page's month
    #[must_use]
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Signed number of months from `self` to `other`
    #[must_use]
    pub fn months_until(&self, other: Self) -> i64 {
        let ordinal = |p: Self| i64::from(p.year) * 12 + i64::from(p.month);
        ordinal(other) - ordinal(*self)
    }
}

impl fmt::Display for CalendarPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

//! Pickup time parsing for the cab time pickers.
//!
//! The pickers list hours as `"<h> Hr."` without a leading zero and minutes
//! as `"<mm> Min."`, with a separate AM/PM toggle.

use crate::result::{RoamerError, RoamerResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

const TIME_PATTERN: &str = r"^(\d{1,2}):(\d{2})\s+([AaPp][Mm])$";

/// AM or PM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Meridiem {
    /// Before noon
    Am,
    /// After noon
    Pm,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Am => f.write_str("AM"),
            Self::Pm => f.write_str("PM"),
        }
    }
}

/// A 12-hour pickup time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupTime {
    /// Hour, 1-12
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
    /// AM/PM
    pub meridiem: Meridiem,
}

impl PickupTime {
    /// Parse `"HH:mm AM"` / `"H:mm PM"`
    pub fn parse(text: &str) -> RoamerResult<Self> {
        let invalid = || RoamerError::InvalidTime {
            input: text.to_string(),
        };
        let re = Regex::new(TIME_PATTERN).map_err(|e| RoamerError::Config {
            message: format!("time pattern: {e}"),
        })?;
        let caps = re.captures(text.trim()).ok_or_else(invalid)?;

        let hour: u8 = caps[1].parse().map_err(|_| invalid())?;
        let minute: u8 = caps[2].parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&hour) || minute > 59 {
            return Err(invalid());
        }
        let meridiem = if caps[3].eq_ignore_ascii_case("am") {
            Meridiem::Am
        } else {
            Meridiem::Pm
        };

        Ok(Self {
            hour,
            minute,
            meridiem,
        })
    }

    /// Hour-list label, e.g. `"9 Hr."`
    #[must_use]
    pub fn hour_label(&self) -> String {
        format!("{} Hr.", self.hour)
    }

    /// Minute-list label, e.g. `"05 Min."`
    #[must_use]
    pub fn minute_label(&self) -> String {
        format!("{:02} Min.", self.minute)
    }
}

impl fmt::Display for PickupTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}

//! Days of the week

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, Weekday};
use serde::{Deserialize, Serialize};

/// Errors from parsing user-supplied names
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown day '{0}' (expected Monday..Sunday)")]
    Day(String),
    #[error("Unknown focus type '{0}' (expected Strength, Hypertrophy or Endurance)")]
    Focus(String),
}

/// Calendar day, ordered Monday (0) to Sunday (6)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeekDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl WeekDay {
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            WeekDay::Monday => "Monday",
            WeekDay::Tuesday => "Tuesday",
            WeekDay::Wednesday => "Wednesday",
            WeekDay::Thursday => "Thursday",
            WeekDay::Friday => "Friday",
            WeekDay::Saturday => "Saturday",
            WeekDay::Sunday => "Sunday",
        }
    }

    /// True when `other` is the next or previous day.
    /// Sunday and Monday are not adjacent: the week does not wrap.
    pub fn is_adjacent(self, other: WeekDay) -> bool {
        self.index().abs_diff(other.index()) == 1
    }

    /// Current local day
    pub fn today() -> Self {
        Local::now().weekday().into()
    }
}

impl From<Weekday> for WeekDay {
    fn from(day: Weekday) -> Self {
        WeekDay::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeekDay {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        WeekDay::ALL
            .into_iter()
            .find(|d| {
                let name = d.name().to_lowercase();
                name == wanted || (wanted.len() == 3 && name.starts_with(&wanted))
            })
            .ok_or_else(|| ParseError::Day(s.trim().to_string()))
    }
}

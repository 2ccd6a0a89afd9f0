//! Types shared by several record kinds.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Stored date format (`DD-MM-YYYY`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";
/// Stored time format (`HH:MM:SS`).
pub const TIME_FORMAT: &str = "%H:%M:%S";
/// Stored date-and-time format for test scheduling (`DD-MM-YYYY (HH:MM)`).
pub const DATE_TIME_FORMAT: &str = "%d-%m-%Y (%H:%M)";

/// Gender radio: two fixed options plus free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Other(String),
}

impl Gender {
    pub const OPTIONS: [&'static str; 3] = ["Female", "Male", "Other"];

    /// Value written to the `gender` column.
    pub fn stored(&self) -> &str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Other(text) if !text.trim().is_empty() => text.as_str(),
            Gender::Other(_) => "Other",
        }
    }
}

/// Two-step delete gate: a checkbox acknowledgement and a separate commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confirmation {
    pub acknowledged: bool,
    pub committed: bool,
}

impl Confirmation {
    pub fn new(acknowledged: bool, committed: bool) -> Self {
        Self {
            acknowledged,
            committed,
        }
    }

    /// Both steps done.
    pub fn is_confirmed(&self) -> bool {
        self.acknowledged && self.committed
    }
}

/// Whole years between `dob` and `today`.
pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// A record that can be shown as a row under fixed column titles.
pub trait Tabular {
    const TITLES: &'static [&'static str];

    fn to_row(&self) -> Vec<String>;
}

/// Render an optional cell.
pub(crate) fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "None".to_string())
}

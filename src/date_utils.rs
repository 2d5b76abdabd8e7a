use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Display format for the session date: `DD/MM/YYYY`.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// The date a dashboard session was opened.
///
/// Captured once when the dashboard is created and never recomputed, so a
/// session that runs past midnight keeps reporting the day it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionDate(NaiveDate);

impl SessionDate {
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Zero-padded `DD/MM/YYYY`.
    pub fn display(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }

    /// The display date with slashes replaced by hyphens, for sheet and file names.
    pub fn file_stamp(&self) -> String {
        self.display().replace('/', "-")
    }
}

impl std::fmt::Display for SessionDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

//! Date picker adapter
//!
//! Dates are shown as `1 August 2025` and sent as `2025-08-01`. Nothing but
//! the transmission form ever reaches the API.

use crate::error::Precondition;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Format shown in date inputs
pub const DISPLAY_FORMAT: &str = "%-d %B %Y";
/// Wire format
pub const TRANSMISSION_FORMAT: &str = "%Y-%m-%d";

pub fn to_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

pub fn to_transmission(date: NaiveDate) -> String {
    date.format(TRANSMISSION_FORMAT).to_string()
}

/// Parse either the display or the wire form
pub fn parse(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    ["%d %B %Y", "%d %b %Y", TRANSMISSION_FORMAT]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
}

/// Date typed into a free-text field
///
/// A blank field is `None`; anything else must parse.
pub fn parse_input(input: &str) -> Result<Option<NaiveDate>, Precondition> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse(input).map(Some).ok_or(Precondition::InvalidDate)
}

/// Earliest check-out for a given check-in
pub fn min_check_out(check_in: NaiveDate) -> NaiveDate {
    check_in.checked_add_days(Days::new(1)).unwrap_or(check_in)
}

/// Date range of one search/booking session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchDates {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl SearchDates {
    /// Validate a range against today: both present, check-in not in the
    /// past, check-out strictly after check-in
    pub fn validate(
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, Precondition> {
        let dates = Self::ordered(check_in, check_out);
        if check_out.is_some() && check_in.is_some_and(|d| d < today) {
            return Err(Precondition::CheckInInPast);
        }
        dates
    }

    /// Both present and check-out strictly after check-in, whatever today is
    ///
    /// Staff use this for stays that are already under way.
    pub fn ordered(
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> Result<Self, Precondition> {
        let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
            return Err(Precondition::MissingDates);
        };
        if check_out <= check_in {
            return Err(Precondition::CheckOutNotAfterCheckIn);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn display(&self) -> String {
        format!("{} - {}", to_display(self.check_in), to_display(self.check_out))
    }
}

/// State of a check-in/check-out picker pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangePicker {
    today: NaiveDate,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
}

impl DateRangePicker {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            check_in: None,
            check_out: None,
        }
    }

    /// Picker pre-filled with an existing range (modify forms)
    pub fn with_range(today: NaiveDate, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            today,
            check_in: Some(check_in),
            check_out: Some(check_out),
        }
    }

    pub fn check_in(&self) -> Option<NaiveDate> {
        self.check_in
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        self.check_out
    }

    pub fn min_check_in(&self) -> NaiveDate {
        self.today
    }

    /// Lowest selectable check-out: the day after check-in, or tomorrow
    pub fn min_check_out(&self) -> NaiveDate {
        min_check_out(self.check_in.unwrap_or(self.today))
    }

    /// Pick a check-in date; returns false when the date is not selectable
    ///
    /// An existing check-out is kept even if it now falls before the new
    /// minimum; validation on submit rejects it.
    pub fn set_check_in(&mut self, date: NaiveDate) -> bool {
        if date < self.min_check_in() {
            return false;
        }
        self.check_in = Some(date);
        true
    }

    /// Pick a check-out date; returns false when the date is not selectable
    pub fn set_check_out(&mut self, date: NaiveDate) -> bool {
        if date < self.min_check_out() {
            return false;
        }
        self.check_out = Some(date);
        true
    }

    /// Typed check-in; unparseable input clears the field
    pub fn input_check_in(&mut self, input: &str) -> bool {
        match parse(input) {
            Some(date) => self.set_check_in(date),
            None => {
                self.check_in = None;
                false
            }
        }
    }

    /// Typed check-out; unparseable input clears the field
    pub fn input_check_out(&mut self, input: &str) -> bool {
        match parse(input) {
            Some(date) => self.set_check_out(date),
            None => {
                self.check_out = None;
                false
            }
        }
    }

    pub fn check_in_display(&self) -> String {
        self.check_in.map(to_display).unwrap_or_default()
    }

    pub fn check_out_display(&self) -> String {
        self.check_out.map(to_display).unwrap_or_default()
    }

    pub fn check_in_transmission(&self) -> String {
        self.check_in.map(to_transmission).unwrap_or_default()
    }

    pub fn check_out_transmission(&self) -> String {
        self.check_out.map(to_transmission).unwrap_or_default()
    }

    /// Validated range, as submitted
    pub fn dates(&self) -> Result<SearchDates, Precondition> {
        SearchDates::validate(self.check_in, self.check_out, self.today)
    }
}

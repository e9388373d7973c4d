//! Date helpers for the `dd/mm/yyyy` form used on screen and the ISO form
//! exchanged with the backend.

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;

const BR_FORMAT: &str = "%d/%m/%Y";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parses `dd/mm/yyyy`, rejecting impossible dates such as 31/02/2024.
pub fn parse_br_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), BR_FORMAT)
        .map_err(|e| ValidationError::InvalidDate(format!("{}: {}", input, e)))
}

pub fn format_br_date(date: NaiveDate) -> String {
    date.format(BR_FORMAT).to_string()
}

/// Converts `yyyy-mm-dd` to `dd/mm/yyyy`.
pub fn iso_to_br(input: &str) -> Result<String, ValidationError> {
    let date = NaiveDate::parse_from_str(input.trim(), ISO_FORMAT)
        .map_err(|e| ValidationError::InvalidDate(format!("{}: {}", input, e)))?;
    Ok(format_br_date(date))
}

/// Full years between `birth` and `on`; zero if `birth` is in the future.
pub fn age_on(birth: NaiveDate, on: NaiveDate) -> u32 {
    if on < birth {
        return 0;
    }

    let mut years = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years as u32
}

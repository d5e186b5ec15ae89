use super::{days_in_month, CalendarMonth};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{Date, Month};

/// Canonical identity of a calendar day, written as `YYYY-MM-DD` with a
/// zero-padded year of at least four digits and a 1-based, zero-padded month
/// and day.
///
/// Ordering is chronological.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct DateKey {
    year: i32,
    month: u8,
    day: u8,
}

impl DateKey {
    // `day` must be within the month; the grid builder is the only caller
    // that does not go through validation.
    pub(super) fn new(month: CalendarMonth, day: u8) -> DateKey {
        debug_assert!(
            (1..=month.days()).contains(&day),
            "day should be within the month"
        );
        DateKey {
            year: month.year(),
            month: u8::from(month.month()),
            day,
        }
    }

    pub(crate) fn from_date(date: Date) -> DateKey {
        DateKey {
            year: date.year(),
            month: u8::from(date.month()),
            day: date.day(),
        }
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(f, "-{:04}", self.year.unsigned_abs())?;
        } else {
            write!(f, "{:04}", self.year)?;
        }
        write!(f, "-{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<DateKey, DateKeyError> {
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let mut parts = unsigned.splitn(3, '-');
        let (Some(ys), Some(ms), Some(ds)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DateKeyError::Format);
        };
        if ys.len() < 4 || ms.len() != 2 || ds.len() != 2 {
            return Err(DateKeyError::Format);
        }
        let year = parse_digits::<i32>(ys)?;
        let year = if negative { -year } else { year };
        let month = parse_digits::<u8>(ms)?;
        let day = parse_digits::<u8>(ds)?;
        let m = Month::try_from(month).map_err(|_| DateKeyError::Month(month))?;
        if day == 0 || day > days_in_month(year, m) {
            return Err(DateKeyError::Day(day));
        }
        Ok(DateKey { year, month, day })
    }
}

fn parse_digits<T: FromStr>(s: &str) -> Result<T, DateKeyError> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateKeyError::Format);
    }
    s.parse::<T>().map_err(|_| DateKeyError::Format)
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum DateKeyError {
    #[error("date key is not of the form YYYY-MM-DD")]
    Format,
    #[error("month {0} is not in 1 through 12")]
    Month(u8),
    #[error("day {0} does not exist in the given month")]
    Day(u8),
}

mod datekey;
mod grid;
mod widget;
pub(crate) use self::datekey::DateKey;
pub(crate) use self::grid::{build_grid, days_in_month, CalendarGrid, DayCell};
pub(crate) use self::widget::MonthCalendar;
use std::fmt;
use thiserror::Error;
use time::{
    Date,
    Month::{self, December, January},
    Weekday,
};

/// A month of a specific year, as shown by one page of the calendar.
///
/// Values are never mutated by navigation; `previous()` and `next()` return a
/// new `CalendarMonth`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct CalendarMonth {
    year: i32,
    month: Month,
}

impl CalendarMonth {
    pub(crate) const fn new(year: i32, month: Month) -> CalendarMonth {
        CalendarMonth { year, month }
    }

    pub(crate) fn containing(date: Date) -> CalendarMonth {
        CalendarMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub(crate) fn year(self) -> i32 {
        self.year
    }

    pub(crate) fn month(self) -> Month {
        self.month
    }

    pub(crate) fn index0(self) -> u8 {
        u8::from(self.month) - 1
    }

    pub(crate) fn days(self) -> u8 {
        days_in_month(self.year, self.month)
    }

    pub(crate) fn previous(self) -> Result<CalendarMonth, OutOfTimeError> {
        let month = self.month.previous();
        let year = if month == December {
            self.year.checked_sub(1).ok_or(OutOfTimeError)?
        } else {
            self.year
        };
        Ok(CalendarMonth { year, month })
    }

    pub(crate) fn next(self) -> Result<CalendarMonth, OutOfTimeError> {
        let month = self.month.next();
        let year = if month == January {
            self.year.checked_add(1).ok_or(OutOfTimeError)?
        } else {
            self.year
        };
        Ok(CalendarMonth { year, month })
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }
}

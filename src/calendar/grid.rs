use super::{CalendarMonth, DateKey, WeekdayExt};
use std::iter::successors;
use std::ops::Index;
use time::{Month, Month::*, Weekday, Weekday::Sunday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Offsets of the first of each month from the first of March, modulo 7, as
/// used by Sakamoto's day-of-week method
const MONTH_OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

pub(crate) fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        February if is_leap_year(year) => 29,
        February => 28,
        April | June | September | November => 30,
        January | March | May | July | August | October | December => 31,
    }
}

/// Returns the index (0 = Sunday, 6 = Saturday) of the weekday on which the
/// first day of the given month falls.  Works for any year of the proleptic
/// Gregorian calendar.
pub(crate) fn first_weekday_offset(month: CalendarMonth) -> usize {
    let mi = usize::from(month.index0());
    let mut y = i64::from(month.year());
    if mi < 2 {
        y -= 1;
    }
    let dow = (y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400) + MONTH_OFFSETS[mi] + 1)
        .rem_euclid(7);
    usize::try_from(dow).expect("weekday index should fit in a usize")
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DayCell {
    Empty,
    Day { day: u8, key: DateKey },
}

impl DayCell {
    #[cfg(test)]
    pub(crate) fn day(&self) -> Option<u8> {
        match self {
            DayCell::Empty => None,
            DayCell::Day { day, .. } => Some(*day),
        }
    }

    pub(crate) fn key(&self) -> Option<DateKey> {
        match self {
            DayCell::Empty => None,
            DayCell::Day { key, .. } => Some(*key),
        }
    }
}

/// Seven cells, Sunday first
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct WeekRow([DayCell; DAYS_IN_WEEK]);

impl WeekRow {
    pub(crate) fn cells(&self) -> &[DayCell; DAYS_IN_WEEK] {
        &self.0
    }

    /// Iterate over the in-month days of the week, paired with their weekdays
    pub(crate) fn days(&self) -> impl Iterator<Item = (Weekday, u8, DateKey)> + '_ {
        successors(Some(Sunday), |wd| Some(wd.next()))
            .zip(self.0.iter())
            .filter_map(|(wd, cell)| match cell {
                DayCell::Empty => None,
                DayCell::Day { day, key } => Some((wd, *day, *key)),
            })
    }
}

impl Index<Weekday> for WeekRow {
    type Output = DayCell;

    fn index(&self, wd: Weekday) -> &DayCell {
        &self.0[wd.index0()]
    }
}

/// The layout of a single month: as many week rows as are needed to hold
/// every day of the month, with empty cells before the first and after the
/// last day.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarGrid {
    month: CalendarMonth,
    offset: usize,
    days: u8,
    rows: Vec<WeekRow>,
}

impl CalendarGrid {
    pub(crate) fn month(&self) -> CalendarMonth {
        self.month
    }

    #[cfg(test)]
    pub(crate) fn first_weekday_offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    /// Returns the `(row, column)` at which the given day of the month is
    /// laid out
    pub(crate) fn position_of(&self, day: u8) -> Option<(usize, usize)> {
        if day == 0 || day > self.days {
            return None;
        }
        let i = self.offset + usize::from(day) - 1;
        Some((i / DAYS_IN_WEEK, i % DAYS_IN_WEEK))
    }
}

pub(crate) fn build_grid(month: CalendarMonth) -> CalendarGrid {
    let offset = first_weekday_offset(month);
    let days = month.days();
    let row_qty = (offset + usize::from(days)).div_ceil(DAYS_IN_WEEK);
    let mut day = 0u8;
    let rows = (0..row_qty)
        .map(|r| {
            let mut cells = [DayCell::Empty; DAYS_IN_WEEK];
            for (c, cell) in cells.iter_mut().enumerate() {
                if r * DAYS_IN_WEEK + c >= offset && day < days {
                    day += 1;
                    *cell = DayCell::Day {
                        day,
                        key: DateKey::new(month, day),
                    };
                }
            }
            WeekRow(cells)
        })
        .collect();
    CalendarGrid {
        month,
        offset,
        days,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Weekday::*;

    fn all_months(years: std::ops::RangeInclusive<i32>) -> impl Iterator<Item = CalendarMonth> {
        years.flat_map(|y| {
            [
                January, February, March, April, May, June, July, August, September, October,
                November, December,
            ]
            .into_iter()
            .map(move |m| CalendarMonth::new(y, m))
        })
    }

    #[test]
    fn test_leap_years() {
        assert_eq!(days_in_month(2024, February), 29);
        assert_eq!(days_in_month(2023, February), 28);
        assert_eq!(days_in_month(2000, February), 29);
        assert_eq!(days_in_month(1900, February), 28);
        assert_eq!(days_in_month(-4, February), 29);
        assert_eq!(days_in_month(-100, February), 28);
    }

    #[test]
    #[allow(deprecated)]
    fn test_days_in_month_matches_time() {
        for month in all_months(1800..=2200) {
            assert_eq!(
                month.days(),
                time::util::days_in_year_month(month.year(), month.month()),
                "{month}"
            );
        }
    }

    #[test]
    fn test_first_weekday_matches_time() {
        for month in all_months(1583..=2400) {
            let first = time::Date::from_calendar_date(month.year(), month.month(), 1).unwrap();
            assert_eq!(
                first_weekday_offset(month),
                first.weekday().index0(),
                "{month}"
            );
        }
    }

    #[test]
    fn test_first_weekday_far_past() {
        // 1 January 1 BC (year 0) was a Saturday in the proleptic Gregorian
        // calendar; 1 March 1 BC was a Wednesday.
        assert_eq!(first_weekday_offset(CalendarMonth::new(0, January)), 6);
        assert_eq!(first_weekday_offset(CalendarMonth::new(0, March)), 3);
    }

    #[test]
    fn test_every_day_exactly_once() {
        for month in all_months(1999..=2030) {
            let grid = build_grid(month);
            let days = grid
                .rows()
                .iter()
                .flat_map(|w| w.cells().iter())
                .filter_map(DayCell::day)
                .collect::<Vec<_>>();
            let expected = (1..=month.days()).collect::<Vec<_>>();
            assert_eq!(days, expected, "{month}");
            let first_col = grid.rows()[0]
                .cells()
                .iter()
                .position(|c| c.day().is_some());
            assert_eq!(first_col, Some(grid.first_weekday_offset()), "{month}");
        }
    }

    #[test]
    fn test_row_count_is_minimal() {
        for month in all_months(1999..=2030) {
            let grid = build_grid(month);
            let rows = grid.rows();
            assert!((4..=6).contains(&rows.len()), "{month}");
            let last = rows.last().unwrap();
            assert!(last.cells().iter().any(|c| c.day().is_some()), "{month}");
            let first = rows.first().unwrap();
            assert!(first.cells().iter().any(|c| c.day().is_some()), "{month}");
        }
    }

    #[test]
    fn test_six_row_month() {
        // July 2023: 31 days starting on a Saturday
        let grid = build_grid(CalendarMonth::new(2023, July));
        assert_eq!(grid.first_weekday_offset(), 6);
        assert_eq!(grid.rows().len(), 6);
        assert_eq!(grid.rows()[0][Saturday].day(), Some(1));
        assert_eq!(grid.rows()[5][Monday].day(), Some(31));
        assert_eq!(grid.rows()[5][Tuesday], DayCell::Empty);
    }

    #[test]
    fn test_october_2023() {
        // Starts on a Sunday, so five rows suffice
        let grid = build_grid(CalendarMonth::new(2023, October));
        assert_eq!(grid.first_weekday_offset(), 0);
        assert_eq!(grid.rows().len(), 5);
        assert_eq!(grid.rows()[4][Tuesday].day(), Some(31));
    }

    #[test]
    fn test_four_row_month() {
        let grid = build_grid(CalendarMonth::new(2026, February));
        assert_eq!(grid.rows().len(), 4);
        assert_eq!(grid.rows()[0][Sunday].day(), Some(1));
        assert_eq!(grid.rows()[3][Saturday].day(), Some(28));
    }

    #[test]
    fn test_cells_carry_keys() {
        let grid = build_grid(CalendarMonth::new(2024, January));
        // 1 January 2024 was a Monday
        assert_eq!(grid.rows()[0][Sunday], DayCell::Empty);
        assert_eq!(grid.rows()[0][Sunday].key(), None);
        assert_eq!(
            grid.rows()[0][Friday].key().map(|k| k.to_string()),
            Some(String::from("2024-01-05"))
        );
    }

    #[test]
    fn test_week_days() {
        let grid = build_grid(CalendarMonth::new(2024, January));
        let first = grid.rows()[0]
            .days()
            .map(|(wd, day, _)| (wd, day))
            .collect::<Vec<_>>();
        assert_eq!(
            first,
            [
                (Monday, 1),
                (Tuesday, 2),
                (Wednesday, 3),
                (Thursday, 4),
                (Friday, 5),
                (Saturday, 6)
            ]
        );
        assert_eq!(grid.rows()[4].days().count(), 4);
    }

    #[test]
    fn test_position_of() {
        let grid = build_grid(CalendarMonth::new(2024, January));
        assert_eq!(grid.position_of(1), Some((0, 1)));
        assert_eq!(grid.position_of(6), Some((0, 6)));
        assert_eq!(grid.position_of(7), Some((1, 0)));
        assert_eq!(grid.position_of(31), Some((4, 3)));
        assert_eq!(grid.position_of(0), None);
        assert_eq!(grid.position_of(32), None);
    }
}

use crate::calendar::{build_grid, CalendarGrid, CalendarMonth, DateKey, DayCell};
use crate::grade::Classification;
use crate::store::{GradeStore, KeyValueStore};

/// A calendar grid joined with the grades stored for its days.
///
/// A `MonthView` is a snapshot: it is rebuilt from scratch (re-reading every
/// in-month day from the store) whenever the month changes or a grade is
/// written, and is never patched in place.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthView {
    grid: CalendarGrid,
    // Indexed by day of month minus one
    classes: Vec<Classification>,
}

impl MonthView {
    pub(crate) fn build<B: KeyValueStore>(month: CalendarMonth, store: &GradeStore<B>) -> MonthView {
        let grid = build_grid(month);
        let classes = grid
            .rows()
            .iter()
            .flat_map(|w| w.cells().iter())
            .filter_map(DayCell::key)
            .map(|key| Classification::from(store.get(&key)))
            .collect();
        MonthView { grid, classes }
    }

    pub(crate) fn month(&self) -> CalendarMonth {
        self.grid.month()
    }

    pub(crate) fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    pub(crate) fn classification(&self, day: u8) -> Option<Classification> {
        self.classes
            .get(usize::from(day).checked_sub(1)?)
            .copied()
    }

    pub(crate) fn key(&self, day: u8) -> Option<DateKey> {
        let (r, c) = self.grid.position_of(day)?;
        self.grid.rows().get(r)?.cells().get(c)?.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::Grade;
    use crate::store::MemoryStore;
    use time::Month::*;

    #[test]
    fn test_set_then_rebuild_then_clear() {
        let mut store = GradeStore::new(MemoryStore::new());
        let month = CalendarMonth::new(2024, January);
        let key = "2024-01-05".parse::<DateKey>().unwrap();
        store.set(&key, Grade::A).unwrap();
        let view = MonthView::build(month, &store);
        assert_eq!(view.classification(5).unwrap().name(), "grade-a");
        assert_eq!(view.classification(4), Some(Classification::Ungraded));
        store.clear(&key).unwrap();
        let view = MonthView::build(month, &store);
        assert_eq!(view.classification(5).unwrap().name(), "none");
        assert_eq!(store.get(&key), None);
    }

    #[test]
    fn test_every_day_classified() {
        let store = GradeStore::new(MemoryStore::new());
        let view = MonthView::build(CalendarMonth::new(2024, February), &store);
        assert_eq!(view.classification(0), None);
        assert_eq!(view.classification(29), Some(Classification::Ungraded));
        assert_eq!(view.classification(30), None);
    }

    #[test]
    fn test_only_own_month_is_read() {
        let mut store = GradeStore::new(MemoryStore::new());
        store
            .set(&"2024-02-05".parse().unwrap(), Grade::S)
            .unwrap();
        let view = MonthView::build(CalendarMonth::new(2024, January), &store);
        assert_eq!(view.classification(5), Some(Classification::Ungraded));
        let view = MonthView::build(CalendarMonth::new(2024, February), &store);
        assert_eq!(view.classification(5), Some(Classification::Graded(Grade::S)));
    }

    #[test]
    fn test_unknown_value_shows_ungraded() {
        let mut store = GradeStore::new(MemoryStore::new());
        store.backend_mut().set("2024-01-09", "E").unwrap();
        let view = MonthView::build(CalendarMonth::new(2024, January), &store);
        assert_eq!(view.classification(9), Some(Classification::Ungraded));
    }

    #[test]
    fn test_key() {
        let store = GradeStore::new(MemoryStore::new());
        let view = MonthView::build(CalendarMonth::new(2023, July), &store);
        assert_eq!(view.key(31).unwrap().to_string(), "2023-07-31");
        assert_eq!(view.key(32), None);
    }
}

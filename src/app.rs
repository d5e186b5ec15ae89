use crate::calendar::{CalendarMonth, DateKey, MonthCalendar};
use crate::grade::Grade;
use crate::help::Help;
use crate::picker::{Picker, PickerInput, PickerOutput, PickerState};
use crate::store::{GradeStore, KeyValueStore};
use crate::theme::{BASE_STYLE, STATUS_STYLE};
use crate::view::MonthView;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<B> {
    store: GradeStore<B>,
    today: Date,
    view: MonthView,
    // Day of the month under the cursor; always within `view`'s month
    selected: u8,
    state: AppState,
    status: Option<String>,
}

impl<B: KeyValueStore> App<B> {
    pub(crate) fn new(store: GradeStore<B>, today: Date) -> App<B> {
        let view = MonthView::build(CalendarMonth::containing(today), &store);
        App {
            store,
            today,
            view,
            selected: today.day(),
            state: AppState::Calendar,
            status: None,
        }
    }

    /// Open the calendar on the month containing `date` with the cursor on
    /// that day
    pub(crate) fn start_date(mut self, date: Date) -> App<B> {
        self.show(CalendarMonth::containing(date), date.day());
        self
    }

    /// Show a message in the status line until the next keypress
    pub(crate) fn status<S: Into<String>>(mut self, msg: S) -> App<B> {
        self.status = Some(msg.into());
        self
    }

    pub(crate) fn run<T: Backend>(mut self, terminal: &mut Terminal<T>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<T: Backend>(&mut self, terminal: &mut Terminal<T>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            self.status = None;
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.backwards(1),
                KeyCode::Char('l') | KeyCode::Right => self.forwards(1),
                KeyCode::Char('k') | KeyCode::Up => self.backwards(7),
                KeyCode::Char('j') | KeyCode::Down => self.forwards(7),
                KeyCode::Char('p') | KeyCode::PageUp => self.previous_month(),
                KeyCode::Char('n') | KeyCode::PageDown => self.next_month(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.jump_to_today();
                    true
                }
                KeyCode::Char('x' | '-') | KeyCode::Delete | KeyCode::Backspace => {
                    self.select("")
                }
                KeyCode::Char(c) if Grade::from_symbol(c.to_ascii_uppercase()).is_some() => {
                    self.select(&c.to_ascii_uppercase().to_string())
                }
                KeyCode::Enter => match self.view.key(self.selected) {
                    Some(key) => {
                        let current = self.store.get(&key);
                        self.state = AppState::Picking(PickerState::new(key, current));
                        true
                    }
                    None => false,
                },
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Picking(state) => {
                if matches!(key, KeyCode::Char('q') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('k') | KeyCode::Up => state.handle_input(PickerInput::Up),
                        KeyCode::Char('j') | KeyCode::Down => {
                            state.handle_input(PickerInput::Down)
                        }
                        KeyCode::Enter => state.handle_input(PickerInput::Enter),
                        _ => PickerOutput::Invalid,
                    };
                    match output {
                        PickerOutput::Ok => true,
                        PickerOutput::Invalid => false,
                        PickerOutput::Select(value) => {
                            let key = state.key();
                            self.state = AppState::Calendar;
                            self.apply_selection(key, value);
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn select(&mut self, value: &str) -> bool {
        match self.view.key(self.selected) {
            Some(key) => {
                self.apply_selection(key, value);
                true
            }
            None => false,
        }
    }

    // The store is written first; the view is then rebuilt from what the
    // store holds, whether or not the write succeeded.
    fn apply_selection(&mut self, key: DateKey, value: &str) {
        match self.store.apply_selection(&key, value) {
            Ok(Some(grade)) => log::info!("Graded {key} as {grade}"),
            Ok(None) => log::info!("Cleared grade for {key}"),
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Could not save grade for {key}: {e:#}");
                self.status = Some(format!("Could not save grade for {key}: {e:#}"));
            }
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.view = MonthView::build(self.view.month(), &self.store);
    }

    fn show(&mut self, month: CalendarMonth, day: u8) {
        log::debug!("Showing {month}");
        self.view = MonthView::build(month, &self.store);
        self.selected = day;
    }

    fn forwards(&mut self, days: u8) -> bool {
        let month = self.view.month();
        let target = self.selected.saturating_add(days);
        if target <= month.days() {
            self.selected = target;
            true
        } else if let Ok(next) = month.next() {
            self.show(next, target - month.days());
            true
        } else {
            false
        }
    }

    fn backwards(&mut self, days: u8) -> bool {
        if let Some(target) = self.selected.checked_sub(days).filter(|&d| d > 0) {
            self.selected = target;
            true
        } else if let Ok(prev) = self.view.month().previous() {
            self.show(prev, prev.days() - (days - self.selected));
            true
        } else {
            false
        }
    }

    fn next_month(&mut self) -> bool {
        match self.view.month().next() {
            Ok(next) => {
                self.show(next, self.selected.min(next.days()));
                true
            }
            Err(_) => false,
        }
    }

    fn previous_month(&mut self) -> bool {
        match self.view.month().previous() {
            Ok(prev) => {
                self.show(prev, self.selected.min(prev.days()));
                true
            }
            Err(_) => false,
        }
    }

    fn jump_to_today(&mut self) {
        self.show(CalendarMonth::containing(self.today), self.today.day());
    }
}

impl<B: KeyValueStore> Widget for &mut App<B> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [cal_area] = Layout::vertical([MonthCalendar::height(&self.view)])
            .flex(Flex::Center)
            .areas(cal_area);
        MonthCalendar::new(&self.view)
            .selected(self.selected)
            .today(DateKey::from_date(self.today))
            .render(cal_area, buf);
        if let Some(msg) = &self.status {
            Line::styled(msg.as_str(), STATUS_STYLE).render(status_area, buf);
        }
        match self.state {
            AppState::Helping => Help(BASE_STYLE).render(area, buf),
            AppState::Picking(ref mut state) => Picker.render(area, buf, state),
            AppState::Calendar | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Picking(PickerState),
    Quitting,
}

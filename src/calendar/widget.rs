use super::{DateKey, WeekdayExt};
use crate::grade::{Classification, Grade};
use crate::theme::{classification_style, TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE};
use crate::view::MonthView;
use ratatui::{prelude::*, widgets::*};
use time::Weekday;

static HEADER: &str = " Su     Mo     Tu     We     Th     Fr     Sa   ";

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

/// Number of columns actually drawn for each day: the day number (possibly
/// bracketed) followed by the grade symbol
const CELL_WIDTH: u16 = 6;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 6 + CELL_WIDTH;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

const ACS_HLINE: char = '─';

/// Draws one month: a `"<Month> <Year>"` title, the weekday header, and each
/// day colored by its grade
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthCalendar<'a> {
    view: &'a MonthView,
    selected: Option<u8>,
    today: Option<DateKey>,
}

impl<'a> MonthCalendar<'a> {
    pub(crate) fn new(view: &'a MonthView) -> MonthCalendar<'a> {
        MonthCalendar {
            view,
            selected: None,
            today: None,
        }
    }

    pub(crate) fn selected(mut self, day: u8) -> Self {
        self.selected = Some(day);
        self
    }

    pub(crate) fn today(mut self, today: DateKey) -> Self {
        self.today = Some(today);
        self
    }

    /// Number of lines needed to draw the given view in full
    pub(crate) fn height(view: &MonthView) -> u16 {
        let weeks = u16::try_from(view.grid().rows().len()).unwrap_or(u16::MAX);
        HEADER_LINES.saturating_add(weeks.saturating_mul(WEEK_LINES))
    }
}

impl Widget for MonthCalendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let [_, area, _] = Layout::horizontal([
            Constraint::Length(left),
            Constraint::Length(MAIN_WIDTH.min(area.width)),
            Constraint::Min(0),
        ])
        .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&self.view.month().to_string());
        canvas.draw_header();
        for (i, week) in std::iter::zip(0u16.., self.view.grid().rows()) {
            for (wd, day, key) in week.days() {
                let class = self.view.classification(day).unwrap_or_default();
                let mut style = classification_style(class);
                if self.today == Some(key) {
                    style = style.patch(TODAY_STYLE);
                }
                let s = show_day(day, class, self.selected == Some(day));
                canvas.draw_day(i, wd, Span::styled(s, style));
            }
        }
    }
}

fn show_day(day: u8, class: Classification, selected: bool) -> String {
    let (open, close) = if selected { ('[', ']') } else { (' ', ' ') };
    let symbol = class.grade().map_or(' ', Grade::symbol);
    format!("{open}{day:2}{close}{symbol} ")
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.len()).unwrap_or(u16::MAX);
        self.mvprint(
            0,
            MAIN_WIDTH.saturating_sub(width) / 2,
            title,
            Some(TITLE_STYLE),
        );
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, Some(WEEKDAY_STYLE));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, wd: Weekday, s: Span<'_>) {
        let x = u16::try_from(wd.index0()).unwrap_or(u16::MAX);
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            DAY_WIDTH.saturating_mul(x),
            s.content,
            Some(s.style),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}

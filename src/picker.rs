use crate::calendar::DateKey;
use crate::grade::Grade;
use crate::theme::{
    grade_style,
    picker::{BLANK_OPTION_STYLE, CURSOR_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 20;
const OUTER_HEIGHT: u16 = 11;

/// The values offered by the picker, in order.  The blank value means "no
/// grade".
const OPTIONS: [&str; 7] = ["", "S", "A", "B", "C", "D", "F"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Picker;

impl StatefulWidget for Picker {
    type State = PickerState;

    /*
     * ....................
     * .┌── 2024-01-05 ──┐.
     * .│  (none)        │.
     * .│  S             │.
     * .│  A             │.
     * .│  ...           │.
     * .│  F             │.
     * .└────────────────┘.
     * ....................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(format!(" {} ", state.key))
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// A choice of grade for a single day
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PickerState {
    key: DateKey,
    pos: usize,
}

impl PickerState {
    /// Start with the cursor on the day's current grade, or on the blank
    /// option if there is none
    pub(crate) fn new(key: DateKey, current: Option<Grade>) -> PickerState {
        let pos = current
            .and_then(|g| OPTIONS.iter().position(|&o| o == g.to_string()))
            .unwrap_or(0);
        PickerState { key, pos }
    }

    pub(crate) fn key(&self) -> DateKey {
        self.key
    }

    /// The raw value of the currently highlighted option
    pub(crate) fn value(&self) -> &'static str {
        OPTIONS.get(self.pos).copied().unwrap_or_default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter(OPTIONS.into_iter().enumerate().map(|(i, opt)| {
            let (label, style) = match Grade::from_selection(opt) {
                Some(g) => (opt, BASE_STYLE.patch(grade_style(g))),
                None => ("(none)", BLANK_OPTION_STYLE),
            };
            if i == self.pos {
                Line::from_iter([
                    Span::styled("> ", CURSOR_STYLE),
                    Span::styled(label, style),
                ])
            } else {
                Line::from_iter([Span::styled("  ", BASE_STYLE), Span::styled(label, style)])
            }
        }))
    }

    pub(crate) fn handle_input(&mut self, input: PickerInput) -> PickerOutput {
        match input {
            PickerInput::Up if self.pos > 0 => {
                self.pos -= 1;
                PickerOutput::Ok
            }
            PickerInput::Down if self.pos + 1 < OPTIONS.len() => {
                self.pos += 1;
                PickerOutput::Ok
            }
            PickerInput::Enter => PickerOutput::Select(self.value()),
            _ => PickerOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickerInput {
    Up,
    Down,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickerOutput {
    Ok,
    Invalid,
    Select(&'static str),
}

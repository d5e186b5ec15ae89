use crate::grade::{Classification, Grade};
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const TODAY_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) const GRADE_S_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Magenta);

pub(crate) const GRADE_A_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Green);

pub(crate) const GRADE_B_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);

pub(crate) const GRADE_C_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Yellow);

pub(crate) const GRADE_D_STYLE: Style = Style::new().fg(Color::Black).bg(Color::LightRed);

pub(crate) const GRADE_F_STYLE: Style = Style::new().fg(Color::White).bg(Color::Red);

pub(crate) fn grade_style(grade: Grade) -> Style {
    match grade {
        Grade::S => GRADE_S_STYLE,
        Grade::A => GRADE_A_STYLE,
        Grade::B => GRADE_B_STYLE,
        Grade::C => GRADE_C_STYLE,
        Grade::D => GRADE_D_STYLE,
        Grade::F => GRADE_F_STYLE,
    }
}

pub(crate) fn classification_style(class: Classification) -> Style {
    class.grade().map_or_else(Style::new, grade_style)
}

pub(crate) mod picker {
    use super::*;

    pub(crate) const CURSOR_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

    pub(crate) const BLANK_OPTION_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}

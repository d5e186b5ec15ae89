use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A self-assessed rating for a day, best (`S`) to worst (`F`)
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub(crate) const ALL: [Grade; 6] = [Grade::S, Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub(crate) fn symbol(self) -> char {
        match self {
            Grade::S => 'S',
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::F => 'F',
        }
    }

    pub(crate) fn from_symbol(ch: char) -> Option<Grade> {
        Grade::ALL.into_iter().find(|g| g.symbol() == ch)
    }

    /// Interpret the value of a grade choice control.  Anything other than
    /// one of the six symbols, including the blank option, means "no grade".
    pub(crate) fn from_selection(value: &str) -> Option<Grade> {
        value.parse::<Grade>().ok()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Grade {
    type Err = ParseGradeError;

    fn from_str(s: &str) -> Result<Grade, ParseGradeError> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Grade::from_symbol(ch).ok_or(ParseGradeError),
            _ => Err(ParseGradeError),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid grade; expected one of S, A, B, C, D, F")]
pub(crate) struct ParseGradeError;

/// The mutually-exclusive visual state of a day cell
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Classification {
    #[default]
    Ungraded,
    Graded(Grade),
}

impl Classification {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Classification::Ungraded => "none",
            Classification::Graded(Grade::S) => "grade-s",
            Classification::Graded(Grade::A) => "grade-a",
            Classification::Graded(Grade::B) => "grade-b",
            Classification::Graded(Grade::C) => "grade-c",
            Classification::Graded(Grade::D) => "grade-d",
            Classification::Graded(Grade::F) => "grade-f",
        }
    }

    pub(crate) fn grade(self) -> Option<Grade> {
        match self {
            Classification::Ungraded => None,
            Classification::Graded(g) => Some(g),
        }
    }
}

impl From<Option<Grade>> for Classification {
    fn from(grade: Option<Grade>) -> Classification {
        grade.map_or(Classification::Ungraded, Classification::Graded)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

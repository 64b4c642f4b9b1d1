//! Insertion strategies and merge alignments

use crate::error::ScheduleError;
use std::fmt;
use std::str::FromStr;

/// Where a bare operation lands during insertion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InsertStrategy {
    /// Always open a fresh slot at the cursor
    New,
    /// Fresh slot for the first operation, then inline
    NewThenInline,
    /// Slot just before the cursor if it fits, else a fresh one
    Inline,
    /// Earliest slot reachable by sliding back from the cursor
    #[default]
    Earliest,
}

impl InsertStrategy {
    /// All strategies, in declaration order
    pub const ALL: [InsertStrategy; 4] = [
        InsertStrategy::New,
        InsertStrategy::NewThenInline,
        InsertStrategy::Inline,
        InsertStrategy::Earliest,
    ];

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertStrategy::New => "new",
            InsertStrategy::NewThenInline => "new_then_inline",
            InsertStrategy::Inline => "inline",
            InsertStrategy::Earliest => "earliest",
        }
    }
}

impl fmt::Display for InsertStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsertStrategy {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        InsertStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| ScheduleError::UnrecognizedStrategy(s.to_string()))
    }
}

/// How schedules of different lengths line up when merged
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Alignment {
    /// Starts line up
    #[default]
    Left,
    /// Ends line up
    Right,
    /// Whichever of the two is reached first
    First,
}

impl Alignment {
    /// All alignments, in declaration order
    pub const ALL: [Alignment; 3] = [Alignment::Left, Alignment::Right, Alignment::First];

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::First => "first",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Alignment::ALL
            .into_iter()
            .find(|align| align.as_str() == normalized)
            .ok_or_else(|| ScheduleError::UnrecognizedAlignment(s.to_string()))
    }
}

// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::time::Duration;

/// A person taking part in the raffle.
///
/// The `id` is unique within a loaded pool. Both fields are never empty.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

impl Participant {
    /// The participant synthesized for position `number` (starting at 1) when the
    /// pool is created from a plain count.
    pub fn numbered(number: usize) -> Participant {
        Participant {
            id: number.to_string(),
            name: format!("Participant {}", number),
        }
    }
}

impl Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A single cell of a spreadsheet row, as handed over by the spreadsheet reader.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// True when the cell carries no value at all (missing or empty text).
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) | Cell::Bool(_) => false,
        }
    }

    /// The textual form of the cell, following spreadsheet conventions:
    /// integral numbers are printed without a fractional part.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Cell {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Cell {
        Cell::Number(n)
    }
}

// ******** Output data structures *********

/// The outcome of a spin, fixed at the moment the spin starts.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct SpinOutcome {
    /// Index of the winner in the pool, in `[0, N)`.
    pub selected_index: usize,
    /// Rotation (radians) the wheel travels before stopping.
    pub total_rotation: f64,
}

/// What a single animation frame produced.
#[derive(PartialEq, Debug, Clone)]
pub enum Frame {
    Rotating { rotation: f64 },
    /// The last frame of a spin. Produced exactly once per spin.
    Finished { rotation: f64, selected_index: usize },
}

impl Frame {
    pub fn rotation(&self) -> f64 {
        match self {
            Frame::Rotating { rotation } => *rotation,
            Frame::Finished { rotation, .. } => *rotation,
        }
    }
}

/// A completed draw: the winner of one round and the pool size left after removing them.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Draw {
    pub round: u32,
    pub participant: Participant,
    pub remaining: usize,
}

/// How the header of the input was matched against the required columns.
///
/// The two entry points of the parser report their errors differently, and the
/// messages are shown to the user as is.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum HeaderMatching {
    /// Exact, case-sensitive field names (`ID`, `Name`, `Full name`). Used for delimited text.
    Exact,
    /// Case-insensitive, substring-tolerant names. Used for spreadsheet rows.
    Fuzzy,
}

/// Errors that prevent a participant list from being built out of some input.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ParseError {
    /// Fewer than a header and one data row.
    TooFewRows,
    /// The header lacks the ID or the name column.
    MissingRequiredColumns {
        matching: HeaderMatching,
        /// The raw header cells, as found in the input.
        found_columns: Vec<String>,
    },
    /// Fewer than 2 rows survived validation.
    TooFewParticipants { matching: HeaderMatching },
}

impl Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::TooFewRows => write!(
                f,
                "File must have a header and at least one participant row."
            ),
            ParseError::MissingRequiredColumns {
                matching: HeaderMatching::Exact,
                ..
            } => write!(f, "Header must include at least \"ID\" and \"Name\" columns."),
            ParseError::MissingRequiredColumns {
                matching: HeaderMatching::Fuzzy,
                found_columns,
            } => write!(
                f,
                "Header must include at least \"ID\" and \"Name\" columns. Found columns: {}",
                found_columns.join(", ")
            ),
            ParseError::TooFewParticipants {
                matching: HeaderMatching::Exact,
            } => write!(f, "File must contain at least 2 valid participants."),
            ParseError::TooFewParticipants {
                matching: HeaderMatching::Fuzzy,
            } => write!(
                f,
                "File must contain at least 2 valid participants with both ID and Name values."
            ),
        }
    }
}

pub type ParseResult = Result<Vec<Participant>, ParseError>;

/// Errors raised by the raffle session when an operation is not allowed in its current state.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SessionError {
    /// A spin needs at least 2 participants.
    NotEnoughParticipants { count: usize },
    /// The pool cannot change, and no other spin can start, while the wheel turns.
    SpinInProgress,
    /// There is no winner waiting to be removed.
    NoWinnerPending,
}

impl Error for SessionError {}

impl Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::NotEnoughParticipants { count } => write!(
                f,
                "Please enter at least 2 participants (got {})",
                count
            ),
            SessionError::SpinInProgress => write!(f, "The wheel is already spinning"),
            SessionError::NoWinnerPending => write!(f, "No winner has been selected yet"),
        }
    }
}

// ********* Configuration **********

/// The rules that shape a spin.
///
/// The wheel always makes at least `min_turns` full turns, plus a random share of
/// `extra_turns` more, plus the fraction of a turn that decides the winner.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SpinRules {
    pub min_turns: u32,
    pub extra_turns: u32,
    pub duration: Duration,
}

impl SpinRules {
    pub const DEFAULT_RULES: SpinRules = SpinRules {
        min_turns: 5,
        extra_turns: 5,
        duration: Duration::from_millis(5000),
    };
}

impl Default for SpinRules {
    fn default() -> Self {
        SpinRules::DEFAULT_RULES
    }
}

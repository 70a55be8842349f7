//! Parse mode state machine.

use std::fmt;

/// The phase of the harness run currently being parsed.
///
/// One value is threaded through every classification call of a run.
/// Transitions are driven only by line content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Before the results-begin marker. Nothing is emitted.
    #[default]
    Starting,
    /// Interior of the run; lines are classified and reformatted.
    Normal,
    /// Between two stack-trace delimiters; nested-process lines are
    /// echoed as indented frames.
    InStackTrace,
    /// After the results-end marker. Absorbing.
    Done,
}

impl Mode {
    /// Check if this is a terminal mode (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Mode::Done)
    }

    /// Check if lines classified in this mode may produce output.
    pub fn can_emit(&self) -> bool {
        matches!(self, Mode::Normal | Mode::InStackTrace)
    }

    /// Mode after crossing a stack-trace delimiter line.
    pub fn toggle_stack_trace(self) -> Mode {
        match self {
            Mode::InStackTrace => Mode::Normal,
            Mode::Normal => Mode::InStackTrace,
            other => other,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Starting => "starting",
            Mode::Normal => "normal",
            Mode::InStackTrace => "stack",
            Mode::Done => "done",
        };
        f.write_str(name)
    }
}

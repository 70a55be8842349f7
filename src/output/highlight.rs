//! Terminal rendering of formatted lines.

use crossterm::style::{StyledContent, Stylize};

use crate::classify::{FormattedLine, Style};

/// Renders [`FormattedLine`]s for the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlighter {
    color: bool,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Highlighter {
    /// Create a highlighter, with or without terminal colors.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Highlighter that emits plain text.
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Render one line, without a trailing newline.
    pub fn render(&self, line: &FormattedLine) -> String {
        if !self.color || line.style == Style::Neutral {
            return line.text();
        }

        let indent = " ".repeat(line.indent);
        match &line.label {
            Some(label) => format!(
                "{}{}{}{}",
                indent,
                paint(label, line.style),
                line.separator(),
                line.body
            ),
            None => format!("{}{}", indent, paint(&line.body, line.style)),
        }
    }
}

fn paint(text: &str, style: Style) -> StyledContent<&str> {
    match style {
        Style::Neutral => text.stylize(),
        Style::Pass => text.cyan(),
        Style::Ok => text.green(),
        Style::Fail => text.red(),
        Style::Info => text.blue(),
        Style::Warning => text.red().bold(),
        Style::StackFrame => text.dark_grey(),
    }
}

//! Formatted output lines.

use std::fmt;

/// Semantic style of a formatted line.
///
/// The terminal layer decides how each style looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Plain passthrough text.
    #[default]
    Neutral,
    /// A passing assertion.
    Pass,
    /// A test file that finished cleanly.
    Ok,
    /// An unexpected failure or a stack-trace header.
    Fail,
    /// Any other `TEST-*` status.
    Info,
    /// A console warning.
    Warning,
    /// A frame inside a stack trace.
    StackFrame,
}

/// One line of classifier output.
///
/// Rendered as `indent + label + " " + body`; the separator only appears
/// when both label and body are non-empty. The style applies to the label
/// when there is one, otherwise to the body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedLine {
    /// Leading spaces.
    pub indent: usize,
    /// Styled leading token, such as `TEST-PASS` or `Stack Trace`.
    pub label: Option<String>,
    /// Unstyled remainder.
    pub body: String,
    /// Semantic style.
    pub style: Style,
}

impl FormattedLine {
    /// An unlabelled neutral line.
    pub fn plain(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// A labelled line with the given style.
    pub fn labelled(label: impl Into<String>, body: impl Into<String>, style: Style) -> Self {
        Self {
            indent: 0,
            label: Some(label.into()),
            body: body.into(),
            style,
        }
    }

    /// Set the indentation width.
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = width;
        self
    }

    /// Separator between label and body.
    pub fn separator(&self) -> &'static str {
        match &self.label {
            Some(label) if !label.is_empty() && !self.body.is_empty() => " ",
            _ => "",
        }
    }

    /// Plain-text rendering without any terminal styling.
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FormattedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:width$}", "", width = self.indent)?;
        if let Some(label) = &self.label {
            f.write_str(label)?;
        }
        f.write_str(self.separator())?;
        f.write_str(&self.body)
    }
}

//! Noise suppression for known-uninteresting harness lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FilterError, Result};

/// A single denylist entry.
enum Matcher {
    /// Plain substring, matched literally.
    Contains(&'static str),
    /// Regular expression, matched anywhere unless it anchors itself.
    Pattern(Regex),
}

impl Matcher {
    fn is_match(&self, line: &str) -> bool {
        match self {
            Matcher::Contains(needle) => line.contains(needle),
            Matcher::Pattern(re) => re.is_match(line),
        }
    }
}

fn pattern(source: &str) -> Matcher {
    // Built-in patterns are fixed; a typo here is caught by the unit tests.
    Matcher::Pattern(Regex::new(source).unwrap())
}

/// Built-in noise entries, in the order they are tested.
static BUILTIN: Lazy<Vec<Matcher>> = Lazy::new(|| {
    use Matcher::Contains;

    vec![
        pattern(r"^\s*$"),
        pattern(r#"^"\}\]"#),
        Contains("Unknown property"),
        Contains("Error in parsing value"),
        Contains("Unknown pseudo-class"),
        Contains("unreachable code"),
        Contains("runtests.py"),
        Contains("MochitestServer"),
        Contains("Main app process"),
        Contains("launched child process"),
        Contains("zombiecheck"),
        Contains("Stopping web server"),
        Contains("Stopping web socket server"),
        Contains("Stopping ssltunnel"),
        Contains("leakcheck"),
        Contains("Buffered messages"),
        Contains("Browser Chrome Test Summary"),
        Contains("Buffered messages finished"),
        Contains("CFMessagePort"),
        Contains("Completed ShutdownLeaks"),
        Contains("SUITE-END"),
        Contains("failed to bind"),
        Contains("Use of nsIFile in content process is deprecated."),
        Contains("could not create service for entry 'OSX Speech Synth'"),
        Contains("The character encoding of the HTML document was not declared."),
        Contains("This site appears to use a scroll-linked positioning effect"),
        Contains("Entering test bound"),
        Contains("Shutting down..."),
        Contains("Leaving test bound"),
        Contains("MEMORY STAT"),
        Contains("TELEMETRY PING"),
        Contains("started process"),
        Contains("bootstrap_defs.h"),
        Contains("Listening on port"),
        Contains("Removing tab."),
        Contains("Tab removed and finished closing"),
        Contains("TabClose"),
        Contains("checking window state"),
        Contains("Opening the toolbox"),
        Contains("Toolbox opened and focused"),
        Contains("Tab added and finished loading"),
    ]
});

/// Ordered set of noise matchers: the built-ins plus any user extras.
///
/// A line is noise if any matcher hits. Matching is case-sensitive.
#[derive(Default)]
pub struct Denylist {
    extra: Vec<Regex>,
}

impl Denylist {
    /// Denylist with only the built-in entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Denylist with additional user patterns appended after the built-ins.
    ///
    /// Fails on the first pattern that is not a valid regular expression.
    pub fn with_extra<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|source| FilterError::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { extra })
    }

    /// Number of user patterns on top of the built-ins.
    pub fn extra_len(&self) -> usize {
        self.extra.len()
    }

    /// Check whether a line should be dropped before any other logic.
    pub fn is_noise(&self, line: &str) -> bool {
        BUILTIN.iter().any(|m| m.is_match(line)) || self.extra.iter().any(|re| re.is_match(line))
    }
}

impl std::fmt::Debug for Denylist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Denylist")
            .field("builtin", &BUILTIN.len())
            .field("extra", &self.extra)
            .finish()
    }
}

//! Harness command building and representation.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A harness invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessCommand {
    /// Program to run.
    pub program: PathBuf,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Directory the program runs in.
    pub working_dir: PathBuf,
    /// Extra environment variables.
    pub env: HashMap<String, String>,
}

impl HarnessCommand {
    /// Create a command running `program` in the current directory.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: PathBuf::from("."),
            env: HashMap::new(),
        }
    }

    /// `./mach mochitest <tests>` inside a Firefox checkout.
    ///
    /// The program path is relative to the working directory, not to the
    /// caller's.
    pub fn mochitest<I, S>(checkout: &Path, tests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("./mach")
            .working_dir(checkout)
            .arg("mochitest")
            .args(tests)
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for HarnessCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

//! Command-line interface for mochitest-filter.
//!
//! Uses lexopt for minimal binary size overhead (~34KB).

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Firefox checkout containing `mach`.
    pub harness_dir: Option<PathBuf>,
    /// Captured log to replay instead of running the harness (`-` for stdin).
    pub input: Option<PathBuf>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Extra denylist patterns.
    pub deny: Vec<String>,
    /// Disable colored output.
    pub no_color: bool,
    /// Test paths passed to the harness.
    pub tests: Vec<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

impl Args {
    /// Whether the input should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_deref() == Some(std::path::Path::new("-"))
    }
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('C') | Long("harness-dir") => {
                result.harness_dir = Some(parser.value()?.parse()?);
            }
            Short('i') | Long("input") => {
                result.input = Some(parser.value()?.parse()?);
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('l') | Long("log-level") => {
                let value: String = parser.value()?.parse()?;
                if !is_log_level(&value) {
                    return Err(ArgsError::InvalidValue("log-level", value));
                }
                result.log_level = Some(value);
            }
            Long("deny") => {
                let value: String = parser.value()?.parse()?;
                if value.is_empty() {
                    return Err(ArgsError::InvalidValue("deny", value));
                }
                result.deny.push(value);
            }
            Long("no-color") => {
                result.no_color = true;
            }
            Value(val) => {
                let test = val
                    .into_string()
                    .map_err(|v| ArgsError::UnexpectedArgument(v.to_string_lossy().into()))?;
                result.tests.push(test);
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

fn is_log_level(value: &str) -> bool {
    matches!(value, "error" | "warn" | "info" | "debug" | "trace" | "off")
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"mochitest-filter {version}
Condense mochitest harness output into a readable terminal summary

USAGE:
    mochitest-filter [OPTIONS] [TEST_PATH]...

ARGS:
    <TEST_PATH>...          Tests passed to `mach mochitest`
                            [default: devtools/client/debugger/new]

OPTIONS:
    -C, --harness-dir <DIR> Firefox checkout containing mach [default: firefox]
    -i, --input <FILE>      Replay a captured log instead of running (- for stdin)
    -c, --config <FILE>     Path to configuration file (JSON)
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
        --deny <REGEX>      Extra pattern for lines to hide (repeatable)
        --no-color          Disable colored output
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    MOCHITEST_FILTER_HARNESS_DIR  Firefox checkout (overrides config)
    MOCHITEST_FILTER_LOG_LEVEL    Log level (overrides config)
    RUST_LOG                      Alternative log level setting
    NO_COLOR                      Disable colored output

EXAMPLES:
    # Run the debugger mochitests in ./firefox
    mochitest-filter

    # Run one test from another checkout
    mochitest-filter -C ~/src/gecko devtools/client/debugger/new/test/browser_dbg-editor.js

    # Condense a captured log
    mach mochitest devtools 2>&1 | mochitest-filter -i -
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("mochitest-filter {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Positional argument that is not valid UTF-8.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}

//! mochitest-filter binary entry point.

use std::io::Write;
use std::process::ExitCode;

use crossterm::style::Stylize;
use mochitest_filter::cli::{self, Args};
use mochitest_filter::config::Config;
use mochitest_filter::execution::{self, HarnessProcess};
use mochitest_filter::{logging, FilterError, LineClassifier, StreamDriver};
use tracing::{debug, info, warn};

const SETUP_DOCS: &str =
    "https://github.com/devtools-html/debugger.html/blob/master/docs/mochitests.md";

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(code) => code,
        Err(FilterError::HarnessMissing(dir)) => {
            eprintln!(
                "{} looks like Firefox does not exist in {}.\nVisit our setup instructions: {}",
                "Oops".red(),
                dir.display(),
                SETUP_DOCS
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> mochitest_filter::Result<ExitCode> {
    let config = Config::load(&args)?;
    if let Err(e) = logging::init_with_filter(config.log_filter()) {
        debug!(error = %e, "tracing subscriber already set");
    }
    debug!(?config, "configuration loaded");

    let classifier = LineClassifier::with_denylist(config.denylist()?);
    let driver = StreamDriver::new(classifier, config.highlighter(), std::io::stdout());

    if let Some(ref input) = args.input {
        let (_, stats) = if args.reads_stdin() {
            execution::replay(tokio::io::stdin(), driver).await?
        } else {
            let file = tokio::fs::File::open(input).await?;
            execution::replay(file, driver).await?
        };
        info!(lines_in = stats.lines_in, lines_out = stats.lines_out, "replay finished");
        return Ok(ExitCode::SUCCESS);
    }

    execution::check_harness(&config.harness.dir)?;
    let command = config.harness_command(&args.tests);
    println!("{}", command.to_string().blue());
    std::io::stdout().flush()?;

    let process = execution::spawn(&command)?;
    stream_harness(process, driver).await
}

async fn stream_harness<W: Write>(
    mut process: HarnessProcess,
    mut driver: StreamDriver<W>,
) -> mochitest_filter::Result<ExitCode> {
    let mut interrupted = false;

    loop {
        tokio::select! {
            chunk = process.next_chunk() => match chunk {
                Some(chunk) => driver.push_chunk(&chunk.raw)?,
                None => break,
            },
            _ = tokio::signal::ctrl_c(), if !interrupted => {
                warn!("interrupted, stopping harness");
                interrupted = true;
                process.cancel();
            }
        }
    }

    let (_, stats) = driver.finish()?;
    let result = process.wait().await?;
    info!(
        lines_in = stats.lines_in,
        lines_out = stats.lines_out,
        suppressed = stats.suppressed(),
        exit_code = ?result.exit_code,
        elapsed_ms = result.duration.as_millis() as u64,
        "harness run finished"
    );

    if result.success() {
        Ok(ExitCode::SUCCESS)
    } else {
        let code = result.exit_code.and_then(|c| u8::try_from(c).ok()).unwrap_or(1);
        Ok(ExitCode::from(code.max(1)))
    }
}

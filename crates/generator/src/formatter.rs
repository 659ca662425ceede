//! Optional `gofmt` post-pass
//!
//! Formatting is best-effort: [`Formatter::format`] reports what happened and
//! callers decide whether to fall back to the unformatted text.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Deadline for a single formatter run
pub const DEFAULT_FORMAT_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of a formatting attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    /// Canonically formatted source
    Formatted(String),
    /// The formatter executable could not be found
    Unavailable,
    /// The formatter ran but did not produce output
    Failed(String),
}

/// Source code formatter
#[cfg_attr(test, mockall::automock)]
pub trait Formatter {
    /// Format Go source text
    fn format(&self, source: &str) -> FormatOutcome;
}

/// `gofmt` invoked as a subprocess over stdin/stdout
#[derive(Debug, Clone)]
pub struct Gofmt {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl Default for Gofmt {
    fn default() -> Self {
        Self {
            program: PathBuf::from("gofmt"),
            args: Vec::new(),
            timeout: DEFAULT_FORMAT_TIMEOUT,
        }
    }
}

impl Gofmt {
    /// `gofmt` from `PATH` with the default deadline
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific formatter executable
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Extra command-line arguments (e.g. `-s` to simplify)
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Kill the formatter if it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn run(&self, mut child: Child, source: &str) -> FormatOutcome {
        let stdin = child.stdin.take();
        let input = source.to_owned();
        let writer = thread::spawn(move || -> io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes())?;
            }
            Ok(())
        });
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = match wait_with_deadline(&mut child, self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                return FormatOutcome::Failed(format!(
                    "{} timed out after {:?}",
                    self.program.display(),
                    self.timeout
                ));
            }
            Err(e) => {
                let _ = child.kill();
                return FormatOutcome::Failed(format!(
                    "failed waiting for {}: {e}",
                    self.program.display()
                ));
            }
        };

        // A formatter that exits without draining stdin closes the pipe early
        let _ = writer.join();

        let stdout = join_reader(stdout);
        let stderr = join_reader(stderr);

        if !status.success() {
            let detail = stderr.unwrap_or_default();
            return FormatOutcome::Failed(format!("{status}: {}", detail.trim()));
        }

        match stdout {
            Ok(formatted) => FormatOutcome::Formatted(formatted),
            Err(e) => FormatOutcome::Failed(format!(
                "failed reading {} output: {e}",
                self.program.display()
            )),
        }
    }
}

impl Formatter for Gofmt {
    fn format(&self, source: &str) -> FormatOutcome {
        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        match child {
            Ok(child) => self.run(child, source),
            Err(e) if e.kind() == io::ErrorKind::NotFound => FormatOutcome::Unavailable,
            Err(e) => FormatOutcome::Failed(format!(
                "failed to start {}: {e}",
                self.program.display()
            )),
        }
    }
}

/// Format `source`, falling back to it unchanged when formatting fails
pub fn format_or_original(formatter: &dyn Formatter, source: String) -> String {
    match formatter.format(&source) {
        FormatOutcome::Formatted(formatted) => {
            info!("Code formatted successfully with gofmt.");
            formatted
        }
        FormatOutcome::Unavailable => {
            warn!("The 'gofmt' executable was not found in PATH. Skipping formatting.");
            source
        }
        FormatOutcome::Failed(diagnostic) => {
            error!("gofmt failed to format code:\n{diagnostic}");
            source
        }
    }
}

fn spawn_reader<R>(pipe: Option<R>) -> JoinHandle<io::Result<String>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_string(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join_reader(handle: JoinHandle<io::Result<String>>) -> io::Result<String> {
    handle
        .join()
        .map_err(|_| io::Error::other("pipe reader thread panicked"))?
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_or_original_uses_formatted_text() {
        let mut formatter = MockFormatter::new();
        formatter
            .expect_format()
            .withf(|source| source == "package  models\n")
            .times(1)
            .returning(|_| FormatOutcome::Formatted("package models\n".to_string()));

        let result = format_or_original(&formatter, "package  models\n".to_string());
        assert_eq!(result, "package models\n");
    }

    #[test]
    fn test_format_or_original_falls_back_when_unavailable() {
        let mut formatter = MockFormatter::new();
        formatter
            .expect_format()
            .times(1)
            .returning(|_| FormatOutcome::Unavailable);

        let result = format_or_original(&formatter, "package models".to_string());
        assert_eq!(result, "package models");
    }

    #[test]
    fn test_format_or_original_falls_back_on_failure() {
        let mut formatter = MockFormatter::new();
        formatter
            .expect_format()
            .times(1)
            .returning(|_| FormatOutcome::Failed("1:1: expected 'package'".to_string()));

        let result = format_or_original(&formatter, "garbage".to_string());
        assert_eq!(result, "garbage");
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let gofmt = Gofmt::new().with_program("protogo-no-such-formatter");
        assert_eq!(gofmt.format("package models\n"), FormatOutcome::Unavailable);
    }

    #[cfg(unix)]
    #[test]
    fn test_passthrough_program_formats() {
        let gofmt = Gofmt::new().with_program("cat");
        assert_eq!(
            gofmt.format("package models\n"),
            FormatOutcome::Formatted("package models\n".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_reports_failure() {
        let gofmt = Gofmt::new().with_program("false");
        assert!(matches!(gofmt.format("package models\n"), FormatOutcome::Failed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_slow_program_times_out() {
        let gofmt = Gofmt::new()
            .with_program("sleep")
            .with_args(["5"])
            .with_timeout(Duration::from_millis(200));
        let started = Instant::now();
        let outcome = gofmt.format("package models\n");

        assert!(started.elapsed() < Duration::from_secs(4));
        match outcome {
            FormatOutcome::Failed(message) => assert!(message.contains("timed out")),
            other => panic!("expected timeout failure, got {other:?}"),
        }
    }
}

//! Where check reports go.
//!
//! The executor is the only caller of [`OutputSink`]. Implementations must
//! be safe to share between worker threads; [`ConsoleSink`] writes each
//! check's report under a single lock so parallel runs never interleave.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::checks::{Check, CheckOutcome};
use crate::config::format_duration;
use crate::runner::RunResult;
use crate::ui::DoctorTheme;

/// Receives check lifecycle events.
pub trait OutputSink: Send + Sync {
    /// A check is about to run.
    fn check_started(&self, check: &Check);

    /// A check produced its outcome.
    fn check_finished(&self, outcome: &CheckOutcome);

    /// An informational line outside any check.
    fn note(&self, _message: &str) {}

    /// The run is over.
    fn run_finished(&self, _result: &RunResult) {}
}

/// Human-readable report on a writer, stdout by default.
///
/// With inline progress the `<description>... ` prefix is written as soon as
/// a check starts and the status completes the line. That is only safe when
/// checks run one at a time.
pub struct ConsoleSink {
    theme: DoctorTheme,
    verbose: bool,
    inline: bool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    /// Report to stdout.
    pub fn stdout(theme: DoctorTheme, verbose: bool) -> Self {
        Self::new(Box::new(io::stdout()), theme, verbose)
    }

    /// Report to an arbitrary writer.
    pub fn new(out: Box<dyn Write + Send>, theme: DoctorTheme, verbose: bool) -> Self {
        Self {
            theme,
            verbose,
            inline: false,
            out: Mutex::new(out),
        }
    }

    /// Show each check's description before it runs. Sequential runs only.
    pub fn with_inline_progress(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    fn header(&self, description: &str) -> String {
        format!("\n{}", self.theme.format_description(description))
    }

    fn render(&self, outcome: &CheckOutcome) -> String {
        let mut block = if self.inline {
            String::new()
        } else {
            self.header(&outcome.description)
        };
        let _ = writeln!(block, "{}", self.theme.format_status(outcome.kind));

        if let Some(fix) = outcome.fix.as_deref().filter(|f| !f.is_empty()) {
            let _ = writeln!(block, "{}", self.theme.format_fix(fix));
        }

        if let Some(err) = &outcome.error {
            if !err.is_timeout() {
                let _ = writeln!(block, "{}", self.theme.format_error(&err.to_string()));
            }
        }

        if self.verbose {
            if let Some(detail) = outcome.detail.as_deref().filter(|d| !d.is_empty()) {
                let detail = detail.trim_end_matches('\n');
                let _ = writeln!(block, "{}", self.theme.dim.apply_to(detail));
            }
        }

        block
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}

impl OutputSink for ConsoleSink {
    fn check_started(&self, check: &Check) {
        if self.inline {
            self.write(&self.header(&check.description));
        }
    }

    fn check_finished(&self, outcome: &CheckOutcome) {
        self.write(&self.render(outcome));
    }

    fn note(&self, message: &str) {
        if self.verbose {
            self.write(&format!("{}\n", message));
        }
    }

    fn run_finished(&self, result: &RunResult) {
        let mut summary = format!(
            "{} passed, {} failed, {} errors",
            result.passed, result.failed, result.errored
        );
        if result.timed_out > 0 {
            let _ = write!(summary, " ({} timed out)", result.timed_out);
        }
        if result.not_started > 0 {
            let _ = write!(summary, ", {} not started", result.not_started);
        }

        let mut text = format!("\n{}\n", self.theme.highlight.apply_to(summary));
        if self.verbose {
            let _ = writeln!(
                text,
                "{}",
                self.theme
                    .dim
                    .apply_to(format!("Finished in {}", format_duration(result.duration)))
            );
        }
        self.write(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckKind;
    use crate::error::CheckError;
    use std::sync::Arc;
    use std::time::Duration;

    /// Writer whose contents stay readable after being boxed into the sink.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn sink(verbose: bool) -> (ConsoleSink, SharedBuf) {
        let buf = SharedBuf::default();
        let sink = ConsoleSink::new(Box::new(buf.clone()), DoctorTheme::plain(), verbose);
        (sink, buf)
    }

    fn check() -> Check {
        Check {
            description: "Git installed".into(),
            fix: "brew install git".into(),
            kind: CheckKind::CommandInPath {
                command: "git".into(),
            },
        }
    }

    #[test]
    fn passed_check_renders_status() {
        let (sink, buf) = sink(false);
        sink.check_finished(&CheckOutcome::passed(&check(), "Found git at: /usr/bin/git"));
        let out = buf.contents();
        assert!(out.contains("Git installed... passed!"));
        assert!(!out.contains("/usr/bin/git"));
    }

    #[test]
    fn inline_progress_writes_description_before_result() {
        let buf = SharedBuf::default();
        let sink = ConsoleSink::new(Box::new(buf.clone()), DoctorTheme::plain(), false)
            .with_inline_progress(true);

        sink.check_started(&check());
        assert_eq!(buf.contents(), "\nGit installed... ");

        sink.check_finished(&CheckOutcome::passed(&check(), ""));
        let out = buf.contents();
        assert!(out.contains("Git installed... passed!"));
        assert_eq!(out.matches("Git installed").count(), 1);
    }

    #[test]
    fn buffered_mode_writes_nothing_on_start() {
        let (sink, buf) = sink(false);
        sink.check_started(&check());
        assert!(buf.contents().is_empty());
        sink.check_finished(&CheckOutcome::passed(&check(), ""));
        assert!(buf.contents().contains("Git installed... passed!"));
    }

    #[test]
    fn verbose_shows_detail() {
        let (sink, buf) = sink(true);
        sink.check_finished(&CheckOutcome::passed(&check(), "Found git at: /usr/bin/git"));
        assert!(buf.contents().contains("Found git at: /usr/bin/git"));
    }

    #[test]
    fn failed_check_renders_fix() {
        let (sink, buf) = sink(false);
        sink.check_finished(&CheckOutcome::failed(&check(), "missing"));
        let out = buf.contents();
        assert!(out.contains("Git installed... failed!"));
        assert!(out.contains("brew install git"));
    }

    #[test]
    fn timeout_renders_fix_once() {
        let (sink, buf) = sink(false);
        sink.check_finished(&CheckOutcome::from_error(
            &check(),
            CheckError::Timeout {
                after: Duration::from_secs(2),
            },
        ));
        let out = buf.contents();
        assert!(out.contains("timed out!"));
        assert_eq!(out.matches("Command timed out after 2s").count(), 1);
    }

    #[test]
    fn notes_only_in_verbose() {
        let (quiet, quiet_buf) = sink(false);
        quiet.note("Found config at: /x/.doctor.yml");
        assert!(quiet_buf.contents().is_empty());

        let (loud, loud_buf) = sink(true);
        loud.note("Found config at: /x/.doctor.yml");
        assert!(loud_buf.contents().contains("Found config at"));
    }

    #[test]
    fn summary_counts_outcomes() {
        let (sink, buf) = sink(false);
        let mut result = RunResult::new();
        result.record(CheckOutcome::passed(&check(), ""));
        result.record(CheckOutcome::failed(&check(), ""));
        sink.run_finished(&result);
        assert!(buf.contents().contains("1 passed, 1 failed, 0 errors"));
    }
}

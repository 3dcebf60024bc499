//! Progress reporting while the backend generates a batch

use colored::Colorize;
use hunger_application::ports::progress::ProgressNotifier;
use hunger_domain::RequestKind;
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use std::fmt::Write;
use std::sync::Mutex;
use std::time::Duration;

/// Seconds left on a countdown that started at `start`, never below zero
pub fn remaining_secs(start: u64, elapsed: Duration) -> u64 {
    start.saturating_sub(elapsed.as_secs())
}

/// Spinner with a countdown of the expected wait
///
/// The countdown starts at the configured number of seconds, ticks once per
/// second while the request is pending, and stops at zero.
pub struct CountdownReporter {
    countdown_secs: u64,
    bar: Mutex<Option<ProgressBar>>,
}

impl CountdownReporter {
    pub fn new(countdown_secs: u64) -> Self {
        Self {
            countdown_secs,
            bar: Mutex::new(None),
        }
    }

    fn style(countdown_secs: u64) -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {countdown:.bold.yellow}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .with_key(
                "countdown",
                move |state: &ProgressState, w: &mut dyn Write| {
                    let _ = write!(w, "{}s", remaining_secs(countdown_secs, state.elapsed()));
                },
            )
    }

    fn waiting_message(kind: RequestKind) -> &'static str {
        match kind {
            RequestKind::Answers => "The tributes are thinking...",
            RequestKind::Votes => "The tributes are casting their votes...",
        }
    }
}

impl ProgressNotifier for CountdownReporter {
    fn on_request_start(&self, kind: RequestKind) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::style(self.countdown_secs));
        pb.set_message(Self::waiting_message(kind));
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut slot) = self.bar.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_request_complete(&self, _kind: RequestKind, _success: bool) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_request_start(&self, kind: RequestKind) {
        println!(
            "{} {}",
            "->".cyan(),
            CountdownReporter::waiting_message(kind).bold()
        );
    }

    fn on_request_complete(&self, kind: RequestKind, success: bool) {
        if success {
            println!("  {} {} received", "v".green(), kind);
        } else {
            println!("  {} {} request failed", "x".red(), kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_never_negative() {
        assert_eq!(remaining_secs(35, Duration::ZERO), 35);
        assert_eq!(remaining_secs(35, Duration::from_millis(1999)), 34);
        assert_eq!(remaining_secs(35, Duration::from_secs(35)), 0);
        assert_eq!(remaining_secs(35, Duration::from_secs(90)), 0);
    }

    #[test]
    fn test_reporter_clears_on_complete() {
        let reporter = CountdownReporter::new(35);
        reporter.on_request_start(RequestKind::Answers);
        assert!(reporter.bar.lock().unwrap().is_some());
        reporter.on_request_complete(RequestKind::Answers, true);
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}

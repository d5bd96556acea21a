//! Install progress line on stdout.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

pub(crate) struct InstallProgress {
    spec: String,
    bar: ProgressBar,
}

impl InstallProgress {
    pub(crate) fn start(spec: &str) -> Self {
        Self::with_target(spec, ProgressDrawTarget::stdout())
    }

    /// Non-terminal targets draw nothing; only the final line is printed.
    fn with_target(spec: &str, target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);
        let style = ProgressStyle::with_template("⏳ {msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(format!("Installing \"{}\"...", spec));
        bar.enable_steady_tick(Duration::from_millis(120));
        Self {
            spec: spec.to_string(),
            bar,
        }
    }

    pub(crate) fn finish(self) {
        self.bar.finish_and_clear();
        println!("🆗 Installed \"{}\".", self.spec);
    }

    pub(crate) fn abandon(self) {
        self.bar.abandon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_message_names_spec() {
        let progress = InstallProgress::with_target("eslint@latest", ProgressDrawTarget::hidden());
        assert_eq!(progress.bar.message(), "Installing \"eslint@latest\"...");

        let bar = progress.bar.clone();
        progress.finish();
        assert!(bar.is_finished());
    }

    #[test]
    fn test_progress_abandon_finishes_bar() {
        let progress = InstallProgress::with_target("nope@1.0.0", ProgressDrawTarget::hidden());
        let bar = progress.bar.clone();
        progress.abandon();
        assert!(bar.is_finished());
    }
}

//! Spinner shown while pixi is queried

use super::report::{status, Status};
use super::OutputMode;

/// Spinner around one slow lookup. In plain mode only the outcome is
/// printed.
pub struct Spinner {
    bar: Option<cliclack::ProgressBar>,
}

impl Spinner {
    pub fn start(mode: OutputMode, message: &str) -> Self {
        let bar = mode.is_fancy().then(|| {
            let bar = cliclack::spinner();
            bar.start(message);
            bar
        });
        Self { bar }
    }

    /// Replace the spinner with a success line
    pub fn finish(self, message: &str) {
        match self.bar {
            Some(bar) => bar.stop(message),
            None => status(OutputMode::Plain, Status::Ok, message),
        }
    }

    /// Replace the spinner with a failure line
    pub fn fail(self, message: &str) {
        match self.bar {
            Some(bar) => bar.error(message),
            None => status(OutputMode::Plain, Status::Fail, message),
        }
    }

    /// Remove the spinner without a trace
    pub fn dismiss(self) {
        if let Some(bar) = self.bar {
            bar.clear();
        }
    }
}

//! Progress reporting for one-shot solves

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use solver_application::{ProgressNotifier, SolveStage};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner per stage
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn stage_display_name(stage: SolveStage) -> &'static str {
        match stage {
            SolveStage::Transcribe => "Reading the question from the image",
            SolveStage::Generate => "Asking Gemini",
            SolveStage::Parse => "Checking the solution",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: SolveStage) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::stage_display_name(stage));
        pb.set_message("...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_stage_complete(&self, _stage: SolveStage, success: bool) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            if success {
                pb.finish_with_message(format!("{}", "done".green()));
            } else {
                pb.finish_with_message(format!("{}", "failed".red()));
            }
        }
    }
}

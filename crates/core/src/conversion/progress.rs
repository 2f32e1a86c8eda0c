//! Progress reporting for conversion runs
//!
//! With the `progress` feature the bar is drawn with `indicatif`; without it,
//! or when disabled in the config, every call is a no-op.

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "progress")]
use std::time::Duration;

/// File-level progress bar driven by the result aggregator
pub struct ConversionProgress {
    #[cfg(feature = "progress")]
    bar: ProgressBar,
}

impl ConversionProgress {
    /// Create a bar for `total_files` workbooks
    #[cfg(feature = "progress")]
    pub fn new(total_files: u64, visible: bool) -> Self {
        if !visible {
            return Self::hidden();
        }

        let bar = ProgressBar::new(total_files);
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} files {msg}",
        )
        .map(|s| s.progress_chars("█▓▒░  "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    #[cfg(not(feature = "progress"))]
    pub fn new(_total_files: u64, _visible: bool) -> Self {
        Self::hidden()
    }

    /// A bar that draws nothing
    pub fn hidden() -> Self {
        Self {
            #[cfg(feature = "progress")]
            bar: ProgressBar::hidden(),
        }
    }

    /// Advance by one finished file
    pub fn file_done(&self, name: &str) {
        #[cfg(feature = "progress")]
        {
            self.bar.set_message(name.to_string());
            self.bar.inc(1);
        }
        #[cfg(not(feature = "progress"))]
        let _ = name;
    }

    /// Print a failure line above the bar
    pub fn error(&self, msg: &str) {
        #[cfg(feature = "progress")]
        self.bar.println(format!("  ✗ Error: {}", msg));
        #[cfg(not(feature = "progress"))]
        let _ = msg;
    }

    /// Finish with a summary message
    pub fn finish(&self, msg: &str) {
        #[cfg(feature = "progress")]
        self.bar.finish_with_message(format!("✓ {}", msg));
        #[cfg(not(feature = "progress"))]
        let _ = msg;
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

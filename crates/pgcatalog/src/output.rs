//! Terminal output for command results
//!
//! Status lines go to stdout, warnings to stderr. `--quiet` silences both,
//! leaving only errors (reported by `main`) and machine-readable output.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green().bold(), msg);
        }
    }

    pub fn warning(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow().bold(), msg);
        }
    }

    pub fn note(&self, msg: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue().bold(), msg);
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.quiet {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    /// Indented `major: image` line under a catalog
    pub fn entry(&self, major: u64, image: &str) {
        if !self.quiet {
            println!("  {}: {}", style(major).dim(), image);
        }
    }

    /// Spinner shown while the registry is queried; hidden when quiet
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
            pb.set_style(template.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

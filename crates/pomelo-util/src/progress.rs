use std::io::Write;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a Cargo-style status line: `   Cataloged 12 packages`
///
/// The label is right-padded to 12 characters, styled, and followed by
/// the message in the default terminal colour. Output goes to stderr so
/// machine-readable results on stdout stay clean.
fn status_line(style: Style, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        style.apply_to(label),
    );
}

/// Status line for a completed action (bold green label).
pub fn status(label: &str, message: &str) {
    status_line(Style::new().green().bold(), label, message);
}

/// Status line for a non-fatal problem the scan worked around
/// (bold yellow label).
pub fn status_warn(label: &str, message: &str) {
    status_line(Style::new().yellow().bold(), label, message);
}

/// Create an animated spinner with the given message for indeterminate
/// progress, e.g. while walking a large image filesystem.
///
/// The spinner ticks automatically and should be finished with
/// [`ProgressBar::finish_and_clear`] before printing results.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

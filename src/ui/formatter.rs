//! Pure formatting functions for UI output.
//!
//! Colours come from the `console` crate, which drops styling when the
//! stream is not a terminal.

use crate::domain::Version;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a message that asks the user to act.
pub fn display_action(message: &str) {
    println!("{} {}", style("↑").cyan().bold(), style(message).bold());
}

/// Format and print a warning with a yellow marker.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// One line per version, marking the checked-out one.
pub fn format_version_list(versions: &[Version], current: Option<&Version>) -> Vec<String> {
    versions
        .iter()
        .map(|version| {
            let marker = if current.is_some_and(|c| c.raw() == version.raw()) {
                "*"
            } else {
                " "
            };
            match version.message() {
                Some(message) => format!("{} {}  {}", marker, version, message),
                None => format!("{} {}", marker, version),
            }
        })
        .collect()
}

/// Print a bold title followed by indented lines.
///
/// # Arguments
/// * `title` - Heading printed above the block
/// * `lines` - Body lines; `(none)` is printed when empty
pub fn display_listing(title: &str, lines: &[String]) {
    println!("{}", style(title).bold());
    if lines.is_empty() {
        println!("  (none)");
        return;
    }
    for line in lines {
        println!("  {}", line);
    }
}

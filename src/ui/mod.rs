//! User interface module - interaction (prompts), formatting and notification.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - `notifier` - Outcome reporting behind the [`Notifier`] trait
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::domain::Version;

pub mod formatter;
pub mod notifier;

pub use formatter::{
    display_action, display_error, display_listing, display_status, display_success,
    display_warning, format_version_list,
};
pub use notifier::{ConsoleNotifier, Level, Notifier, RecordingNotifier};

/// Interprets a y/N answer. Anything but "y" or "yes" (case-insensitive) is no.
pub fn parse_confirmation(input: &str) -> bool {
    let response = input.trim().to_lowercase();
    response == "y" || response == "yes"
}

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Default is "no" if user presses Enter.
///
/// # Arguments
/// * `prompt` - The prompt message to display (without the "(y/N): " suffix)
/// * `input` - Where the answer is read from
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise (including Enter, "n"/"no", or end of input)
/// * `Err` - If input error occurs
pub fn confirm_action<R: BufRead>(prompt: &str, mut input: R) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(parse_confirmation(&answer))
}

/// Asks whether to move the checkout from `current` to `latest`.
pub fn confirm_update(current: &Version, latest: &Version) -> Result<bool> {
    confirm_action(
        &format!("Update from {} to {}?", current, latest),
        io::stdin().lock(),
    )
}

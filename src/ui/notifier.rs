//! Where outcomes go once a command finishes.

use super::formatter;
use crate::boundary::BoundaryWarning;
use crate::domain::UpdateOutcome;
use std::sync::Mutex;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    /// Something the user should act on
    Action,
    Warning,
    Error,
}

impl Level {
    pub fn for_outcome(outcome: &UpdateOutcome) -> Self {
        match outcome {
            UpdateOutcome::UpToDate(_) | UpdateOutcome::MergeSucceeded(_) => Level::Info,
            UpdateOutcome::UpdateAvailable { .. } => Level::Action,
            UpdateOutcome::MergeRejected(_) | UpdateOutcome::Error { .. } => Level::Error,
        }
    }
}

/// User-facing message for an outcome
pub fn outcome_message(outcome: &UpdateOutcome) -> String {
    match outcome {
        UpdateOutcome::UpdateAvailable { .. } => {
            format!("{}. Run `config-updater update` to install it.", outcome)
        }
        _ => outcome.to_string(),
    }
}

/// Sink for status, warning and error messages
pub trait Notifier {
    fn notify(&self, level: Level, message: &str);

    fn outcome(&self, outcome: &UpdateOutcome) {
        self.notify(Level::for_outcome(outcome), &outcome_message(outcome));
    }

    fn warning(&self, warning: &BoundaryWarning) {
        self.notify(Level::Warning, &warning.to_string());
    }

    /// A titled block of lines, such as the version list
    fn listing(&self, title: &str, lines: &[String]) {
        self.notify(Level::Info, title);
        for line in lines {
            self.notify(Level::Info, line);
        }
    }

    /// A command stopped before producing an outcome
    fn aborted(&self, err: &anyhow::Error) {
        self.notify(Level::Error, &format!("Update aborted: {:#}", err));
    }
}

/// Prints to the terminal
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Info => formatter::display_success(message),
            Level::Action => formatter::display_action(message),
            Level::Warning => formatter::display_warning(message),
            Level::Error => formatter::display_error(message),
        }
    }

    fn listing(&self, title: &str, lines: &[String]) {
        formatter::display_listing(title, lines);
    }
}

/// Keeps every notification in memory, for tests
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(Level, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: Level, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}

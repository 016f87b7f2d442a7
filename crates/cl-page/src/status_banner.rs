use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// Transient message shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub severity: Severity,
    pub message: String,
    /// The view hides the banner after this long.
    pub dismiss_after: Duration,
}

impl StatusBanner {
    pub fn new(severity: Severity, message: impl Into<String>, dismiss_after: Duration) -> Self {
        Self {
            severity,
            message: message.into(),
            dismiss_after,
        }
    }
}

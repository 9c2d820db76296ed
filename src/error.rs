// File: ./src/error.rs
// Per-event error taxonomy and the issue list collected during a render pass.
use std::fmt;

/// A problem that affects a single event. None of these abort a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomecalError {
    /// The event's calendar name has no matching source configuration.
    ConfigurationMismatch { calendar: String, title: String },
    /// A team name is not present in the team directory.
    UnresolvedTeam { team: String },
    /// A timed event title without exactly one `@` separator.
    MalformedMatchup { title: String },
    /// A start value that no date format could make sense of.
    InvalidDate { raw: String },
    /// More days requested than a window may hold.
    WindowTooLarge { requested: usize, max: usize },
    /// The window runs past the last representable date and was cut short.
    WindowOutOfRange { last_day: String, requested: usize, built: usize },
}

impl fmt::Display for HomecalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomecalError::ConfigurationMismatch { calendar, title } => write!(
                f,
                "No calendar configuration named '{}' (event '{}')",
                calendar, title
            ),
            HomecalError::UnresolvedTeam { team } => {
                write!(f, "Unknown team '{}'", team)
            }
            HomecalError::MalformedMatchup { title } => {
                write!(f, "Expected 'home @ away' in event title '{}'", title)
            }
            HomecalError::InvalidDate { raw } => write!(f, "Could not parse date '{}'", raw),
            HomecalError::WindowTooLarge { requested, max } => write!(
                f,
                "A window of {} days was requested, at most {} are allowed",
                requested, max
            ),
            HomecalError::WindowOutOfRange {
                last_day,
                requested,
                built,
            } => write!(
                f,
                "Only {} of {} days fit before {}",
                built, requested, last_day
            ),
        }
    }
}

impl std::error::Error for HomecalError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Something worth reporting that happened while processing one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
    pub error: Option<HomecalError>,
}

impl Issue {
    pub fn error(error: HomecalError) -> Self {
        log::warn!("{}", error);
        Self {
            severity: Severity::Error,
            message: error.to_string(),
            error: Some(error),
        }
    }

    /// Best-effort date parse was used. Output may still be correct.
    pub fn ambiguous_date(raw: &str) -> Self {
        let message = format!("Date '{}' matched no strict format, guessed", raw);
        log::warn!("{}", message);
        Self {
            severity: Severity::Warning,
            message,
            error: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

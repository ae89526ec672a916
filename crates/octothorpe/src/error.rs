// File: src/error.rs
// Purpose: Domain errors whose Display text is shown to the user verbatim

use thiserror::Error;

use crate::events::EventId;

/// Fallback text when an error carries no message of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error.";

/// Authentication and account errors raised by the session collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("An account with this email already exists.")]
    DuplicateEmail,
}

/// Errors raised by the event collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("Event not found.")]
    NotFound(EventId),

    #[error("You are already registered to this event.")]
    AlreadyRegistered,

    #[error("This event is at full capacity.")]
    CapacityFull,
}

/// User-facing text for an error caught at a pipeline or wiring boundary
pub fn error_text(err: &anyhow::Error) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid email or password.");
        assert_eq!(EventError::NotFound(7).to_string(), "Event not found.");
        assert_eq!(
            EventError::AlreadyRegistered.to_string(),
            "You are already registered to this event."
        );
        assert_eq!(EventError::CapacityFull.to_string(), "This event is at full capacity.");
    }

    #[test]
    fn test_error_text_falls_back_when_blank() {
        let blank = anyhow::anyhow!("  ");
        assert_eq!(error_text(&blank), UNKNOWN_ERROR);

        let real = anyhow::anyhow!("Invalid event id.");
        assert_eq!(error_text(&real), "Invalid event id.");
    }
}

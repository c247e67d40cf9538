use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const MAX_MESSAGE_LENGTH: usize = 200;
pub const MIN_REPEAT_INTERVAL: i64 = 5;
pub const MAX_REPEAT_INTERVAL: i64 = 60 * 24;
/// Upper bound in minutes for snoozes and reminder lead times
pub const MAX_OFFSET_MINUTES: i64 = 60 * 24 * 365;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Email regex to be valid"));

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReminderValidationError {
    #[error("A reminder message is required")]
    MissingMessage,
    #[error("The reminder message can be at most 200 characters, got {0}")]
    MessageTooLong(usize),
    #[error("The repeat interval must be between 5 and 1440 minutes, got {0}")]
    InvalidRepeatInterval(i64),
    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),
}

pub fn validate_message(message: &str) -> Result<(), ReminderValidationError> {
    if message.trim().is_empty() {
        return Err(ReminderValidationError::MissingMessage);
    }
    let len = message.chars().count();
    if len > MAX_MESSAGE_LENGTH {
        return Err(ReminderValidationError::MessageTooLong(len));
    }
    Ok(())
}

pub fn validate_repeat_interval(
    repeat_interval: Option<i64>,
) -> Result<(), ReminderValidationError> {
    match repeat_interval {
        Some(minutes) if !(MIN_REPEAT_INTERVAL..=MAX_REPEAT_INTERVAL).contains(&minutes) => {
            Err(ReminderValidationError::InvalidRepeatInterval(minutes))
        }
        _ => Ok(()),
    }
}

pub fn validate_email(email: &str) -> Result<(), ReminderValidationError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ReminderValidationError::InvalidEmail(email.to_string()))
    }
}

/// Validates the user editable fields of a `Reminder`
pub fn validate_reminder_fields(
    message: &str,
    repeat_interval: Option<i64>,
    email_override: Option<&str>,
) -> Result<(), ReminderValidationError> {
    validate_message(message)?;
    validate_repeat_interval(repeat_interval)?;
    if let Some(email) = email_override {
        validate_email(email)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_requires_a_message() {
        assert_eq!(
            validate_message(""),
            Err(ReminderValidationError::MissingMessage)
        );
        assert_eq!(
            validate_message("   "),
            Err(ReminderValidationError::MissingMessage)
        );
        assert!(validate_message("Submit the quarterly report").is_ok());
    }

    #[test]
    fn it_limits_message_length() {
        let message = "a".repeat(MAX_MESSAGE_LENGTH);
        assert!(validate_message(&message).is_ok());
        let message = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        assert_eq!(
            validate_message(&message),
            Err(ReminderValidationError::MessageTooLong(201))
        );
    }

    #[test]
    fn it_bounds_repeat_interval() {
        assert!(validate_repeat_interval(None).is_ok());
        assert!(validate_repeat_interval(Some(5)).is_ok());
        assert!(validate_repeat_interval(Some(1440)).is_ok());
        assert!(validate_repeat_interval(Some(4)).is_err());
        assert!(validate_repeat_interval(Some(1441)).is_err());
        assert!(validate_repeat_interval(Some(-20)).is_err());
    }

    #[test]
    fn it_validates_emails() {
        let valid = vec!["ola@example.com", "first.last+tag@sub.example.org"];
        for email in valid {
            assert!(validate_email(email).is_ok(), "{}", email);
        }
        let invalid = vec!["", "ola", "ola@", "@example.com", "ola@example", "o la@ex.com"];
        for email in invalid {
            assert!(validate_email(email).is_err(), "{}", email);
        }
    }

    #[test]
    fn it_validates_all_fields() {
        assert!(
            validate_reminder_fields("Call Kari", Some(20), Some("kari@example.com")).is_ok()
        );
        assert_eq!(
            validate_reminder_fields("Call Kari", Some(20), Some("kari")),
            Err(ReminderValidationError::InvalidEmail("kari".into()))
        );
        assert_eq!(
            validate_reminder_fields("", Some(2), Some("kari")),
            Err(ReminderValidationError::MissingMessage)
        );
    }
}

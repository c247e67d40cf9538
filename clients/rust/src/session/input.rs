use crate::{DeliveryChannels, ReminderKind};
use taskpulse_domain::validation::{validate_reminder_fields, ReminderValidationError};

/// Fields of a reminder as entered in the create and edit forms
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderInput {
    pub kind: Option<ReminderKind>,
    pub message: String,
    pub remind_at: i64,
    /// When not set the server default or the current channels are used
    pub delivery_channels: Option<DeliveryChannels>,
    pub repeat_interval: Option<i64>,
    pub email_override: Option<String>,
}

impl ReminderInput {
    pub fn new(message: impl Into<String>, remind_at: i64) -> Self {
        Self {
            kind: None,
            message: message.into(),
            remind_at,
            delivery_channels: None,
            repeat_interval: None,
            email_override: None,
        }
    }

    /// Trims the free text fields, a blank email override counts as none
    pub(crate) fn normalized(mut self) -> Self {
        self.message = self.message.trim().to_string();
        self.email_override = self
            .email_override
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty());
        self
    }

    pub fn validate(&self) -> Result<(), ReminderValidationError> {
        validate_reminder_fields(
            &self.message,
            self.repeat_interval,
            self.email_override.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_before_any_request() {
        let input = ReminderInput::new("Prepare appraisal", 0);
        assert!(input.validate().is_ok());

        let missing = ReminderInput::new("   ", 0).normalized();
        assert_eq!(
            missing.validate(),
            Err(ReminderValidationError::MissingMessage)
        );

        let too_long = ReminderInput::new("a".repeat(201), 0);
        assert_eq!(
            too_long.validate(),
            Err(ReminderValidationError::MessageTooLong(201))
        );

        let mut repeat = ReminderInput::new("Stand up", 0);
        repeat.repeat_interval = Some(4);
        assert!(repeat.validate().is_err());
        repeat.repeat_interval = Some(1440);
        assert!(repeat.validate().is_ok());

        let mut email = ReminderInput::new("Stand up", 0);
        email.email_override = Some("kari@".into());
        assert!(email.validate().is_err());
        email.email_override = Some("  ".into());
        assert!(email.normalized().validate().is_ok());
    }
}

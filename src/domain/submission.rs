//! Contact form input and its validation rules.

use validator::{Validate, ValidationErrors};

use super::AvailabilityPreference;
use crate::error::PortfolioError;

/// Raw contact form input, as received from the public form.
///
/// Fields are trimmed before validation; an empty
/// `availability_preference` counts as absent.
#[derive(Debug, Clone, Default, Validate)]
pub struct Submission {
    /// Sender's name.
    #[validate(length(min = 1, max = 100, message = "name is required (at most 100 characters)"))]
    pub name: String,
    /// Sender's reply address.
    #[validate(
        length(min = 1, max = 254, message = "email is required"),
        email(message = "email must be a valid address")
    )]
    pub email: String,
    /// Subject line.
    #[validate(length(
        min = 1,
        max = 200,
        message = "subject is required (at most 200 characters)"
    ))]
    pub subject: String,
    /// Message body.
    #[validate(length(
        min = 1,
        max = 5000,
        message = "message is required (at most 5000 characters)"
    ))]
    pub message: String,
    /// Optional meeting window (`morning`, `afternoon`, `flexible`).
    pub availability_preference: Option<String>,
    /// Client address from the proxy headers, if any.
    pub ip_address: Option<String>,
}

/// A submission that passed every check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    /// Trimmed name.
    pub name: String,
    /// Trimmed email.
    pub email: String,
    /// Trimmed subject.
    pub subject: String,
    /// Trimmed message body.
    pub message: String,
    /// Parsed meeting window.
    pub availability_preference: Option<AvailabilityPreference>,
    /// Client address.
    pub ip_address: Option<String>,
}

impl Submission {
    /// Trims, validates and parses the submission.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Validation`] listing every failed field.
    pub fn validate_into(self) -> Result<ValidSubmission, PortfolioError> {
        let trimmed = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            availability_preference: self
                .availability_preference
                .map(|v| v.trim().to_ascii_lowercase())
                .filter(|v| !v.is_empty()),
            ip_address: self.ip_address,
        };

        trimmed
            .validate()
            .map_err(|errors| PortfolioError::Validation(describe(&errors)))?;

        let availability_preference = trimmed
            .availability_preference
            .as_deref()
            .map(str::parse::<AvailabilityPreference>)
            .transpose()?;

        Ok(ValidSubmission {
            name: trimmed.name,
            email: trimmed.email,
            subject: trimmed.subject,
            message: trimmed.message,
            availability_preference,
            ip_address: trimmed.ip_address,
        })
    }
}

/// Flattens validator output into one sorted, human-readable line.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
            })
        })
        .collect();
    messages.sort();
    messages.dedup();
    messages.join("; ")
}

//! Contact form validation

use crate::domain::FieldErrors;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

/// Accepted phone format: optional `+`, optional leading `1`, 9-15 digits
pub const PHONE_PATTERN: &str = r"^\+?1?\d{9,15}$";

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"));

const MAY_NOT_BE_BLANK: &str = "This field may not be blank.";

const EITHER_CHANNEL_REQUIRED: &str = "Either an email address or a phone number is required.";

/// Raw contact form body
///
/// Every field is optional at the parsing stage so that a missing field is
/// reported as a field error rather than a malformed body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactForm {
    /// Sender's full name
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub name: Option<String>,
    /// Reply email address
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: Option<String>,
    /// Reply phone number
    #[validate(
        length(max = 20, message = "Ensure this field has no more than 20 characters."),
        regex(
            path = *PHONE_REGEX,
            message = "Phone number must be entered in the format: '+999999999'"
        )
    )]
    pub phone: Option<String>,
    /// Message body
    #[validate(required(message = "This field is required."))]
    pub message: Option<String>,
}

/// A validated contact submission ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    /// Sender's full name
    pub name: String,
    /// Reply email address
    pub email: Option<String>,
    /// Reply phone number
    pub phone: Option<String>,
    /// Message body
    pub message: String,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| v.trim().is_empty())
}

impl ContactForm {
    /// Trim every field; blank values count as absent
    fn normalized(self) -> Self {
        Self {
            name: trimmed(self.name),
            email: trimmed(self.email),
            phone: trimmed(self.phone),
            message: trimmed(self.message),
        }
    }

    /// Validate the form, returning every field error at once
    ///
    /// A required field that is sent but blank is reported as blank rather
    /// than missing.
    pub fn into_new_contact(self) -> Result<NewContact, FieldErrors> {
        let blank_fields: Vec<&'static str> = [("name", &self.name), ("message", &self.message)]
            .into_iter()
            .filter(|(_, value)| is_blank(value))
            .map(|(field, _)| field)
            .collect();
        let form = self.normalized();

        let mut errors = match form.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => collect_field_errors(&e),
        };
        for field in blank_fields {
            errors.replace(field, MAY_NOT_BE_BLANK);
        }
        if form.email.is_none() && form.phone.is_none() {
            errors.add("non_field_errors", EITHER_CHANNEL_REQUIRED);
        }

        match (form.name, form.message) {
            (Some(name), Some(message)) if errors.is_empty() => Ok(NewContact {
                name,
                email: form.email,
                phone: form.phone,
                message,
            }),
            _ => Err(errors),
        }
    }
}

fn collect_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut collected = FieldErrors::default();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            collected.add(field.to_string(), message);
        }
    }
    collected
}

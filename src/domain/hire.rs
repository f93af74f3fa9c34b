//! Hire request validation

use crate::domain::MAX_EMAIL_LENGTH;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static HIRE_EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$")
        .expect("hire email pattern is a valid regex")
});

/// Service a client can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// Graphic design work
    Graphic,
    /// Web development work
    Web,
    /// Both of the above
    Both,
}

impl ServiceKind {
    /// Stored representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Graphic => "graphic",
            ServiceKind::Web => "web",
            ServiceKind::Both => "both",
        }
    }

    /// Title-cased short name, as used in notification subjects
    pub fn title(&self) -> &'static str {
        match self {
            ServiceKind::Graphic => "Graphic",
            ServiceKind::Web => "Web",
            ServiceKind::Both => "Both",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceKind::Graphic => "Graphic Design",
            ServiceKind::Web => "Web Development",
            ServiceKind::Both => "Both Services",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = HireValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graphic" => Ok(ServiceKind::Graphic),
            "web" => Ok(ServiceKind::Web),
            "both" => Ok(ServiceKind::Both),
            _ => Err(HireValidationError::InvalidService),
        }
    }
}

/// First rule a hire request failed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HireValidationError {
    /// Email or service is blank
    #[error("Email and service selection are required")]
    MissingFields,
    /// Email does not look like an address
    #[error("Invalid email format")]
    InvalidEmail,
    /// Email longer than the RFC 5321 limit
    #[error("Email must not exceed 254 characters")]
    EmailTooLong,
    /// Service is not one of the offered kinds
    #[error("Invalid service selection")]
    InvalidService,
}

/// A validated hire request ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHireRequest {
    /// Client email, trimmed
    pub email: String,
    /// Requested service
    pub service: ServiceKind,
}

/// Validate a hire request, stopping at the first failing rule
///
/// `email` is trimmed; `service` is trimmed and matched case-insensitively.
pub fn validate_hire_request(
    email: &str,
    service: &str,
) -> Result<NewHireRequest, HireValidationError> {
    let email = email.trim();
    let service = service.trim().to_lowercase();

    if email.is_empty() || service.is_empty() {
        return Err(HireValidationError::MissingFields);
    }
    if !HIRE_EMAIL_REGEX.is_match(email) {
        return Err(HireValidationError::InvalidEmail);
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(HireValidationError::EmailTooLong);
    }
    let service = service.parse::<ServiceKind>()?;

    Ok(NewHireRequest {
        email: email.to_string(),
        service,
    })
}

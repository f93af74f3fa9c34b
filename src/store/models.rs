//! Stored record types

use crate::domain::ServiceKind;
use crate::store::StoreError;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::Serialize;
use sqlx::FromRow;
use std::fmt;

/// Current time at the precision the store keeps
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 text so that lexical order matches time order
pub(crate) fn to_db_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// A stored contact form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ContactSubmission {
    /// Row identifier
    pub id: i64,
    /// Sender's full name
    pub name: String,
    /// Reply email address
    pub email: Option<String>,
    /// Reply phone number
    pub phone: Option<String>,
    /// Message body
    pub message: String,
    /// When the submission was stored
    pub created_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// The way to reach the sender: email when given, phone otherwise
    pub fn email_or_phone(&self) -> &str {
        self.email
            .as_deref()
            .or(self.phone.as_deref())
            .unwrap_or_default()
    }
}

impl fmt::Display for ContactSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.created_at.format("%Y-%m-%d"))
    }
}

/// A stored hire request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HireRequest {
    /// Row identifier
    pub id: i64,
    /// Client email
    pub email: String,
    /// Requested service
    pub service_needed: ServiceKind,
    /// When the request was stored
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for HireRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({})",
            self.email,
            self.service_needed.display_name(),
            self.created_at.format("%Y-%m-%d")
        )
    }
}

/// Narrows a hire request listing; empty fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HireRequestFilter {
    /// Only requests for this service
    pub service: Option<ServiceKind>,
    /// Case-insensitive substring of the client email
    pub email_contains: Option<String>,
}

/// Raw `hire_requests` row; the service is stored as text
#[derive(Debug, FromRow)]
pub(crate) struct HireRequestRow {
    pub id: i64,
    pub email: String,
    pub service_needed: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HireRequestRow {
    pub(crate) fn into_hire_request(self) -> Result<HireRequest, StoreError> {
        let service_needed = self.service_needed.parse::<ServiceKind>().map_err(|_| {
            StoreError::CorruptRow(format!(
                "hire request {} has unknown service '{}'",
                self.id, self.service_needed
            ))
        })?;
        Ok(HireRequest {
            id: self.id,
            email: self.email,
            service_needed,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submission(email: Option<&str>, phone: Option<&str>) -> ContactSubmission {
        ContactSubmission {
            id: 1,
            name: "Ada".to_string(),
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            message: "Hi".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_email_or_phone_prefers_email() {
        assert_eq!(
            submission(Some("ada@example.com"), Some("+15551234567")).email_or_phone(),
            "ada@example.com"
        );
        assert_eq!(
            submission(None, Some("+15551234567")).email_or_phone(),
            "+15551234567"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(submission(None, None).to_string(), "Ada - 2024-03-09");
    }

    #[test]
    fn test_hire_request_display() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 10, 30, 0).unwrap();
        let request = HireRequest {
            id: 3,
            email: "client@example.com".to_string(),
            service_needed: ServiceKind::Both,
            created_at: at,
            updated_at: at,
        };
        assert_eq!(
            request.to_string(),
            "client@example.com - Both Services (2024-03-09)"
        );
    }

    #[test]
    fn test_db_timestamp_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 3, 9, 10, 30, 0).unwrap();
        assert_eq!(to_db_timestamp(&whole), "2024-03-09T10:30:00.000000Z");
    }

    #[test]
    fn test_row_with_unknown_service_is_rejected() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 10, 30, 0).unwrap();
        let row = HireRequestRow {
            id: 7,
            email: "client@example.com".to_string(),
            service_needed: "painting".to_string(),
            created_at: at,
            updated_at: at,
        };
        assert!(matches!(
            row.into_hire_request(),
            Err(StoreError::CorruptRow(_))
        ));
    }
}

//! Notification content for each kind of submission

use crate::domain::ServiceKind;
use crate::store::ContactSubmission;

/// Subject, body and reply address of a notification to the site owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
    /// Address the owner's reply should go to
    pub reply_to: Option<String>,
}

impl Notification {
    /// Notification for a newly stored contact submission
    pub fn for_contact(contact: &ContactSubmission) -> Self {
        let body = format!(
            "New Contact Form Submission:\n\
             \n\
             Name: {}\n\
             Contact: {}\n\
             Message: {}\n\
             \n\
             Received at: {}\n",
            contact.name,
            contact.email_or_phone(),
            contact.message,
            contact.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        );

        Self {
            subject: format!("New message from {}", contact.name),
            body,
            reply_to: contact.email.clone(),
        }
    }

    /// Notification for a newly stored hire request
    pub fn for_hire_request(email: &str, service: ServiceKind) -> Self {
        let body = format!(
            "New Service Request Received:\n\
             \n\
             Client Email: {}\n\
             Requested Service: {}\n\
             \n\
             You can reply directly to this email to contact the client.\n",
            email,
            service.title(),
        );

        Self {
            subject: format!("New {} Service Request", service.title()),
            body,
            reply_to: Some(email.to_string()),
        }
    }
}

//! Console mail transport
//!
//! Writes emails to the log instead of sending them. Selected when no email
//! API is configured, which keeps local development free of credentials.

use crate::notifier::{Mailer, NotifyError, OutgoingEmail};
use async_trait::async_trait;
use tracing::info;

/// Logs every email at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError> {
        info!(
            from = %email.from,
            to = %email.to,
            reply_to = ?email.reply_to,
            subject = %email.subject,
            body = %email.text_body,
            "Email (console transport)"
        );
        Ok(())
    }
}

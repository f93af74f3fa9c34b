//! Outbound email notifications
//!
//! A [`Notifier`] owns the sender and site-owner addresses and hands finished
//! emails to a [`Mailer`] transport, either inline or through a background
//! delivery queue.

pub mod console;
pub mod email_client;
pub mod messages;

pub use console::ConsoleMailer;
pub use email_client::EmailClient;
pub use messages::Notification;

use crate::config::{DeliveryMode, EmailConfig};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Capacity of the background delivery queue
const DELIVERY_QUEUE_CAPACITY: usize = 256;

/// Errors raised while sending a notification
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The HTTP client could not be constructed
    #[error("Failed to build email HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The email API could not be reached or timed out
    #[error("Failed to send HTTP request to email API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The email API answered with a non-success status
    #[error("Email API returned error status {status}: {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// The background delivery worker has stopped
    #[error("Email delivery queue is closed")]
    QueueClosed,
}

/// A fully addressed plain-text email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub text_body: String,
    /// Optional `Reply-To` address
    pub reply_to: Option<String>,
}

/// Mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one email
    async fn send(&self, email: &OutgoingEmail) -> Result<(), NotifyError>;
}

#[derive(Clone)]
enum Delivery {
    Inline(Arc<dyn Mailer>),
    Background(mpsc::Sender<OutgoingEmail>),
}

/// Sends notification emails with configured addresses
#[derive(Clone)]
pub struct Notifier {
    sender: String,
    recipient: String,
    delivery: Delivery,
}

impl Notifier {
    /// Notifier that sends each email before returning
    pub fn inline(mailer: Arc<dyn Mailer>, sender: String, recipient: String) -> Self {
        Self {
            sender,
            recipient,
            delivery: Delivery::Inline(mailer),
        }
    }

    /// Notifier that queues emails for a spawned delivery worker
    ///
    /// The worker exits once every clone of the returned notifier is dropped
    /// and the queue has drained. Must be called within a tokio runtime.
    pub fn background(
        mailer: Arc<dyn Mailer>,
        sender: String,
        recipient: String,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(DELIVERY_QUEUE_CAPACITY);
        let worker = tokio::spawn(run_delivery_worker(mailer, rx));
        let notifier = Self {
            sender,
            recipient,
            delivery: Delivery::Background(tx),
        };
        (notifier, worker)
    }

    /// Build the transport and delivery mode described by `config`
    ///
    /// Returns the delivery worker handle in background mode.
    pub fn from_config(
        config: &EmailConfig,
    ) -> Result<(Self, Option<JoinHandle<()>>), NotifyError> {
        let mailer: Arc<dyn Mailer> = match &config.api_base_url {
            Some(base_url) => Arc::new(EmailClient::new(
                base_url.clone(),
                config.api_token.clone(),
                config.timeout,
            )?),
            None => {
                info!("EMAIL_API_URL not set, notifications will be logged instead of sent");
                Arc::new(ConsoleMailer)
            }
        };

        let sender = config.sender.clone();
        let recipient = config.recipient.clone();
        Ok(match config.delivery {
            DeliveryMode::Inline => (Self::inline(mailer, sender, recipient), None),
            DeliveryMode::Background => {
                let (notifier, worker) = Self::background(mailer, sender, recipient);
                (notifier, Some(worker))
            }
        })
    }

    /// Site owner address
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Send a plain-text email from the configured sender
    pub async fn notify(
        &self,
        subject: &str,
        body: &str,
        to_address: &str,
        reply_to: Option<&str>,
    ) -> Result<(), NotifyError> {
        let email = OutgoingEmail {
            from: self.sender.clone(),
            to: to_address.to_string(),
            subject: subject.to_string(),
            text_body: body.to_string(),
            reply_to: reply_to.map(str::to_string),
        };

        match &self.delivery {
            Delivery::Inline(mailer) => mailer.send(&email).await,
            Delivery::Background(queue) => queue
                .send(email)
                .await
                .map_err(|_| NotifyError::QueueClosed),
        }
    }

    /// Send a notification to the site owner
    pub async fn notify_owner(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.notify(
            &notification.subject,
            &notification.body,
            &self.recipient,
            notification.reply_to.as_deref(),
        )
        .await
    }
}

async fn run_delivery_worker(mailer: Arc<dyn Mailer>, mut queue: mpsc::Receiver<OutgoingEmail>) {
    info!("Email delivery worker started");
    while let Some(email) = queue.recv().await {
        match mailer.send(&email).await {
            Ok(()) => info!(to = %email.to, subject = %email.subject, "Queued email sent"),
            Err(e) => error!(
                error = ?e,
                to = %email.to,
                subject = %email.subject,
                "Failed to send queued email"
            ),
        }
    }
    info!("Email delivery worker stopped");
}

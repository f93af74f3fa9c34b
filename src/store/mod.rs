//! Persistence layer
//!
//! Stores contact submissions and hire requests in a SQLite database.

pub mod db;
pub mod models;

pub use db::Store;
pub use models::{ContactSubmission, HireRequest, HireRequestFilter};

use crate::domain::ServiceKind;
use thiserror::Error;

/// Errors raised by the persistence layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database could not be opened
    #[error("Database connection error: {0}")]
    Connection(String),

    /// A migration statement failed
    #[error("Migration failed on statement: {statement}")]
    Migration {
        /// Leading part of the failing statement
        statement: String,
        /// Underlying driver error
        #[source]
        source: sqlx::Error,
    },

    /// The (email, service) pair already has a hire request
    #[error("Hire request for {service} already exists for {email}")]
    DuplicateRequest {
        /// Client email
        email: String,
        /// Requested service
        service: ServiceKind,
    },

    /// A query failed
    #[error("Failed to {operation}")]
    Query {
        /// What the query was doing
        operation: &'static str,
        /// Underlying driver error
        #[source]
        source: sqlx::Error,
    },

    /// A stored row could not be mapped back to its record type
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl StoreError {
    pub(crate) fn query(operation: &'static str, source: sqlx::Error) -> Self {
        StoreError::Query { operation, source }
    }
}

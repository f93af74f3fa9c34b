//! Submission database operations
//!
//! Handles all database interactions for contact submissions and hire requests.

use crate::domain::{NewContact, NewHireRequest, ServiceKind};
use crate::store::models::{now, to_db_timestamp, HireRequestRow};
use crate::store::{ContactSubmission, HireRequest, HireRequestFilter, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// Database connection pool for submission records
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Initialize database connection pool and run migrations
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file, or a `sqlite:` URL
    /// * `max_connections` - Upper bound on pooled connections
    pub async fn new(db_path: &str, max_connections: u32) -> Result<Self, StoreError> {
        let file_path = db_path
            .strip_prefix("sqlite://")
            .or_else(|| db_path.strip_prefix("sqlite:"))
            .unwrap_or(db_path);
        if let Some(parent) = PathBuf::from(file_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Connection(format!("Failed to create db directory: {}", e))
                })?;
            }
        }

        let connection_string = if db_path.starts_with("sqlite:") {
            db_path.to_string()
        } else {
            format!("sqlite:{}", db_path)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| StoreError::Connection(format!("Invalid database path: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to database: {}", e)))?;

        info!("Connected to SQLite database at: {}", db_path);

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), StoreError> {
        info!("Running database migrations...");

        let migration_sql = include_str!("../../migrations/001_create_submissions.sql");

        for statement in migration_statements(migration_sql) {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Migration {
                    statement: statement.chars().take(100).collect(),
                    source: e,
                })?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Store a validated contact submission
    pub async fn create_contact(
        &self,
        contact: &NewContact,
    ) -> Result<ContactSubmission, StoreError> {
        let created_at = now();
        let result = sqlx::query(
            "INSERT INTO contacts (name, email, phone, message, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(&contact.message)
        .bind(to_db_timestamp(&created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::query("insert contact", e))?;

        let id = result.last_insert_rowid();
        debug!(contact_id = id, "Created contact submission");

        Ok(ContactSubmission {
            id,
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            message: contact.message.clone(),
            created_at,
        })
    }

    /// Store a validated hire request
    ///
    /// Fails with [`StoreError::DuplicateRequest`] when the same email has
    /// already asked for the same service.
    pub async fn create_hire_request(
        &self,
        request: &NewHireRequest,
    ) -> Result<HireRequest, StoreError> {
        let created_at = now();
        let timestamp = to_db_timestamp(&created_at);
        let result = sqlx::query(
            "INSERT INTO hire_requests (email, service_needed, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&request.email)
        .bind(request.service.as_str())
        .bind(&timestamp)
        .bind(&timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = matches!(
                &e,
                sqlx::Error::Database(db_err) if db_err.is_unique_violation()
            );
            if duplicate {
                StoreError::DuplicateRequest {
                    email: request.email.clone(),
                    service: request.service,
                }
            } else {
                StoreError::query("insert hire request", e)
            }
        })?;

        let id = result.last_insert_rowid();
        debug!(hire_request_id = id, service = %request.service, "Created hire request");

        Ok(HireRequest {
            id,
            email: request.email.clone(),
            service_needed: request.service,
            created_at,
            updated_at: created_at,
        })
    }

    /// Get all contact submissions, newest first
    pub async fn list_contacts(&self) -> Result<Vec<ContactSubmission>, StoreError> {
        let contacts = sqlx::query_as::<_, ContactSubmission>(
            "SELECT id, name, email, phone, message, created_at FROM contacts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::query("fetch contacts", e))?;

        Ok(contacts)
    }

    /// Get contact submissions whose name, email or phone contains `term`,
    /// ignoring case; newest first
    pub async fn search_contacts(&self, term: &str) -> Result<Vec<ContactSubmission>, StoreError> {
        let contacts = sqlx::query_as::<_, ContactSubmission>(
            "SELECT id, name, email, phone, message, created_at FROM contacts \
             WHERE instr(lower(name), lower(?)) > 0 \
             OR instr(lower(coalesce(email, '')), lower(?)) > 0 \
             OR instr(lower(coalesce(phone, '')), lower(?)) > 0 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(term)
        .bind(term)
        .bind(term)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::query("search contacts", e))?;

        Ok(contacts)
    }

    /// Get hire requests matching `filter`, newest first
    pub async fn list_hire_requests(
        &self,
        filter: &HireRequestFilter,
    ) -> Result<Vec<HireRequest>, StoreError> {
        let service = filter.service.map(|s| s.as_str());
        let email = filter.email_contains.as_deref();
        let rows = sqlx::query_as::<_, HireRequestRow>(
            "SELECT id, email, service_needed, created_at, updated_at FROM hire_requests \
             WHERE (? IS NULL OR service_needed = ?) \
             AND (? IS NULL OR instr(lower(email), lower(?)) > 0) \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(service)
        .bind(service)
        .bind(email)
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::query("fetch hire requests", e))?;

        rows.into_iter()
            .map(HireRequestRow::into_hire_request)
            .collect()
    }

    /// Count stored hire requests for an email and service pair
    pub async fn count_hire_requests(
        &self,
        email: &str,
        service: ServiceKind,
    ) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM hire_requests WHERE email = ? AND service_needed = ?",
        )
        .bind(email)
        .bind(service.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::query("count hire requests", e))?;

        Ok(count)
    }

    /// Count stored contact submissions
    pub async fn count_contacts(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::query("count contacts", e))?;

        Ok(count)
    }
}

/// Split a migration script into executable statements
///
/// Comment-only lines and trailing `--` comments are dropped.
fn migration_statements(sql: &str) -> Vec<String> {
    let mut cleaned_sql = String::new();
    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }
        let without_comments = match trimmed.find("--") {
            Some(comment_pos) => &trimmed[..comment_pos],
            None => trimmed,
        };
        cleaned_sql.push_str(without_comments.trim());
        cleaned_sql.push(' ');
    }

    cleaned_sql
        .split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

//! Contact Form API Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
/// Input validation for contact and hire-request submissions
pub mod domain;
pub mod error;
pub mod notifier;
/// Shared application state handed to every handler
pub mod state;
pub mod store;

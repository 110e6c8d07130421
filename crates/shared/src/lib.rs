//! Shared types, errors, and configuration for the finance mart.
//!
//! This crate provides common types used across all other crates:
//! - Typed identifiers for dimension keys
//! - Amount helpers with fixed decimal precision
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;

//! Unified application error type.
//! All modules (db, core, cli, scanner) return AppError to keep the error
//! handling consistent and easy to manage.
//!
//! Expected business states (already checked in, not in gym, not checked in
//! today) are NOT errors; they are ordinary return values of the core
//! functions. Only malformed input and storage/IO failures land here.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Scan / code resolution
    // ---------------------------
    #[error("Invalid or unresolvable gym code: {0}")]
    InvalidCode(String),

    #[error("Gym code already registered: {0}")]
    DuplicateGymCode(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid status value: {0}")]
    InvalidStatus(String),

    #[error("Invalid exit type: {0}")]
    InvalidExitType(String),

    #[error("Invalid check-in source: {0}")]
    InvalidSource(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

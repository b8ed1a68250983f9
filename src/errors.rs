//! Error types for the memostash application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur during note management operations.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the memostash application.
#[derive(Error, Debug)]
pub enum MemoError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NoteNotFound { id: i64 },

    /// Reminder string is not a valid local datetime.
    #[error("Invalid reminder '{value}': expected YYYY-MM-DDTHH:MM")]
    InvalidReminder { value: String },

    /// Attachment could not be encoded into a data URL.
    #[error("Attachment error: {message}")]
    Attachment { message: String },

    /// Clipboard write failed or no clipboard utility is available.
    #[error("Clipboard error: {message}")]
    Clipboard { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// Launching or running the external editor failed.
    #[error("{message}")]
    EditorError { message: String },

    /// Generic application error with a custom message.
    #[error("{message}")]
    ApplicationError { message: String },
}

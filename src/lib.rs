//! Local-first markdown note manager library
//!
//! This library provides functionality for creating, searching, and managing
//! markdown notes with tags, reminders, inline image attachments, and a
//! per-note revision history, persisted through a simple key-value port.

mod attachment;
mod cli;
mod clipboard;
mod config;
mod errors;
mod note;
mod query;
mod render;
mod storage;
mod types;

// Re-export key components
pub use attachment::*;
pub use cli::*;
pub use clipboard::*;
pub use config::*;
pub use errors::*;
pub use note::*;
pub use query::*;
pub use render::*;
pub use storage::*;
pub use types::*;

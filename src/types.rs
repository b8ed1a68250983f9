//! Shared types for the memostash application.
//!
//! This module holds the specialized Result type and the CLI command
//! definitions used by the application shell.

use std::path::PathBuf;

use clap::Subcommand;

use crate::MemoError;

/// A specialized Result type for memostash operations.
pub type Result<T> = std::result::Result<T, MemoError>;

/// Available subcommands for the memostash application
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    Add {
        /// Note content in Markdown; omit to read from --file or the editor
        content: Option<String>,

        /// Path to a file containing the note's content
        #[clap(short, long)]
        file: Option<PathBuf>,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,

        /// Tags to associate with the note (comma-separated)
        #[clap(short = 't', long)]
        tags: Option<String>,

        /// Image file to embed as a data-URL attachment
        #[clap(short, long)]
        attach: Option<PathBuf>,

        /// Reminder as a local datetime (YYYY-MM-DDTHH:MM)
        #[clap(short, long)]
        reminder: Option<String>,
    },

    /// List notes, newest first
    List {
        /// Filter notes by a free-text query over content and tags
        #[clap(short, long)]
        query: Option<String>,

        /// Limit the number of notes returned (0 = no limit)
        #[clap(short = 'n', long, default_value_t = 0)]
        limit: usize,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,

        /// Show full content instead of a preview
        #[clap(short, long)]
        detailed: bool,
    },

    /// Search notes by content or tags
    Search {
        /// Search query text
        query: String,

        /// Limit the number of search results (0 = no limit)
        #[clap(short = 'n', long, default_value_t = 0)]
        limit: usize,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// View a note by ID
    View {
        /// ID of the note to view
        id: i64,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,

        /// Render the Markdown content as sanitized HTML
        #[clap(long)]
        html: bool,
    },

    /// Edit an existing note
    Edit {
        /// ID of the note to edit
        id: i64,

        /// New content for the note
        #[clap(short, long)]
        content: Option<String>,

        /// Path to a file containing the new note content
        #[clap(short, long)]
        file: Option<PathBuf>,

        /// Open content in editor before saving
        #[clap(short, long)]
        edit: bool,

        /// Replace the note's tags (comma-separated)
        #[clap(short = 't', long)]
        tags: Option<String>,

        /// Replace the attachment with this image file
        #[clap(short, long)]
        attach: Option<PathBuf>,

        /// Remove the attachment
        #[clap(long)]
        clear_attachment: bool,

        /// Replace the reminder (YYYY-MM-DDTHH:MM)
        #[clap(short, long)]
        reminder: Option<String>,

        /// Remove the reminder
        #[clap(long)]
        clear_reminder: bool,
    },

    /// Show the revision history of a note
    History {
        /// ID of the note
        id: i64,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: i64,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Copy a note's raw content to the clipboard
    Share {
        /// ID of the note to share
        id: i64,
    },

    /// Show or change the persisted color theme
    Theme {
        /// Set the theme instead of showing it
        #[clap(short, long, value_parser = ["light", "dark"])]
        set: Option<String>,

        /// Toggle between light and dark
        #[clap(short, long, conflicts_with = "set")]
        toggle: bool,
    },
}

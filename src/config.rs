use std::path::PathBuf;

use directories::ProjectDirs;
use which::which;

use crate::{MemoError, Result};

/// Environment variable overriding the data directory, mainly for tests.
pub const DATA_DIR_ENV: &str = "MEMOSTASH_DATA_DIR";

/// Application configuration settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where the note collection and theme flag are stored
    pub data_dir: PathBuf,

    /// Default editor command
    pub editor_command: Option<String>,
}

impl Config {
    /// Resolves the configuration for this run.
    ///
    /// The data directory is taken from the explicit flag when given, then
    /// from `MEMOSTASH_DATA_DIR`, then from the platform data directory.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => match std::env::var(DATA_DIR_ENV) {
                Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => default_data_dir()?,
            },
        };

        Ok(Self {
            data_dir,
            editor_command: None,
        })
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        // First try the configured editor
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        // Then try environment variable
        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        // Fall back to platform defaults
        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -t".to_string()
        } else {
            // Try common Linux editors
            for editor in &["nano", "vim", "vi", "emacs"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "memostash")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| MemoError::ApplicationError {
            message: "could not determine a platform data directory".to_string(),
        })
}

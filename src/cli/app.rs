//! CLI module for the memostash application
//!
//! This module handles the command-line interface for interacting with the
//! note store: it resolves drafts and patches from arguments, invokes store
//! operations, and renders the resulting views.

use std::{
    fs::{read_to_string, OpenOptions},
    io::{stdin, stdout, Write},
    path::{Path, PathBuf},
    process::Command,
};

use log::info;
use shell_words::split;
use tempfile::Builder;

use crate::{
    attachment::encode_data_url,
    clipboard::copy_to_clipboard,
    note::{parse_tags, validate_reminder},
    query::filter_notes,
    render::markdown_to_html,
    Commands, Config, KeyValueStore, MemoError, Note, NoteDraft, NotePatch, NoteStore, Result,
    Theme,
};

/// CLI application handler - processes CLI commands and interfaces with the
/// note store.
pub struct App<S: KeyValueStore> {
    /// The note store backend
    store: NoteStore<S>,

    /// Application configuration
    config: Config,
}

impl<S: KeyValueStore> App<S> {
    /// Create a new CLI application with the given store and config
    pub fn new(store: NoteStore<S>, config: Config) -> Self {
        Self { store, config }
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Add {
                content,
                file,
                edit,
                tags,
                attach,
                reminder,
            } => self.handle_add(content, file, edit, tags, attach, reminder)?,

            Commands::List {
                query,
                limit,
                json,
                detailed,
            } => self.handle_list(query.unwrap_or_default(), limit, json, detailed)?,

            Commands::Search { query, limit, json } => {
                self.handle_list(query, limit, json, false)?
            }

            Commands::View { id, json, html } => self.handle_view(id, json, html)?,

            Commands::Edit {
                id,
                content,
                file,
                edit,
                tags,
                attach,
                clear_attachment,
                reminder,
                clear_reminder,
            } => self.handle_edit(
                id,
                content,
                file,
                edit,
                tags,
                attach,
                clear_attachment,
                reminder,
                clear_reminder,
            )?,

            Commands::History { id } => self.handle_history(id)?,

            Commands::Delete { id, force } => self.handle_delete(id, force)?,

            Commands::Share { id } => self.handle_share(id)?,

            Commands::Theme { set, toggle } => self.handle_theme(set, toggle)?,
        }

        Ok(())
    }

    fn handle_add(
        &mut self,
        content: Option<String>,
        file: Option<PathBuf>,
        open_editor: bool,
        tags: Option<String>,
        attach: Option<PathBuf>,
        reminder: Option<String>,
    ) -> Result<()> {
        let content = self.resolve_content(content, file, open_editor, None)?;

        if let Some(value) = &reminder {
            validate_reminder(value)?;
        }

        // Encode before touching the store so a bad attachment cannot leave
        // a half-saved note behind.
        let attachment = attach.as_deref().map(encode_data_url).transpose()?;

        let draft = NoteDraft {
            content,
            tags: parse_tags(tags),
            attachment,
            reminder,
        };

        match self.store.add(draft)? {
            Some(id) => println!("Note created with ID: {}", id),
            None => println!("Nothing saved: note content is empty."),
        }
        Ok(())
    }

    fn handle_list(
        &mut self,
        query: String,
        limit: usize,
        json: bool,
        detailed: bool,
    ) -> Result<()> {
        let mut matches = filter_notes(self.store.notes(), &query);
        if limit > 0 && matches.len() > limit {
            matches.truncate(limit);
        }

        if matches.is_empty() {
            if query.is_empty() {
                println!("No notes yet.");
            } else {
                println!("No notes found matching query: \"{}\"", query);
            }
            return Ok(());
        }

        if json {
            self.display_notes_json(&matches, detailed)?;
        } else {
            self.display_notes_text(&matches, detailed)?;
        }

        println!(
            "\nFound {} note{}",
            matches.len(),
            if matches.len() == 1 { "" } else { "s" }
        );
        Ok(())
    }

    fn handle_view(&mut self, id: i64, json: bool, html: bool) -> Result<()> {
        let note = self
            .store
            .get(id)
            .ok_or(MemoError::NoteNotFound { id })?;

        if json {
            println!("{}", serde_json::to_string_pretty(note)?);
            return Ok(());
        }

        if html {
            println!("{}", markdown_to_html(&note.content));
            return Ok(());
        }

        let theme = self.store.load_theme();
        print_note_header(note, theme);
        println!("\n{}", note.content);

        if !note.versions.is_empty() {
            println!(
                "\n{} revision{} recorded (see `history {}`)",
                note.versions.len(),
                if note.versions.len() == 1 { "" } else { "s" },
                note.id
            );
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_edit(
        &mut self,
        id: i64,
        content: Option<String>,
        file: Option<PathBuf>,
        open_editor: bool,
        tags: Option<String>,
        attach: Option<PathBuf>,
        clear_attachment: bool,
        reminder: Option<String>,
        clear_reminder: bool,
    ) -> Result<()> {
        if attach.is_some() && clear_attachment {
            return Err(MemoError::ApplicationError {
                message: "Cannot specify both --attach and --clear-attachment".to_string(),
            });
        }
        if reminder.is_some() && clear_reminder {
            return Err(MemoError::ApplicationError {
                message: "Cannot specify both --reminder and --clear-reminder".to_string(),
            });
        }

        let existing = self
            .store
            .get(id)
            .ok_or(MemoError::NoteNotFound { id })?
            .clone();

        let new_content = if content.is_some() || file.is_some() || open_editor {
            let resolved =
                self.resolve_content(content, file, open_editor, Some(&existing.content))?;
            if resolved.trim().is_empty() {
                // a save with blank content is a no-op, same as at creation
                println!("Nothing updated: note content is empty.");
                return Ok(());
            }
            Some(resolved)
        } else {
            None
        };

        if let Some(value) = &reminder {
            validate_reminder(value)?;
        }
        let new_attachment = if clear_attachment {
            Some(None)
        } else {
            match attach.as_deref().map(encode_data_url).transpose()? {
                Some(url) => Some(Some(url)),
                None => None,
            }
        };
        let new_reminder = if clear_reminder {
            Some(None)
        } else {
            reminder.map(Some)
        };

        let patch = NotePatch {
            content: new_content,
            tags: tags.map(|t| parse_tags(Some(t))),
            attachment: new_attachment,
            reminder: new_reminder,
        };

        if patch.is_empty() {
            println!("Nothing to update: no fields given.");
            return Ok(());
        }

        if !self.store.update(id, patch)? {
            return Err(MemoError::NoteNotFound { id });
        }

        println!("Note {} updated successfully", id);
        Ok(())
    }

    fn handle_history(&mut self, id: i64) -> Result<()> {
        let note = self
            .store
            .get(id)
            .ok_or(MemoError::NoteNotFound { id })?;

        if note.versions.is_empty() {
            println!("Note {} has no recorded revisions.", id);
            return Ok(());
        }

        println!(
            "Revision history for note {} (oldest first):",
            note.id
        );
        for (i, version) in note.versions.iter().enumerate() {
            println!("\n--- revision {} ---", i + 1);
            println!("{}", version);
        }
        Ok(())
    }

    fn handle_delete(&mut self, id: i64, force: bool) -> Result<()> {
        let note = self
            .store
            .get(id)
            .ok_or(MemoError::NoteNotFound { id })?
            .clone();

        // Show note details and prompt for confirmation (unless force flag is set)
        if !force {
            println!("You are about to delete the following note:");
            println!("ID:      {}", note.id);
            if !note.tags.is_empty() {
                println!("Tags:    {}", note.tags.join(", "));
            }
            println!("Created: {}", note.created_at.format("%Y-%m-%d %H:%M:%S"));

            let preview = content_preview(&note.content, 100);
            if !preview.is_empty() {
                println!("\nContent preview:\n{}", preview);
            }

            println!("\nThis action cannot be undone!");
            print!("Are you sure you want to delete this note? [y/N]: ");
            stdout().flush()?;

            let mut input = String::new();
            stdin().read_line(&mut input)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        if !self.store.delete(id)? {
            return Err(MemoError::NoteNotFound { id });
        }

        println!("Note {} has been permanently deleted.", id);
        Ok(())
    }

    fn handle_share(&mut self, id: i64) -> Result<()> {
        let note = self
            .store
            .get(id)
            .ok_or(MemoError::NoteNotFound { id })?;

        copy_to_clipboard(&note.content)?;
        println!("Note content copied to clipboard.");
        Ok(())
    }

    fn handle_theme(&mut self, set: Option<String>, toggle: bool) -> Result<()> {
        let current = self.store.load_theme();

        let next = if let Some(value) = set {
            match value.as_str() {
                "dark" => Some(Theme::Dark),
                _ => Some(Theme::Light),
            }
        } else if toggle {
            Some(current.toggle())
        } else {
            None
        };

        match next {
            Some(theme) => {
                self.store.save_theme(theme)?;
                println!("Theme set to {}", theme.as_str());
            }
            None => println!("Current theme: {}", current.as_str()),
        }
        Ok(())
    }

    /// Resolves note content from inline text, a file, or the editor.
    fn resolve_content(
        &self,
        content: Option<String>,
        file: Option<PathBuf>,
        open_editor: bool,
        seed: Option<&str>,
    ) -> Result<String> {
        match (content, file) {
            (Some(c), _) => Ok(c),
            (_, Some(file_path)) => {
                if !file_path.exists() {
                    return Err(MemoError::ApplicationError {
                        message: format!("File not found: {}", file_path.display()),
                    });
                }
                Ok(read_to_string(file_path)?)
            }
            (None, None) => {
                if open_editor {
                    self.open_editor_for_content(seed)
                } else {
                    Ok(String::new())
                }
            }
        }
    }

    fn open_editor_for_content(&self, seed: Option<&str>) -> Result<String> {
        // Create a temporary file with .md extension
        let temp_file = Builder::new().suffix(".md").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();

        let editor_cmd = self.config.get_editor_command();

        self.write_editor_template(&temp_path, seed)?;

        info!("Opening editor to write note content. Save and exit when done...");
        self.launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        Ok(process_editor_content(content))
    }

    fn write_editor_template(&self, path: &Path, seed: Option<&str>) -> Result<()> {
        let mut file = OpenOptions::new().write(true).open(path)?;

        writeln!(file, "<!-- ")?;
        writeln!(
            file,
            "Write your note content below. Markdown is supported."
        )?;
        writeln!(
            file,
            "Lines that start with <!-- and end with --> are comments and will be ignored."
        )?;
        writeln!(file, "Save and exit the editor when you're done.")?;
        writeln!(file, "-->")?;
        writeln!(file)?;

        if let Some(existing) = seed {
            writeln!(file, "{}", existing)?;
        }

        Ok(())
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        let path_str = file_path.to_string_lossy();

        // Handle shell-like command parsing
        let args = split(editor_cmd).map_err(|e| MemoError::EditorError {
            message: format!("Failed to parse editor command: {}", e),
        })?;

        if args.is_empty() {
            return Err(MemoError::EditorError {
                message: "Empty editor command".to_string(),
            });
        }

        let program = &args[0];
        let mut command = Command::new(program);
        if args.len() > 1 {
            command.args(&args[1..]);
        }
        command.arg(path_str.as_ref());

        let status = command.status()?;
        if !status.success() {
            return Err(MemoError::EditorError {
                message: "Editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }

    /// Display notes in JSON format
    fn display_notes_json(&self, notes: &[&Note], detailed: bool) -> Result<()> {
        if detailed {
            println!("{}", serde_json::to_string_pretty(notes)?);
        } else {
            // Simplified records with a content preview instead of the body
            let simplified: Vec<serde_json::Value> = notes
                .iter()
                .map(|note| {
                    serde_json::json!({
                        "id": note.id,
                        "preview": content_preview(&note.content, 100),
                        "tags": note.tags,
                        "reminder": note.reminder,
                        "has_attachment": note.attachment.is_some(),
                        "revisions": note.versions.len(),
                        "created_at": note.created_at.to_rfc3339(),
                        "updated_at": note.updated_at.to_rfc3339(),
                    })
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&simplified)?);
        }

        Ok(())
    }

    /// Display notes in text format
    fn display_notes_text(&self, notes: &[&Note], detailed: bool) -> Result<()> {
        let theme = self.store.load_theme();

        // Use terminal width for formatting if available
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, note) in notes.iter().enumerate() {
            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }

            print_note_header(note, theme);

            if detailed {
                println!("\n{}", note.content);
            } else {
                let preview = content_preview(&note.content, 100);
                if !preview.is_empty() {
                    println!("\n{}", preview);
                }
            }
        }

        Ok(())
    }
}

/// Prints the metadata lines shared by list and view output.
fn print_note_header(note: &Note, theme: Theme) {
    let created_at = note.created_at.format("%Y-%m-%d %H:%M");
    let heading = format!("ID: {} | Created: {}", note.id, created_at);
    println!("{}", heading_style(theme).apply_to(heading));

    if !note.tags.is_empty() {
        let tags = note
            .tags
            .iter()
            .map(|tag| format!("#{}", tag))
            .collect::<Vec<_>>()
            .join(" ");
        println!("Tags: {}", console::style(tags).cyan());
    }

    if let Some(reminder) = &note.reminder {
        println!("Reminder: {}", console::style(reminder).yellow());
    }

    if note.attachment.is_some() {
        println!("{}", console::style("[image attached]").dim());
    }
}

fn heading_style(theme: Theme) -> console::Style {
    match theme {
        Theme::Dark => console::Style::new().cyan().bold(),
        Theme::Light => console::Style::new().blue().bold(),
    }
}

/// Generate a content preview for displaying brief notes
fn content_preview(content: &str, max_len: usize) -> String {
    // Get first non-empty line
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    if first_line.chars().count() <= max_len {
        first_line.to_string()
    } else {
        let truncated: String = first_line.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}

fn process_editor_content(content: String) -> String {
    // Remove HTML comment blocks (the template instructions) from content
    let mut in_comment = false;
    content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            if in_comment {
                if trimmed.ends_with("-->") {
                    in_comment = false;
                }
                return false;
            }
            if trimmed.starts_with("<!--") {
                in_comment = !trimmed.ends_with("-->");
                return false;
            }
            true
        })
        .collect::<Vec<&str>>()
        .join("\n")
        .trim_start_matches('\n')
        .to_string()
}

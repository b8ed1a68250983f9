//! Clipboard access for the share action.
//!
//! There is no clipboard API to call directly from a terminal process, so the
//! text is piped to the platform's copy utility. Failure to find or run one
//! is reported to the caller; a share must never pretend to have succeeded.

use std::{
    io::Write,
    process::{Command, Stdio},
};

use log::debug;
use which::which;

use crate::{MemoError, Result};

/// Copy utilities tried on platforms without a single canonical one.
const UNIX_CANDIDATES: &[&str] = &["wl-copy", "xclip", "xsel"];

/// Writes `text` to the system clipboard via the platform copy utility.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let (program, args) = resolve_copy_command()?;
    debug!("Copying {} bytes via {}", text.len(), program);

    let mut child = Command::new(&program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| MemoError::Clipboard {
            message: format!("failed to run {}: {}", program, e),
        })?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| MemoError::Clipboard {
                message: format!("failed to write to {}: {}", program, e),
            })?;
    }

    let status = child.wait().map_err(|e| MemoError::Clipboard {
        message: format!("failed to wait for {}: {}", program, e),
    })?;

    if !status.success() {
        return Err(MemoError::Clipboard {
            message: format!("{} exited with non-zero status", program),
        });
    }

    Ok(())
}

fn resolve_copy_command() -> Result<(String, Vec<&'static str>)> {
    if cfg!(target_os = "macos") {
        return Ok(("pbcopy".to_string(), Vec::new()));
    }
    if cfg!(windows) {
        return Ok(("clip".to_string(), Vec::new()));
    }

    for candidate in UNIX_CANDIDATES {
        if which(candidate).is_ok() {
            // xclip and xsel need to be pointed at the clipboard selection
            let args = match *candidate {
                "xclip" => vec!["-selection", "clipboard"],
                "xsel" => vec!["--clipboard", "--input"],
                _ => Vec::new(),
            };
            return Ok((candidate.to_string(), args));
        }
    }

    Err(MemoError::Clipboard {
        message: format!(
            "no clipboard utility found (looked for {})",
            UNIX_CANDIDATES.join(", ")
        ),
    })
}

//! External editor hand-off.
//!
//! The text is written to a scoped temp file, `$EDITOR` runs in the
//! foreground on the inherited terminal, and the file is read back. The temp
//! file is removed when the [`tempfile::NamedTempFile`] is dropped, on every
//! exit path.
//!
//! The caller is responsible for leaving TUI mode before calling
//! [`edit_text`] and re-entering it afterwards.

use std::fs;
use std::io::Write;
use std::process::Command;

use crate::error::EditorError;

/// Split an editor command line such as `code --wait` into argv.
pub fn parse_editor(editor: &str) -> Result<Vec<String>, EditorError> {
    let argv = shell_words::split(editor).map_err(|e| EditorError::InvalidEditor {
        value: editor.to_string(),
        reason: e.to_string(),
    })?;
    if argv.is_empty() {
        return Err(EditorError::InvalidEditor {
            value: editor.to_string(),
            reason: "empty command".to_string(),
        });
    }
    Ok(argv)
}

/// Let the operator edit `initial` in `editor` and return the result.
///
/// Blocks until the editor exits. A non-zero exit is an error and the edit
/// is discarded.
pub fn edit_text(editor: &str, initial: &str) -> Result<String, EditorError> {
    let argv = parse_editor(editor)?;

    let mut file = tempfile::Builder::new()
        .prefix("gpt-term-")
        .suffix(".md")
        .tempfile()
        .map_err(EditorError::TempFile)?;
    file.write_all(initial.as_bytes())
        .and_then(|_| file.flush())
        .map_err(EditorError::TempFile)?;

    let path = file.path().to_path_buf();
    tracing::info!(editor = %argv[0], path = %path.display(), "launching editor");

    let status = Command::new(&argv[0])
        .args(&argv[1..])
        .arg(&path)
        .status()
        .map_err(|source| EditorError::Launch {
            editor: argv[0].clone(),
            source,
        })?;

    if !status.success() {
        return Err(EditorError::Exited {
            editor: argv[0].clone(),
            status: status.to_string(),
        });
    }

    // Read by path: many editors save by replacing the file.
    let edited = fs::read_to_string(&path).map_err(EditorError::Read)?;
    drop(file);
    Ok(edited)
}

/// Normalize editor output: strip the trailing newlines editors append.
/// Returns `None` when nothing but whitespace is left.
pub fn normalize_edit(text: &str) -> Option<String> {
    let trimmed = text.trim_end_matches(['\n', '\r']);
    if trimmed.trim().is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

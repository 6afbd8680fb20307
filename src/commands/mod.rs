//! Command dispatch and handlers.

pub mod diagram;
pub mod document;
pub mod list;

use std::path::Path;

use crate::cli::Command;
use crate::intake::{ArchiveWorkspace, SourceUnit, SOURCE_EXTENSION};

/// Printed when an archive holds no file with the source extension.
pub const NO_SOURCES_WARNING: &str = "Warning: No Python files found in the archive.";

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::List { archive } => list::run(archive),
        Command::Diagram { archive, file, format, output } => {
            diagram::run(archive, file.as_deref(), *format, output.as_deref())
        }
        Command::Document { archive, file, diagram, save, out_dir } => {
            let options = document::DocumentOptions {
                archive: archive.clone(),
                file: file.clone(),
                diagram: diagram.clone(),
                save: save.then(|| out_dir.clone()),
            };
            document::run(&options)
        }
    }
}

/// Read and expand an archive, mapping failures to a message.
fn open_workspace(archive: &Path) -> Result<ArchiveWorkspace, String> {
    ArchiveWorkspace::open_path(archive, SOURCE_EXTENSION)
        .map_err(|e| format!("{}: {e}", archive.display()))
}

/// Load the requested file, or the default selection when none was given.
///
/// Returns `Ok(None)` for an archive without source files, even when a file
/// was named.
fn select_source(
    workspace: &ArchiveWorkspace,
    file: Option<&str>,
) -> Result<Option<SourceUnit>, String> {
    if workspace.is_empty() {
        return Ok(None);
    }
    let Some(selected) = file.or_else(|| workspace.default_selection()) else {
        return Ok(None);
    };
    workspace.load(selected).map(Some).map_err(|e| e.to_string())
}

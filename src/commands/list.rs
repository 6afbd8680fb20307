//! `docsketch list` command.

use std::path::Path;

use super::{open_workspace, NO_SOURCES_WARNING};

/// Execute the `list` command: print one archive-relative path per line.
///
/// # Errors
///
/// Returns an error string if the archive cannot be read or expanded.
pub fn run(archive: &Path) -> Result<(), String> {
    let workspace = open_workspace(archive)?;
    if workspace.is_empty() {
        eprintln!("{NO_SOURCES_WARNING}");
        return Ok(());
    }
    for source in workspace.sources() {
        println!("{source}");
    }
    Ok(())
}

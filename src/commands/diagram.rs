//! `docsketch diagram` command.

use std::path::Path;

use super::{open_workspace, select_source, NO_SOURCES_WARNING};
use crate::cli::DiagramFormat;
use crate::structure::{self, Graph};

/// Execute the `diagram` command.
///
/// # Errors
///
/// Returns an error string if the archive cannot be opened, the file cannot
/// be loaded or parsed, or the output cannot be written.
pub fn run(
    archive: &Path,
    file: Option<&str>,
    format: DiagramFormat,
    output: Option<&Path>,
) -> Result<(), String> {
    let workspace = open_workspace(archive)?;
    let Some(unit) = select_source(&workspace, file)? else {
        eprintln!("{NO_SOURCES_WARNING}");
        return Ok(());
    };

    let graph = structure::extract(&unit.text).map_err(|e| format!("{}: {e}", unit.path))?;
    let rendered = render(&graph, format)?;
    emit(&rendered, output)
}

/// Render `graph` in the requested format.
///
/// # Errors
///
/// Returns an error string if JSON serialization fails.
pub fn render(graph: &Graph, format: DiagramFormat) -> Result<String, String> {
    match format {
        DiagramFormat::Dot => Ok(graph.to_dot()),
        DiagramFormat::Json => serde_json::to_string_pretty(graph)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| format!("failed to serialize diagram: {e}")),
    }
}

/// Print `text`, or write it to `output` when given.
pub(crate) fn emit(text: &str, output: Option<&Path>) -> Result<(), String> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
            }
            std::fs::write(path, text)
                .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
            println!("Diagram written to {}", path.display());
            Ok(())
        }
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

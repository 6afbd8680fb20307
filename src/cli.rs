//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `docsketch`.
#[derive(Debug, Parser)]
#[command(
    name = "docsketch",
    version,
    about = "Document a source file from a zip archive and sketch its assignments"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Output format for the assignment diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiagramFormat {
    /// Graphviz DOT text.
    Dot,
    /// Pretty-printed JSON with `nodes` and `edges`.
    Json,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the source files found in an archive.
    List {
        /// Zip archive to inspect.
        archive: PathBuf,
    },
    /// Print the assignment diagram of one source file.
    Diagram {
        /// Zip archive containing the source tree.
        archive: PathBuf,
        /// Archive-relative path of the file (defaults to the first listed).
        #[arg(long)]
        file: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DiagramFormat::Dot)]
        format: DiagramFormat,
        /// Write the diagram here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Diagram one source file and generate its documentation.
    Document {
        /// Zip archive containing the source tree.
        archive: PathBuf,
        /// Archive-relative path of the file (defaults to the first listed).
        #[arg(long)]
        file: Option<String>,
        /// Write the DOT diagram here instead of stdout.
        #[arg(long)]
        diagram: Option<PathBuf>,
        /// Save the documentation as `documentation.md`.
        #[arg(long)]
        save: bool,
        /// Directory for the saved documentation.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "quizx",
    version,
    about = "Extract structured multiple-choice questions from quiz transcripts",
    after_help = "Settings (marker phrases, scanned extensions, output format) are read from \
                  .quizx/config.toml in the current directory. Run 'quizx init' to create it. \
                  Logs go to stderr; set RUST_LOG to adjust."
)]
pub struct Cli {
    /// Enable debug logging (dropped segments, unresolved answers)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract questions from transcript files, directories, or stdin.
    ///
    /// Directories are scanned for transcript files (gitignore aware).
    /// A single file argument prints one document report; anything else
    /// prints the reports of every document plus a summary.
    Extract {
        /// Files or directories; `-` reads stdin
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
        /// Fail a document on its first malformed question segment
        #[arg(long)]
        strict: bool,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
        /// Also write each document's questions to DIR/<name>.json
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// List files under a directory and whether they would be extracted
    Files {
        /// Directory to scan (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Only show files that would be skipped
        #[arg(long)]
        skipped_only: bool,
        /// Only show files that would be extracted
        #[arg(long)]
        supported_only: bool,
    },

    /// Word, character and page statistics of a transcript
    Stats {
        /// Transcript file
        path: PathBuf,
    },

    /// Show the effective marker table
    Markers,

    /// Write the default settings to .quizx/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

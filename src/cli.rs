//! Defines the command-line interface for the application.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "htmlsync",
    version,
    about = "Synchronize a shared HTML header and footer across sibling HTML files."
)]
pub struct Cli {
    /// The ".html" file whose header and footer are propagated.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Create a single new file from the source instead of synchronizing.
    #[arg(value_name = "NEW_FILE")]
    pub new_file: Option<PathBuf>,

    /// The directory to scan for target files. [default: current directory]
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Report pending changes without writing any files.
    #[arg(long, conflicts_with = "diff")]
    pub dry_run: bool,

    /// Show a diff of the pending changes instead of writing files.
    #[arg(long)]
    pub diff: bool,
}

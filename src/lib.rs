//! Core library for htmlsync: header/footer propagation across HTML files.

pub mod cli;
pub mod error;
pub mod locator;
pub mod splicer;

use crate::cli::Cli;
use crate::error::SyncError;
use crate::locator::{locate, SyncTokens};
use crate::splicer::{carve, new_document, splice, SourceParts, SpliceOutcome};
use anyhow::{anyhow, Context};
use clap::Parser;
use similar::TextDiff;
use std::ffi::OsStr;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

enum OutputMode {
    Write,
    DryRun,
    Diff,
}

/// Per-run tally of target outcomes, accumulated by the sync loop and
/// reported once at the end. The locate/splice core stays stateless.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub synchronized: usize,
    pub skipped: usize,
}

/// The main entry point for the application logic.
pub fn run() -> anyhow::Result<()> {
    // Initialize the logger. This will be configured by the RUST_LOG environment variable.
    env_logger::init();

    let cli = Cli::parse();
    let started = Instant::now();

    // 1. Up-front argument checks, before any target is touched.
    if cli.source.extension().and_then(OsStr::to_str) != Some("html") {
        return Err(SyncError::InvalidExtension(cli.source).into());
    }
    if !cli.source.is_file() {
        return Err(SyncError::SourceNotFound(cli.source).into());
    }
    if let Some(dest) = &cli.new_file {
        if dest.exists() {
            return Err(SyncError::NewFileExists(dest.clone()).into());
        }
    }

    let mode = if cli.diff {
        OutputMode::Diff
    } else if cli.dry_run {
        OutputMode::DryRun
    } else {
        OutputMode::Write
    };

    // 2. Carve the source into its shared header and footer.
    let source_html = fs::read_to_string(&cli.source)
        .with_context(|| format!("Failed to read source file: {}", cli.source.display()))?;
    let tokens = SyncTokens::default();
    let cuts = locate(&source_html, tokens);
    log::debug!("source cut points: {:?}", cuts);
    let parts = carve(&source_html, cuts)?;

    // 3. New-file mode creates one document and stops.
    if let Some(dest) = &cli.new_file {
        create_new_file(dest, parts, &mode)?;
        println!("> Run time: {:.2?}", started.elapsed());
        return Ok(());
    }

    // 4. Synchronize every sibling HTML file.
    let directory = cli.directory.as_deref().unwrap_or(Path::new("."));
    let targets = html_targets(directory, &cli.source)?;
    let report = sync_targets(&targets, parts, tokens, &mode)?;

    println!(
        "> Synchronized {} file(s), skipped {}",
        report.synchronized, report.skipped
    );
    println!("> Run time: {:.2?}", started.elapsed());
    Ok(())
}

/// Lists the candidate target files: regular `.html` files in `directory`,
/// excluding the source itself. Comparison is by canonical path so the source
/// is excluded however it was spelled on the command line.
fn html_targets(directory: &Path, source: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let source = fs::canonicalize(source)
        .with_context(|| format!("Failed to resolve source path: {}", source.display()))?;

    let entries = fs::read_dir(directory)
        .with_context(|| format!("Failed to read directory: {}", directory.display()))?;

    let mut targets = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(OsStr::to_str) != Some("html") {
            continue;
        }
        if fs::canonicalize(&path)? == source {
            continue;
        }
        targets.push(path);
    }

    // No ordering is required between targets; sorting just keeps the
    // diagnostics stable.
    targets.sort();
    Ok(targets)
}

/// Applies the update policy to each target in turn. A target missing the
/// head token is reported and skipped; it never aborts the batch.
fn sync_targets(
    targets: &[PathBuf],
    parts: SourceParts<'_>,
    tokens: SyncTokens<'_>,
    mode: &OutputMode,
) -> anyhow::Result<SyncReport> {
    let mut report = SyncReport::default();

    for target in targets {
        let target_html = fs::read_to_string(target)
            .with_context(|| format!("Failed to read target file: {}", target.display()))?;
        let cuts = locate(&target_html, tokens);
        log::debug!("{}: cut points {:?}", target.display(), cuts);

        match splice(parts, &target_html, cuts) {
            SpliceOutcome::Updated(updated) => {
                match mode {
                    OutputMode::Write => {
                        write_in_place(target, &updated)?;
                        println!("> Synchronized file: {}", target.display());
                    }
                    OutputMode::DryRun => {
                        println!("> Would synchronize file: {}", target.display());
                    }
                    OutputMode::Diff => {
                        print_diff(&target_html, &updated, target);
                    }
                }
                report.synchronized += 1;
            }
            SpliceOutcome::TokenMissing => {
                println!("> Sync token missing: {}", target.display());
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

/// Writes `content` to `path` by way of a temporary file in the same
/// directory followed by an atomic rename, so a crash mid-write never leaves
/// a half-synchronized target behind.
fn write_in_place(path: &Path, content: &str) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow!("Could not determine parent directory of {}", path.display()))?;
    // `parent` is "" when the path is a bare file name in the current directory.
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    let mut temp_file = tempfile::Builder::new()
        .prefix(".htmlsync-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write to temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to replace target file {}", path.display()))?;

    Ok(())
}

fn print_diff(original: &str, updated: &str, path: &Path) {
    let header = path.display().to_string();
    let diff_output = TextDiff::from_lines(original, updated)
        .unified_diff()
        .header(&header, &format!("{} (synchronized)", header))
        .to_string();
    print!("{diff_output}");
}

/// Creates a brand-new document holding the source's header and footer.
/// Creation never overwrites: the destination existing is a fatal error even
/// if it appeared after the up-front check.
fn create_new_file(dest: &Path, parts: SourceParts<'_>, mode: &OutputMode) -> anyhow::Result<()> {
    let content = new_document(parts);

    match mode {
        OutputMode::Write => {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(dest)
                .map_err(|err| match err.kind() {
                    ErrorKind::AlreadyExists => {
                        anyhow::Error::from(SyncError::NewFileExists(dest.to_path_buf()))
                    }
                    _ => anyhow::Error::from(err)
                        .context(format!("Failed to create new file: {}", dest.display())),
                })?;
            file.write_all(content.as_bytes())
                .with_context(|| format!("Failed to write new file: {}", dest.display()))?;
            println!("> New HTML file created: {}", dest.display());
        }
        OutputMode::DryRun => {
            println!("> Would create new file: {}", dest.display());
            print!("{content}");
        }
        OutputMode::Diff => {
            print_diff("", &content, dest);
        }
    }

    Ok(())
}

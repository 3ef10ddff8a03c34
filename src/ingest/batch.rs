use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use linya::Progress;
use walkdir::WalkDir;

use crate::schema::{AirrSchema, AIRR_SCHEMA};
use crate::table::{tsv, RecordTable};

use super::derive::derive;
use super::normalize::normalize;

/// File name suffixes accepted when scanning a directory for input files.
pub const INPUT_EXTENSIONS: &[&str] = &[".tsv", ".txt", ".tsv.gz"];

fn has_input_extension(name: &str) -> bool {
    INPUT_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Resolve an input specification (files and/or directories, directories
/// optionally descended recursively) into a deduplicated, sorted file list.
/// Zero-byte files are excluded here with a warning; explicitly named files
/// are accepted regardless of extension.
pub fn resolve_input_files(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let max_depth = if recursive { usize::MAX } else { 1 };
            for entry in WalkDir::new(input).max_depth(max_depth) {
                let entry = entry
                    .with_context(|| format!("cannot scan directory {}", input.display()))?;
                if !entry.file_type().is_file() {
                    continue;
                }
                if has_input_extension(&entry.file_name().to_string_lossy()) {
                    files.push(entry.into_path());
                }
            }
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            bail!("input path {} does not exist", input.display());
        }
    }

    files.sort();
    files.dedup();
    files.retain(|file| match fs::metadata(file) {
        Ok(meta) if meta.len() == 0 => {
            log::warn!("excluding zero-byte input file {}", file.display());
            false
        }
        _ => true,
    });
    Ok(files)
}

/// Read, normalize and annotate a single repertoire file.
pub fn ingest_one(path: &Path, schema: &AirrSchema) -> Result<RecordTable> {
    let raw = tsv::read_table(path)?;
    let mut table = normalize(raw, path, schema)?;
    derive(&mut table)?;
    Ok(table)
}

/// Ingest a resolved file list into one unified repertoire table.
///
/// Processing is sequential and per-file independent; a file that fails to
/// parse or normalize is skipped with a warning and the batch continues.
/// Rows end up in file-then-row order, the column set is the union of the
/// canonical fields across files.
pub fn ingest_files(files: &[PathBuf]) -> RecordTable {
    let schema = &*AIRR_SCHEMA;
    let mut progress = Progress::new();
    let bar = progress.bar(files.len(), format!("Ingesting {} files", files.len()));

    let mut parts: Vec<RecordTable> = Vec::with_capacity(files.len());
    for (done, file) in files.iter().enumerate() {
        match ingest_one(file, schema) {
            Ok(table) => {
                log::info!("{}: {} records", file.display(), table.n_rows());
                parts.push(table);
            }
            Err(e) => {
                log::warn!("skipping {}: {}", file.display(), e);
            }
        }
        progress.set_and_draw(&bar, done + 1);
    }
    RecordTable::concat(parts)
}

/// Full batch entry point: resolve the input specification, then ingest.
/// Zero qualifying files is an empty result, not an error.
pub fn ingest(inputs: &[PathBuf], recursive: bool) -> Result<RecordTable> {
    let files = resolve_input_files(inputs, recursive)?;
    if files.is_empty() {
        log::warn!("no qualifying input files found");
        return Ok(RecordTable::new());
    }
    Ok(ingest_files(&files))
}

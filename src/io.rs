use glob::glob;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::ProcessingStats;

/// Collect every `.xml` file below `dirname`, recursively, in path order.
pub fn find_xml_files(dirname: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/**/*.xml", glob::Pattern::escape(&dirname.to_string_lossy()));
    let entries = glob(&pattern)?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => log::warn!("Skipping unreadable path {}: {}", e.path().display(), e),
        }
    }
    files.sort();
    Ok(files)
}

/// Serialize `value` as JSON with sorted keys and four-space indentation.
///
/// Keys are sorted by round-tripping through `serde_json::Value`, whose map
/// keeps its keys ordered. Non-ASCII characters are written as-is.
pub fn to_sorted_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let value = serde_json::to_value(value)?;
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Write `value` to `path` as sorted, indented JSON.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let bytes = to_sorted_json(value)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Create the output directory if needed; existing files are kept.
pub fn create_output_directory(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        log::info!("Creating output directory {}", path.display());
    }
    fs::create_dir_all(path)?;
    Ok(path.to_path_buf())
}

/// Append the final success message to the log file.
pub fn append_summary_log(log_path: &Path, stats: &ProcessingStats) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    writeln!(
        file,
        "{} | SUCCESS | Conversion finished, {} file(s) converted",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        stats.successful_conversions
    )?;
    Ok(())
}

use anyhow::{Context, Result};
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::projection::ProjectedEvent;

/// Writes `events` as a 2-space indented JSON array, replacing any existing file.
/// Missing parent directories are created first.
pub fn write_events<P: AsRef<Path>>(path: P, events: &[ProjectedEvent]) -> Result<()> {
    let file_path = path.as_ref();
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let file = File::create(file_path)
        .with_context(|| format!("Failed to create output file: {}", file_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, events)
        .with_context(|| format!("Failed to serialize events to: {}", file_path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output file: {}", file_path.display()))?;

    info!("Wrote {} events to: {}", events.len(), file_path.display());
    Ok(())
}

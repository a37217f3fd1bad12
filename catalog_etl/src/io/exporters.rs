use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use polars::prelude::*;

use crate::error::{PipelineError, PipelineResult};

/// Writes frames and text reports, replacing any existing file
pub struct TableExporter;

impl TableExporter {
    /// Write a frame as CSV with a header row, in the frame's column order.
    ///
    /// Missing cells are written as empty fields. `table` only names the
    /// frame in the log. The file handle is released on every return path,
    /// including write failures.
    pub fn write_csv(df: &DataFrame, table: &str, path: &Path) -> PipelineResult<()> {
        Self::ensure_parent(path)?;
        let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
        let mut writer = BufWriter::new(file);

        let mut frame = df.clone();
        CsvWriter::new(&mut writer)
            .include_header(true)
            .finish(&mut frame)?;
        writer.flush().map_err(|e| PipelineError::io(path, e))?;

        log::info!(
            "Wrote {} rows of '{}' to {}",
            df.height(),
            table,
            path.display()
        );
        Ok(())
    }

    /// Write a text report in full.
    pub fn write_text(content: &str, path: &Path) -> PipelineResult<()> {
        Self::ensure_parent(path)?;
        let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(content.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| PipelineError::io(path, e))?;
        log::info!("Wrote report to {}", path.display());
        Ok(())
    }

    fn ensure_parent(path: &Path) -> PipelineResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))
            }
            _ => Ok(()),
        }
    }
}

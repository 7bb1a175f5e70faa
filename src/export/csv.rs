//! CSV output: the results file and its console mirror.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use csv::{Terminator, Writer, WriterBuilder};

use super::columns::{ColumnSet, OutputRow};
use crate::config::{InputSource, OUTPUT_SUFFIX, STDIN_TIMESTAMP_FORMAT};

/// Output file name for an input source, without any version suffix.
///
/// File inputs give `<stem>_ipinfo.csv`; stdin gives `stdin_<timestamp>.csv`.
pub fn output_file_name(source: &InputSource, now: DateTime<Local>) -> String {
    let stem = source
        .file()
        .and_then(|path| path.file_stem())
        .map(|stem| stem.to_string_lossy().into_owned());
    match stem {
        Some(stem) => format!("{stem}{OUTPUT_SUFFIX}.csv"),
        None => format!("stdin_{}.csv", now.format(STDIN_TIMESTAMP_FORMAT)),
    }
}

/// Path of the `version`-th alternative to `path`: `<stem>_v<version>.<ext>`.
fn versioned_candidate(path: &Path, version: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_v{version}.{}", ext.to_string_lossy()),
        None => format!("{stem}_v{version}"),
    };
    path.with_file_name(name)
}

/// Creates `path`, or the first free `_v1`, `_v2`, ... variant of it.
///
/// Existing files are never truncated.
///
/// # Errors
///
/// Returns an error if a file cannot be created for a reason other than
/// the name being taken.
pub fn create_versioned(path: &Path) -> Result<(File, PathBuf)> {
    let mut candidate = path.to_path_buf();
    let mut version = 0;
    loop {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((file, candidate)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                version += 1;
                candidate = versioned_candidate(path, version);
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to create output file: {}", candidate.display())
                })
            }
        }
    }
}

/// Destination for report rows.
///
/// Rows always go to the console; when a file is attached they are also
/// written there in the same column order.
pub struct RowSink {
    columns: ColumnSet,
    file: Option<(Writer<File>, PathBuf)>,
    console: Writer<Box<dyn Write>>,
    rows_written: usize,
}

impl RowSink {
    /// Sink writing to a new, versioned file and to `console`.
    ///
    /// The header row is written immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or the header cannot
    /// be written.
    pub fn to_file(path: &Path, columns: ColumnSet, console: Box<dyn Write>) -> Result<Self> {
        let (file, path) = create_versioned(path)?;
        let mut sink = Self {
            columns,
            file: Some((Writer::from_writer(file), path)),
            console: console_writer(console),
            rows_written: 0,
        };
        sink.write_header()?;
        Ok(sink)
    }

    /// Sink writing to `console` only.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn console_only(columns: ColumnSet, console: Box<dyn Write>) -> Result<Self> {
        let mut sink = Self {
            columns,
            file: None,
            console: console_writer(console),
            rows_written: 0,
        };
        sink.write_header()?;
        Ok(sink)
    }

    /// Path of the results file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|(_, path)| path.as_path())
    }

    /// Number of data rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Column layout of this sink.
    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    fn write_header(&mut self) -> Result<()> {
        let header = self.columns.headers();
        if let Some((writer, _)) = self.file.as_mut() {
            writer
                .write_record(&header)
                .context("Failed to write CSV header")?;
        }
        self.console
            .write_record(&header)
            .context("Failed to write CSV header to console")?;
        Ok(())
    }

    /// Renders and writes one row.
    ///
    /// # Errors
    ///
    /// Returns an error if a write fails.
    pub fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        let fields = self.columns.render(row);
        if let Some((writer, _)) = self.file.as_mut() {
            writer
                .write_record(&fields)
                .context("Failed to write CSV record")?;
        }
        self.console
            .write_record(&fields)
            .context("Failed to write CSV record to console")?;
        self.console.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flushes all writers and returns the results file path, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn finish(mut self) -> Result<Option<PathBuf>> {
        self.console.flush()?;
        match self.file.take() {
            Some((mut writer, path)) => {
                writer
                    .flush()
                    .with_context(|| format!("Failed to flush {}", path.display()))?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }
}

fn console_writer(console: Box<dyn Write>) -> Writer<Box<dyn Write>> {
    WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(console)
}

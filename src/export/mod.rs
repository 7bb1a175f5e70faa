//! Report output.
//!
//! This module provides:
//! - The run's column layout and row rendering
//! - CSV writing (results file plus console mirror) with versioned file names
//! - Spreadsheet conversion of the finished CSV

mod columns;
mod csv;
mod xlsx;

pub use columns::{Column, ColumnFlags, ColumnSet, OutputRow};
pub use csv::{create_versioned, output_file_name, RowSink};
pub use xlsx::convert_to_xlsx;

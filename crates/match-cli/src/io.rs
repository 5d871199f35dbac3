//! File input and output for the command-line driver.

use matcher::{OutputFormat, Table, TableError};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors reading inputs or writing the scored table.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{path}: invalid JSON on line {line}: {source}")]
    Json {
        path: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path}: {source}")]
    Table {
        path: String,
        #[source]
        source: TableError,
    },
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn read(path: &Path) -> Result<String, IoError> {
    fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn is_jsonl(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("jsonl")
}

/// Reads a JSON document, or a JSONL file as an array of its lines.
pub fn read_json(path: &Path) -> Result<Value, IoError> {
    let content = read(path)?;
    let json_err = |line: usize, source: serde_json::Error| IoError::Json {
        path: path.display().to_string(),
        line,
        source,
    };

    if is_jsonl(path) {
        let mut records: Vec<Value> = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(line).map_err(|e| json_err(idx + 1, e))?);
        }
        Ok(Value::Array(records))
    } else {
        serde_json::from_str(&content).map_err(|e| json_err(e.line(), e))
    }
}

/// Loads an agent table from a JSON or JSONL file.
pub fn load_table(path: &Path) -> Result<Table, IoError> {
    let value = read_json(path)?;
    Table::from_json(&value).map_err(|source| IoError::Table {
        path: path.display().to_string(),
        source,
    })
}

/// Writes a scored table in the requested format.
pub fn write_table<W: Write>(
    writer: W,
    table: &Table,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), IoError> {
    let mut writer = BufWriter::new(writer);
    match format {
        OutputFormat::Json if pretty => serde_json::to_writer_pretty(&mut writer, table)?,
        OutputFormat::Json => serde_json::to_writer(&mut writer, table)?,
        OutputFormat::Jsonl => {
            for record in table.to_records() {
                serde_json::to_writer(&mut writer, &record)?;
                writeln!(writer)?;
            }
        }
    }
    if format == OutputFormat::Json {
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes to `path`, or stdout when no path is given.
pub fn write_output(
    path: Option<&Path>,
    table: &Table,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), IoError> {
    match path {
        Some(path) => write_table(File::create(path)?, table, format, pretty),
        None => write_table(io::stdout().lock(), table, format, pretty),
    }
}

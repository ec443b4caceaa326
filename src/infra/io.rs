use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use indexmap::IndexMap;

use crate::error::{Error, Result};

/// One headed row: column name → cell, in header order
pub type Row = IndexMap<String, String>;

/// A headed table as read from disk
#[derive(Debug, Clone, Default)]
pub struct HeadedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl HeadedTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Fail with a structural error when any of `columns` is absent
    pub fn require_columns(&self, path: &Path, columns: &[&str]) -> Result<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(Error::MissingColumn {
                path: path.to_path_buf(),
                column: (*missing).to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn open(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(Error::MissingInput { path: path.to_path_buf() });
    }
    Ok(File::open(path)?)
}

/// Read every record positionally, without header handling.
/// Rows may have different widths.
///
/// Blank lines come back as empty rows, so `rows[i]` is the i-th row of the
/// file and configured row offsets count them.
pub fn read_raw_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut bytes = Vec::new();
    open(path)?.read_to_end(&mut bytes)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        // The reader skips blank lines; recover the record's row from the
        // newlines consumed so far.
        let end = reader.position();
        let embedded: u64 = record.iter().map(|f| f.matches('\n').count() as u64).sum();
        let terminated = ends_with_newline(&bytes, end.byte());
        let row = (end.line() - 1).saturating_sub(embedded + u64::from(terminated));
        pad_to(&mut rows, row);
        rows.push(record.iter().map(str::to_string).collect());
    }

    // Trailing blank lines
    if bytes.ends_with(b"\n") {
        pad_to(&mut rows, reader.position().line() - 1);
    }
    Ok(rows)
}

fn ends_with_newline(bytes: &[u8], consumed: u64) -> bool {
    usize::try_from(consumed)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| bytes.get(i))
        == Some(&b'\n')
}

fn pad_to(rows: &mut Vec<Vec<String>>, len: u64) {
    while (rows.len() as u64) < len {
        rows.push(Vec::new());
    }
}

/// Read a table whose first line is the header.
///
/// Short rows leave their trailing columns absent; extra cells beyond the
/// header are dropped.
pub fn read_headed(path: &Path) -> Result<HeadedTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(open(path)?);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(row);
    }

    Ok(HeadedTable { headers, rows })
}

/// Write a headed table, creating parent directories. Returns the row count.
pub fn write_table<I>(path: &Path, headers: &[String], rows: I) -> Result<usize>
where
    I: IntoIterator<Item = Vec<String>>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(headers)?;

    let mut count = 0;
    for row in rows {
        writer.write_record(&row)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Project a row onto `headers`, empty string for absent cells
pub fn project(row: &Row, headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|h| row.get(h).cloned().unwrap_or_default())
        .collect()
}

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::AgePolicy;
use crate::record::{columns, AnimalRecord, Field};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What a call to [`persist`] did to the dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistSummary {
    pub created: bool,
    pub existing_rows: usize,
    pub appended: usize,
}

/// Numeric reading of an Age cell, `None` when it is not a number.
pub fn coerce_age(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|age| age.is_finite())
}

/// Render an Age cell under the given policy.
///
/// Under [`AgePolicy::Numeric`] anything that is not a number becomes an
/// empty cell, and an already coerced value comes back unchanged.
pub fn age_cell(value: &str, policy: AgePolicy) -> String {
    match policy {
        AgePolicy::Text => value.to_string(),
        AgePolicy::Numeric => coerce_age(value)
            .map(|age| age.to_string())
            .unwrap_or_default(),
    }
}

/// Dataset row for one record of a run.
pub fn row(record: &AnimalRecord, scrape_date: &str, policy: AgePolicy) -> Vec<String> {
    Field::ALL
        .iter()
        .map(|field| match field {
            Field::Age => age_cell(&record.age, policy),
            _ => record.get(*field).to_string(),
        })
        .chain(std::iter::once(scrape_date.to_string()))
        .collect()
}

/// Header and rows of a dataset file, in the order they are stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Add any dataset column the header lacks, at the end, with empty cells
    /// for the rows already present.
    pub fn ensure_columns(&mut self) {
        for column in columns() {
            if !self.headers.iter().any(|h| h == column) {
                log::warn!("Adding missing column '{}'", column);
                self.headers.push(column.to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }
    }

    /// Append a row given in dataset column order, placed under the matching
    /// headers. Columns the row does not know stay empty.
    pub fn push_row(&mut self, values: Vec<String>) {
        let mut by_name: Vec<(&str, String)> = columns().into_iter().zip(values).collect();
        let row: Vec<String> = self
            .headers
            .iter()
            .map(|header| {
                by_name
                    .iter_mut()
                    .find(|(name, _)| *name == header.as_str())
                    .map(|(_, value)| std::mem::take(value))
                    .unwrap_or_default()
            })
            .collect();
        self.rows.push(row);
    }
}

/// Load an existing dataset as it is on disk, every column included.
pub fn read_table(path: &Path) -> Result<Table, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(Table { headers, rows })
}

/// Write the table to `path`, replacing whatever was there.
pub fn write_table(path: &Path, table: &Table) -> Result<(), DatasetError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let tmp = tempfile::NamedTempFile::new_in(&dir)?;
    {
        let mut writer = csv::Writer::from_writer(tmp.as_file());
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// Merge one run's batch into the dataset at `path`, creating it if needed.
///
/// Existing rows and columns are kept as they are and the batch is added
/// after them.
pub fn persist(
    path: &Path,
    batch: &[AnimalRecord],
    scrape_date: &str,
    policy: AgePolicy,
) -> Result<PersistSummary, DatasetError> {
    let created = !path.exists();
    let mut table = if created {
        Table::default()
    } else {
        read_table(path)?
    };
    let existing_rows = table.rows.len();

    table.ensure_columns();
    for record in batch {
        table.push_row(row(record, scrape_date, policy));
    }
    write_table(path, &table)?;

    if created {
        log::info!("Data saved to '{}'.", path.display());
    } else {
        log::info!("Data appended to '{}'.", path.display());
    }

    Ok(PersistSummary {
        created,
        existing_rows,
        appended: batch.len(),
    })
}

/// Number of data rows (header excluded) currently in the dataset.
pub fn row_count(path: &Path) -> Result<usize, DatasetError> {
    if !path.exists() {
        return Ok(0);
    }
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut count = 0;
    for result in reader.records() {
        result?;
        count += 1;
    }
    Ok(count)
}

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{Complaint, ComplaintTable, complaint_date, date_string};
use crate::config::DashboardConfig;

/// Columns every export must carry.
pub const YEAR_COLUMN: &str = "ANO";
pub const MONTH_COLUMN: &str = "MES";
pub const DAY_COLUMN: &str = "DIA";
pub const LOCATION_COLUMN: &str = "LOCAL";
pub const STATUS_COLUMN: &str = "STATUS";
pub const DESCRIPTION_COLUMN: &str = "DESCRICAO";

/// Columns the loader adds to the unified table.
pub const SOURCE_COLUMN: &str = "Empresa";
pub const DATE_COLUMN: &str = "Data";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Anything that prevents the dashboard from starting.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("{origin}: reading header: {source}")]
    Header { origin: String, source: csv::Error },

    #[error("{origin}: missing required column '{column}'")]
    MissingColumn { origin: String, column: &'static str },

    #[error("{origin}, row {row}: {source}")]
    Record {
        origin: String,
        row: usize,
        source: csv::Error,
    },

    #[error("{origin}, row {row}: {column} value '{value}' is not an integer")]
    NotAnInteger {
        origin: String,
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("{origin}, row {row}: '{date}' is not a valid calendar date")]
    InvalidDate {
        origin: String,
        row: usize,
        date: String,
        source: chrono::ParseError,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every configured source and merge them into one table.
pub fn load_sources(config: &DashboardConfig) -> Result<ComplaintTable, LoadError> {
    let mut parts = Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        let path = config.source_path(source);
        let part = load_source(&path, &source.company)?;
        log::info!(
            "Loaded {} complaints for {} from {}",
            part.len(),
            source.company,
            path.display()
        );
        parts.push(part);
    }

    let table = ComplaintTable::concat(parts);
    log::info!(
        "Unified table: {} complaints, columns {:?}",
        table.len(),
        table.column_names()
    );
    Ok(table)
}

/// Load one CSV export, tagging every row with `company`.
pub fn load_source(path: &Path, company: &str) -> Result<ComplaintTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_complaints(file, company, &path.display().to_string())
}

/// Parse complaints from any CSV stream. `origin` names the stream in errors.
pub fn read_complaints<R: io::Read>(
    input: R,
    company: &str,
    origin: &str,
) -> Result<ComplaintTable, LoadError> {
    read_records(csv::Reader::from_reader(input), company, origin)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Positions of the required columns in the header row.
struct ColumnIndex {
    year: usize,
    month: usize,
    day: usize,
    location: usize,
    status: usize,
    description: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &[String], origin: &str) -> Result<Self, LoadError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| LoadError::MissingColumn {
                    origin: origin.to_string(),
                    column,
                })
        };
        Ok(ColumnIndex {
            year: find(YEAR_COLUMN)?,
            month: find(MONTH_COLUMN)?,
            day: find(DAY_COLUMN)?,
            location: find(LOCATION_COLUMN)?,
            status: find(STATUS_COLUMN)?,
            description: find(DESCRIPTION_COLUMN)?,
        })
    }

    fn is_named(&self, idx: usize) -> bool {
        [
            self.year,
            self.month,
            self.day,
            self.location,
            self.status,
            self.description,
        ]
        .contains(&idx)
    }
}

fn read_records<R: io::Read>(
    mut reader: csv::Reader<R>,
    company: &str,
    origin: &str,
) -> Result<ComplaintTable, LoadError> {
    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| LoadError::Header {
            origin: origin.to_string(),
            source,
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let idx = ColumnIndex::from_headers(&headers, origin)?;

    let mut complaints = Vec::new();

    // Row numbers in errors are 1-based data rows (the header is not counted).
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|source| LoadError::Record {
            origin: origin.to_string(),
            row,
            source,
        })?;
        let field = |col: usize| record.get(col).unwrap_or("");

        let int = |col: usize, column: &'static str| {
            let raw = field(col).trim();
            raw.parse::<i64>().map_err(|_| LoadError::NotAnInteger {
                origin: origin.to_string(),
                row,
                column,
                value: raw.to_string(),
            })
        };
        let year = int(idx.year, YEAR_COLUMN)?;
        let month = int(idx.month, MONTH_COLUMN)?;
        let day = int(idx.day, DAY_COLUMN)?;

        let date = complaint_date(year, month, day).map_err(|source| LoadError::InvalidDate {
            origin: origin.to_string(),
            row,
            date: date_string(year, month, day),
            source,
        })?;

        let extra: BTreeMap<String, String> = record
            .iter()
            .enumerate()
            .filter(|(col, _)| !idx.is_named(*col))
            .filter_map(|(col, value)| Some((headers.get(col)?.clone(), value.to_string())))
            .collect();

        complaints.push(Complaint {
            source: company.to_string(),
            location: field(idx.location).to_string(),
            status: field(idx.status).to_string(),
            description: field(idx.description).to_string(),
            year,
            month,
            day,
            date,
            extra,
        });
    }

    let mut column_names = headers;
    column_names.push(SOURCE_COLUMN.to_string());
    column_names.push(DATE_COLUMN.to_string());

    Ok(ComplaintTable::new(complaints, column_names))
}

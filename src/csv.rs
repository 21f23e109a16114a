use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::form::FormInputs;
use crate::model::Transaction;

/// Errors that can occur when reading submissions or writing history
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("failed to write history: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to flush history: {0}")]
    Flush(#[from] io::Error),
}

#[derive(Debug, Deserialize)]
struct SubmissionRow {
    animal: Option<String>,
    zoo: Option<String>,
    amount: Option<String>,
}

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    animal: &'a str,
    zoo: &'a str,
    amount: u32,
    date: String,
}

/// Read scripted form submissions from a csv file with an `animal,zoo,amount` header.
/// Empty cells stay unselected.
pub fn read_submissions(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<FormInputs, CsvError>>, CsvError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CsvError::Open {
            path: path.display().to_string(),
            source,
        })?;

    Ok(reader
        .into_deserialize::<SubmissionRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            Ok(FormInputs {
                animal: row.animal,
                zoo: row.zoo,
                amount: row.amount,
            })
        }))
}

/// Write the donation history, most recent first, in csv format
pub fn write_history<'a, W: io::Write>(
    out: W,
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Result<(), CsvError> {
    let mut writer = csv::Writer::from_writer(out);

    for tx in transactions {
        let row = HistoryRow {
            animal: tx.animal(),
            zoo: tx.zoo(),
            amount: tx.amount().get(),
            date: tx.timestamp().to_rfc3339(),
        };
        writer.serialize(&row)?;
    }

    writer.flush()?;
    Ok(())
}

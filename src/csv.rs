use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::engine::Ledger;
use crate::{Amount, Balance, Expense, Participant, ParticipantId, Settlement};

/// Separator between ids in the `split_between` column.
const SPLIT_SEPARATOR: char = ';';

/// Errors that can occur when reading or writing csv
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: expense {id} has no participants in split_between")]
    EmptySplit { line: usize, id: String },

    #[error("line {line}: amount {value} is not finite or exceeds the maximum")]
    InvalidAmount { line: usize, value: f64 },

    #[error("failed to write csv: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to flush csv output: {0}")]
    Flush(#[from] io::Error),
}

#[derive(Debug, Deserialize)]
struct ExpenseRow {
    id: String,
    date: DateTime<Utc>,
    description: String,
    amount: f64,
    paid_by: String,
    split_between: String,
    category: Option<String>,
}

#[derive(Debug, Serialize)]
struct BalanceRow<'a> {
    participant: &'a str,
    name: &'a str,
    paid: String,
    owed: String,
    balance: String,
}

#[derive(Debug, Serialize)]
struct SettlementRow<'a> {
    from: &'a str,
    to: &'a str,
    amount: String,
}

#[derive(Debug, Serialize)]
struct ExpenseExportRow<'a> {
    date: String,
    description: &'a str,
    amount: String,
    paid_by: &'a str,
    participants: String,
    category: &'a str,
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, CsvError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| CsvError::Open {
            path: path.display().to_string(),
            source,
        })
}

/// Read the roster from a csv file with `id,name,color` columns
pub fn read_participants(path: impl AsRef<Path>) -> Result<Vec<Participant>, CsvError> {
    let reader = open(path.as_ref())?;

    reader
        .into_deserialize::<Participant>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            result.map_err(|source| CsvError::Parse { line, source })
        })
        .collect()
}

/// Read expenses from a csv file
///
/// `split_between` holds participant ids separated by `;`.
/// An empty `category` cell is read as no category.
pub fn read_expenses(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Expense, CsvError>>, CsvError> {
    let reader = open(path.as_ref())?;

    Ok(reader
        .into_deserialize::<ExpenseRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;

            let split_between: Vec<ParticipantId> = row
                .split_between
                .split(SPLIT_SEPARATOR)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(ParticipantId::from)
                .collect();
            if split_between.is_empty() {
                return Err(CsvError::EmptySplit { line, id: row.id });
            }
            let amount = Amount::try_from_float(row.amount).ok_or(CsvError::InvalidAmount {
                line,
                value: row.amount,
            })?;

            Ok(Expense {
                id: row.id,
                description: row.description,
                amount,
                paid_by: ParticipantId::new(row.paid_by),
                split_between,
                date: row.date,
                category: row.category.filter(|c| !c.is_empty()),
            })
        }))
}

/// Write balances in csv format, amounts multiplied by `rate` for display
pub fn write_balances(
    out: impl io::Write,
    ledger: &Ledger,
    balances: &[Balance],
    rate: f64,
) -> Result<(), CsvError> {
    let mut writer = csv::Writer::from_writer(out);

    for balance in balances {
        writer.serialize(BalanceRow {
            participant: balance.participant_id.as_str(),
            name: ledger.participant_name(&balance.participant_id),
            paid: balance.total_paid.scaled_by(rate).to_string(),
            owed: balance.total_owed.scaled_by(rate).to_string(),
            balance: balance.net_balance.scaled_by(rate).to_string(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a settlement plan in csv format, names resolved through the ledger
pub fn write_settlements(
    out: impl io::Write,
    ledger: &Ledger,
    settlements: &[Settlement],
    rate: f64,
) -> Result<(), CsvError> {
    // header is written up front so an empty plan still prints it
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(["from", "to", "amount"])?;

    for settlement in settlements {
        writer.serialize(SettlementRow {
            from: ledger.participant_name(&settlement.from),
            to: ledger.participant_name(&settlement.to),
            amount: settlement.amount.scaled_by(rate).to_string(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the expense list with payer and participants as display names
pub fn write_expenses(out: impl io::Write, ledger: &Ledger, rate: f64) -> Result<(), CsvError> {
    let mut writer = csv::Writer::from_writer(out);

    for expense in ledger.expenses() {
        let participants = expense
            .split_between
            .iter()
            .map(|id| ledger.participant_name(id))
            .collect::<Vec<_>>()
            .join("; ");

        writer.serialize(ExpenseExportRow {
            date: expense.date.format("%Y-%m-%d").to_string(),
            description: &expense.description,
            amount: expense.amount.scaled_by(rate).to_string(),
            paid_by: ledger.participant_name(&expense.paid_by),
            participants,
            category: expense.category.as_deref().unwrap_or_default(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

//! Error types for ledger entry.

use thiserror::Error;

use crate::Amount;
use crate::model::ParticipantId;

/// Top-level error returned by [`Ledger`](super::Ledger) operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid roster: {0}")]
    Roster(#[from] RosterError),

    #[error("expense rejected: {0}")]
    Expense(#[from] ExpenseError),
}

/// Error building a ledger from a participant roster.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("roster is empty")]
    Empty,
    #[error("duplicate participant id {0}")]
    DuplicateParticipant(ParticipantId),
}

/// Error admitting an expense into a ledger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpenseError {
    #[error("expense {0}: amount must be positive, got {1}")]
    NonPositiveAmount(String, Amount),
    #[error("expense {0}: amount {1} exceeds the maximum of {max}", max = Amount::MAX)]
    AmountTooLarge(String, Amount),
    #[error("expense {0}: split set is empty")]
    EmptySplit(String),
    #[error("expense {0}: participant {1} listed twice in split set")]
    DuplicateSplitMember(String, ParticipantId),
    #[error("expense {0}: payer {1} is not in the roster")]
    UnknownPayer(String, ParticipantId),
    #[error("expense {0}: split member {1} is not in the roster")]
    UnknownSplitMember(String, ParticipantId),
    #[error("duplicate expense id {0}")]
    DuplicateExpenseId(String),
}

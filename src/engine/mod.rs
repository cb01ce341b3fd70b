//! Balance and settlement engine.
//!
//! [`compute_balances`] and [`plan_settlements`] are the pure two-stage
//! pipeline. [`Ledger`] wraps them with entry-time validation: it admits
//! only expenses that reference its roster, and recomputes balances and
//! settlements from the full expense list on every read.
//! Also supports an async stream of expenses.

use std::collections::HashSet;
use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::Amount;
use crate::model::{Balance, Expense, Participant, ParticipantId, Settlement, TripSummary};

mod balance;
pub use balance::compute_balances;

mod settlement;
pub use settlement::{TOLERANCE, plan_settlements};

mod state;

mod error;
pub use error::{ExpenseError, LedgerError, RosterError};

/// Display name used for ids that are not in the roster.
pub const UNKNOWN_PARTICIPANT: &str = "unknown";

/// A trip ledger: a fixed roster and the expenses admitted against it.
pub struct Ledger {
    participants: Vec<Participant>,
    expenses: Vec<Expense>,
}

/// Public API
impl Ledger {
    /// Build an empty ledger over `participants`, rejecting duplicate ids.
    pub fn new(participants: Vec<Participant>) -> Result<Self, RosterError> {
        if participants.is_empty() {
            return Err(RosterError::Empty);
        }

        let mut seen = HashSet::with_capacity(participants.len());
        for participant in &participants {
            if !seen.insert(&participant.id) {
                return Err(RosterError::DuplicateParticipant(participant.id.clone()));
            }
        }

        Ok(Self {
            participants,
            expenses: Vec::new(),
        })
    }

    /// Build a ledger and admit every expense, failing on the first rejection.
    pub fn with_expenses(
        participants: Vec<Participant>,
        expenses: impl IntoIterator<Item = Expense>,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(participants)?;
        for expense in expenses {
            ledger.add_expense(expense)?;
        }
        Ok(ledger)
    }

    /// Run the ledger with the given expense stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Expense> + Unpin) {
        while let Some(expense) = stream.next().await {
            // a rejected expense should not stop the ledger; it is already logged
            let _ = self.add_expense(expense);
        }
    }

    /// Validate and admit an expense. Rejected expenses leave the ledger unchanged.
    pub fn add_expense(&mut self, expense: Expense) -> Result<(), ExpenseError> {
        let result = self.validate(&expense);
        Self::log_result(&expense, &result);
        result?;
        self.expenses.push(expense);
        Ok(())
    }

    /// Remove an expense by id, returning it if present.
    pub fn remove_expense(&mut self, id: &str) -> Option<Expense> {
        let idx = self.expenses.iter().position(|e| e.id == id)?;
        let removed = self.expenses.remove(idx);
        info!(expense = %removed.id, amount = %removed.amount, "expense removed");
        Some(removed)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// Display name for `id`, falling back to [`UNKNOWN_PARTICIPANT`].
    pub fn participant_name(&self, id: &ParticipantId) -> &str {
        self.participant(id)
            .map(|p| p.name.as_str())
            .unwrap_or(UNKNOWN_PARTICIPANT)
    }

    /// Net balance of every participant, in roster order.
    pub fn balances(&self) -> Vec<Balance> {
        compute_balances(&self.participants, &self.expenses)
    }

    /// Transfers that settle the current balances.
    pub fn settlements(&self) -> Vec<Settlement> {
        plan_settlements(&self.balances())
    }

    pub fn summary(&self) -> TripSummary {
        let total_spent: Amount = self.expenses.iter().map(|e| e.amount).sum();
        let per_person = total_spent.divide(self.participants.len());
        TripSummary {
            total_spent,
            per_person,
            expense_count: self.expenses.len(),
        }
    }
}

/// Private API
impl Ledger {
    /// Small helper to log `add_expense` results
    fn log_result(expense: &Expense, result: &Result<(), ExpenseError>) {
        match result {
            Ok(()) => {
                info!(
                    expense = %expense.id,
                    paid_by = %expense.paid_by,
                    amount = %expense.amount,
                    "expense applied"
                );
            }
            Err(e) => {
                info!(
                    expense = %expense.id,
                    amount = %expense.amount,
                    reason = %e,
                    "expense skipped"
                );
            }
        }
    }

    /// Check an expense against the roster and the expenses already admitted:
    /// - Amount is positive and at most [`Amount::MAX`]
    /// - Split set is non-empty, without repeats
    /// - Payer and split members are in the roster
    /// - Expense id is unique
    fn validate(&self, expense: &Expense) -> Result<(), ExpenseError> {
        let id = &expense.id;

        if !expense.amount.is_positive() {
            return Err(ExpenseError::NonPositiveAmount(id.clone(), expense.amount));
        }

        if expense.amount > Amount::MAX {
            return Err(ExpenseError::AmountTooLarge(id.clone(), expense.amount));
        }

        if expense.split_between.is_empty() {
            return Err(ExpenseError::EmptySplit(id.clone()));
        }

        if self.participant(&expense.paid_by).is_none() {
            return Err(ExpenseError::UnknownPayer(
                id.clone(),
                expense.paid_by.clone(),
            ));
        }

        let mut members = HashSet::with_capacity(expense.split_between.len());
        for member in &expense.split_between {
            if self.participant(member).is_none() {
                return Err(ExpenseError::UnknownSplitMember(id.clone(), member.clone()));
            }
            if !members.insert(member) {
                return Err(ExpenseError::DuplicateSplitMember(
                    id.clone(),
                    member.clone(),
                ));
            }
        }

        if self.expenses.iter().any(|e| &e.id == id) {
            return Err(ExpenseError::DuplicateExpenseId(id.clone()));
        }

        Ok(())
    }
}

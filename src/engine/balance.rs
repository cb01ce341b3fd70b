//! Net balances from a ledger of equally split expenses.

use std::collections::HashMap;

use tracing::debug;

use super::state::Tally;
use crate::Amount;
use crate::model::{Balance, Expense, Participant, ParticipantId};

/// Compute one balance per participant, in roster order.
///
/// Each expense credits its full amount to the payer and charges an equal
/// share to every member of its split set. Shares keep the internal
/// precision of [`Amount`], so the gross figures conserve money exactly;
/// only the reported values are rounded to the minor unit.
///
/// Inputs are trusted: ids missing from the roster are skipped, and an
/// expense with an empty split set charges nobody.
pub fn compute_balances(participants: &[Participant], expenses: &[Expense]) -> Vec<Balance> {
    participants
        .iter()
        .zip(tally(participants, expenses))
        .map(|(p, tally)| tally.into_balance(p.id.clone()))
        .collect()
}

/// Unrounded paid/owed totals per participant, in roster order.
pub(crate) fn tally(participants: &[Participant], expenses: &[Expense]) -> Vec<Tally> {
    let mut tallies: HashMap<&ParticipantId, Tally> = participants
        .iter()
        .map(|p| (&p.id, Tally::default()))
        .collect();

    for expense in expenses {
        match tallies.get_mut(&expense.paid_by) {
            Some(tally) => tally.credit(expense.amount),
            None => debug!(expense = %expense.id, payer = %expense.paid_by, "payer not in roster"),
        }

        // leftover units of an uneven split go by id, not by listing order
        let mut members: Vec<&ParticipantId> = expense.split_between.iter().collect();
        members.sort();

        let shares = expense.amount.split(members.len());
        for (member, share) in members.into_iter().zip(shares) {
            match tallies.get_mut(member) {
                Some(tally) => tally.charge(share),
                None => debug!(expense = %expense.id, member = %member, "split member not in roster"),
            }
        }
    }

    participants
        .iter()
        .map(|p| tallies.get(&p.id).copied().unwrap_or_default())
        .collect()
}

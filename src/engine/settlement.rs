//! Greedy settlement planning.

use tracing::debug;

use crate::Amount;
use crate::model::{Balance, ParticipantId, Settlement};

/// Magnitude up to which a balance or transfer counts as settled.
///
/// A balance must exceed it to take part in the plan, and so must every
/// emitted transfer.
pub const TOLERANCE: Amount = Amount::CENT;

/// Plan transfers that bring every balance to zero.
///
/// Creditors and debtors are each sorted largest first (stable), then walked
/// with one cursor per side: every step moves the smaller of the two open
/// positions from the current debtor to the current creditor. A side's cursor
/// advances once its remainder falls below [`TOLERANCE`]. Balances and
/// transfers of at most [`TOLERANCE`] are dropped, so the plan never has more
/// than `participants - 1` transfers.
///
/// Not globally minimal; exact minimum-transfer netting is NP-hard.
pub fn plan_settlements(balances: &[Balance]) -> Vec<Settlement> {
    let mut creditors: Vec<(&ParticipantId, Amount)> = balances
        .iter()
        .filter(|b| b.net_balance > TOLERANCE)
        .map(|b| (&b.participant_id, b.net_balance))
        .collect();
    let mut debtors: Vec<(&ParticipantId, Amount)> = balances
        .iter()
        .filter(|b| b.net_balance < -TOLERANCE)
        .map(|b| (&b.participant_id, b.net_balance.abs()))
        .collect();

    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let mut settlements = Vec::with_capacity(creditors.len() + debtors.len());
    let (mut i, mut j) = (0, 0);

    while i < creditors.len() && j < debtors.len() {
        let (creditor, credit) = creditors[i];
        let (debtor, debt) = debtors[j];
        let amount = credit.min(debt);

        if amount > TOLERANCE {
            debug!(from = %debtor, to = %creditor, amount = %amount, "transfer planned");
            settlements.push(Settlement {
                from: debtor.clone(),
                to: creditor.clone(),
                amount: amount.round_to_cents(),
            });
        }

        creditors[i].1 -= amount;
        debtors[j].1 -= amount;

        if creditors[i].1 < TOLERANCE {
            i += 1;
        }
        if debtors[j].1 < TOLERANCE {
            j += 1;
        }
    }

    let dust: Amount = creditors[i..].iter().map(|(_, r)| *r).sum::<Amount>()
        - debtors[j..].iter().map(|(_, r)| *r).sum::<Amount>();
    if !dust.is_zero() {
        debug!(dust = ?dust, "unsettled remainder discarded");
    }

    settlements
}

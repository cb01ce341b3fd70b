//! JSON export of a settled trip.

use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::engine::Ledger;
use crate::{Balance, Expense, Participant, Settlement, TripSummary};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize export: {0}")]
    Json(#[from] serde_json::Error),
}

/// Snapshot of a ledger together with its computed figures.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripExport<'a> {
    pub people: &'a [Participant],
    pub expenses: &'a [Expense],
    pub balances: Vec<Balance>,
    pub settlements: Vec<Settlement>,
    pub summary: TripSummary,
    pub export_date: DateTime<Utc>,
}

impl<'a> TripExport<'a> {
    pub fn new(ledger: &'a Ledger, export_date: DateTime<Utc>) -> Self {
        let balances = ledger.balances();
        let settlements = crate::engine::plan_settlements(&balances);
        Self {
            people: ledger.participants(),
            expenses: ledger.expenses(),
            balances,
            settlements,
            summary: ledger.summary(),
            export_date,
        }
    }

    /// Write as pretty-printed JSON
    pub fn write(&self, out: impl io::Write) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(out, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amount, ParticipantId};
    use chrono::TimeZone;

    #[test]
    fn export_contains_computed_figures() {
        let mut ledger = Ledger::new(vec![
            Participant::new("a", "Monika", "#FF6B6B"),
            Participant::new("b", "Filip", "#FFA07A"),
        ])
        .unwrap();
        ledger
            .add_expense(Expense {
                id: "e1".to_string(),
                description: "Shinkansen".to_string(),
                amount: Amount::from_cents(2_000_000),
                paid_by: ParticipantId::from("a"),
                split_between: vec![ParticipantId::from("a"), ParticipantId::from("b")],
                date: Utc.with_ymd_and_hms(2025, 4, 3, 8, 0, 0).unwrap(),
                category: Some("Transport".to_string()),
            })
            .unwrap();

        let export_date = Utc.with_ymd_and_hms(2025, 4, 10, 0, 0, 0).unwrap();
        let mut out = Vec::new();
        TripExport::new(&ledger, export_date).write(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["people"].as_array().unwrap().len(), 2);
        assert_eq!(value["expenses"][0]["paidBy"], "a");
        assert_eq!(value["balances"][1]["personId"], "b");
        assert_eq!(value["balances"][1]["balance"], -10000.0);
        assert_eq!(value["settlements"][0]["from"], "b");
        assert_eq!(value["settlements"][0]["to"], "a");
        assert_eq!(value["settlements"][0]["amount"], 10000.0);
        assert_eq!(value["summary"]["expenseCount"], 1);
        assert_eq!(value["exportDate"], "2025-04-10T00:00:00Z");
    }
}

//! Core domain types for the settlement engine.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Amount;

/// Opaque participant identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A member of the trip roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Display color, e.g. `#FF6B6B`.
    pub color: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(id),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// An expense paid by one participant and shared equally by `split_between`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: Amount,
    pub paid_by: ParticipantId,
    pub split_between: Vec<ParticipantId>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Net position of one participant.
///
/// `net_balance = total_paid - total_owed`; positive means the participant
/// is owed money, negative means they owe money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(rename = "personId")]
    pub participant_id: ParticipantId,
    #[serde(rename = "balance")]
    pub net_balance: Amount,
    #[serde(rename = "totalPaid")]
    pub total_paid: Amount,
    #[serde(rename = "totalOwed")]
    pub total_owed: Amount,
}

impl Balance {
    /// A balance carrying only a net figure.
    pub fn net(participant_id: ParticipantId, net_balance: Amount) -> Self {
        Self {
            participant_id,
            net_balance,
            total_paid: Amount::ZERO,
            total_owed: Amount::ZERO,
        }
    }
}

/// A single transfer of a settlement plan: `from` pays `amount` to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Amount,
}

/// Headline figures of a trip ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub total_spent: Amount,
    /// Total spend divided by the roster size.
    pub per_person: Amount,
    pub expense_count: usize,
}

pub mod amount;
pub mod config;
pub mod csv;
pub mod engine;
pub mod export;
pub mod model;

pub use amount::Amount;
pub use engine::{Ledger, compute_balances, plan_settlements};
pub use model::{Balance, Expense, Participant, ParticipantId, Settlement, TripSummary};

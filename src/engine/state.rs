use crate::Amount;
use crate::model::{Balance, ParticipantId};

/// Running gross figures of one participant while a ledger is being folded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub paid: Amount,
    pub owed: Amount,
}

impl Tally {
    pub fn net(&self) -> Amount {
        self.paid - self.owed
    }

    pub fn credit(&mut self, amount: Amount) {
        self.paid += amount;
    }

    pub fn charge(&mut self, share: Amount) {
        self.owed += share;
    }

    /// Reported balance, every figure rounded to the minor unit.
    pub fn into_balance(self, participant_id: ParticipantId) -> Balance {
        Balance {
            participant_id,
            net_balance: self.net().round_to_cents(),
            total_paid: self.paid.round_to_cents(),
            total_owed: self.owed.round_to_cents(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_default() {
        let tally = Tally::default();
        assert_eq!(tally.paid, Amount::ZERO);
        assert_eq!(tally.owed, Amount::ZERO);
        assert_eq!(tally.net(), Amount::ZERO);
    }

    #[test]
    fn tally_net_is_paid_minus_owed() {
        let mut tally = Tally::default();
        tally.credit(Amount::from_cents(150_000));
        tally.charge(Amount::from_cents(100_000));
        tally.charge(Amount::from_cents(75_000));
        assert_eq!(tally.net(), Amount::from_cents(-25_000));
    }

    #[test]
    fn into_balance_rounds_reported_figures() {
        let tally = Tally {
            paid: Amount::from_scaled(100_050),
            owed: Amount::from_scaled(33_334),
        };
        let balance = tally.into_balance(ParticipantId::from("a"));
        assert_eq!(balance.total_paid, Amount::from_cents(1001));
        assert_eq!(balance.total_owed, Amount::from_cents(333));
        assert_eq!(balance.net_balance, Amount::from_cents(667));
    }
}

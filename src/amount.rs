use std::fmt;
use std::iter::Sum;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
///
/// Shares and running totals keep the full internal precision; figures are
/// rounded to the minor unit (cent) only when reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 10_000;
    /// Scaled value of one minor currency unit.
    const MINOR: i64 = 100;

    pub const ZERO: Amount = Amount(0);
    pub const CENT: Amount = Amount(Self::MINOR);
    /// Largest magnitude accepted from input, one billion currency units.
    ///
    /// Keeps sums over any realistic ledger far from `i64` overflow.
    pub const MAX: Amount = Amount(1_000_000_000 * Self::SCALE);

    /// Convert without range checks; out-of-range values saturate.
    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    /// Convert input, rejecting non-finite values and magnitudes above [`Amount::MAX`].
    pub fn try_from_float(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() > Self::MAX.as_f64() {
            return None;
        }
        Some(Self::from_float(value))
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    pub fn from_cents(cents: i64) -> Self {
        Amount(cents * Self::MINOR)
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    pub fn abs(self) -> Self {
        Amount(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Round to the minor unit, half away from zero.
    pub fn round_to_cents(self) -> Self {
        let rem = self.0 % Self::MINOR;
        let truncated = self.0 - rem;
        if rem.abs() * 2 >= Self::MINOR {
            Amount(truncated + Self::MINOR * self.0.signum())
        } else {
            Amount(truncated)
        }
    }

    /// Split into `parts` shares summing exactly to `self`.
    ///
    /// Shares differ by at most one unit of the internal scale; the leftover
    /// units go one each to the leading shares. Returns an empty vector for
    /// `parts == 0`.
    pub fn split(self, parts: usize) -> Vec<Amount> {
        if parts == 0 {
            return Vec::new();
        }
        let n = parts as i64;
        let base = self.0 / n;
        let leftover = self.0 % n;

        (0..n)
            .map(|idx| {
                if idx < leftover.abs() {
                    Amount(base + leftover.signum())
                } else {
                    Amount(base)
                }
            })
            .collect()
    }

    /// Exact quotient at the internal scale, rounded half away from zero.
    /// Returns zero for `parts == 0`.
    pub fn divide(self, parts: usize) -> Self {
        if parts == 0 {
            return Amount::ZERO;
        }
        let n = parts as i64;
        let quotient = self.0 / n;
        let rem = self.0 % n;
        if rem.abs() * 2 >= n {
            Amount(quotient + self.0.signum())
        } else {
            Amount(quotient)
        }
    }

    /// Multiply by a display-only rate, rounding to the internal scale.
    pub fn scaled_by(self, rate: f64) -> Self {
        Amount::from_float(self.as_f64() * rate)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.round_to_cents().0 / Self::MINOR;
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.abs();
        let whole = abs / 100;
        let frac = abs % 100;
        write!(f, "{sign}{whole}.{frac:02}")
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Amount::try_from_float(value).ok_or_else(|| {
            serde::de::Error::custom(format!("amount {value} is not finite or exceeds the maximum"))
        })
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_float_converts_correctly() {
        assert_eq!(Amount::from_float(100.0), Amount::from_scaled(1_000_000));
        assert_eq!(Amount::from_float(1.5), Amount::from_scaled(15_000));
        assert_eq!(Amount::from_float(0.0001), Amount::from_scaled(1));
        assert_eq!(Amount::from_float(-50.25), Amount::from_scaled(-502_500));
    }

    #[test]
    fn from_cents_matches_float() {
        assert_eq!(Amount::from_cents(1250), Amount::from_float(12.5));
        assert_eq!(Amount::CENT, Amount::from_float(0.01));
    }

    #[test]
    fn round_to_cents_half_away_from_zero() {
        assert_eq!(
            Amount::from_float(1.005).round_to_cents(),
            Amount::from_cents(101)
        );
        assert_eq!(
            Amount::from_float(1.0049).round_to_cents(),
            Amount::from_cents(100)
        );
        assert_eq!(
            Amount::from_float(-1.005).round_to_cents(),
            Amount::from_cents(-101)
        );
        assert_eq!(
            Amount::from_float(-0.004).round_to_cents(),
            Amount::ZERO
        );
    }

    #[test]
    fn split_even() {
        let shares = Amount::from_cents(300_000).split(3);
        assert_eq!(shares, vec![Amount::from_cents(100_000); 3]);
    }

    #[test]
    fn split_spreads_remainder_at_internal_scale() {
        let shares = Amount::from_cents(10_000).split(3);
        assert_eq!(
            shares,
            vec![
                Amount::from_scaled(333_334),
                Amount::from_scaled(333_333),
                Amount::from_scaled(333_333),
            ]
        );
        let total: Amount = shares.iter().sum();
        assert_eq!(total, Amount::from_cents(10_000));
        assert!(shares.iter().all(|s| s.round_to_cents() == Amount::from_cents(3333)));
    }

    #[test]
    fn split_smaller_than_parts() {
        let shares = Amount::from_cents(2).split(3);
        assert_eq!(
            shares,
            vec![
                Amount::from_scaled(67),
                Amount::from_scaled(67),
                Amount::from_scaled(66),
            ]
        );
    }

    #[test]
    fn split_negative_amount() {
        let shares = Amount::from_scaled(-10).split(4);
        assert_eq!(
            shares,
            vec![
                Amount::from_scaled(-3),
                Amount::from_scaled(-3),
                Amount::from_scaled(-2),
                Amount::from_scaled(-2),
            ]
        );
    }

    #[test]
    fn split_into_zero_parts_is_empty() {
        assert!(Amount::from_cents(100).split(0).is_empty());
    }

    #[test]
    fn divide_is_exact_quotient() {
        assert_eq!(
            Amount::from_cents(310_000).divide(3),
            Amount::from_scaled(10_333_333)
        );
        assert_eq!(Amount::from_scaled(20).divide(3), Amount::from_scaled(7));
        assert_eq!(Amount::from_scaled(-20).divide(3), Amount::from_scaled(-7));
        assert_eq!(Amount::from_cents(100).divide(0), Amount::ZERO);
    }

    #[test]
    fn try_from_float_rejects_out_of_range() {
        assert_eq!(Amount::try_from_float(12.5), Some(Amount::from_cents(1250)));
        assert_eq!(Amount::try_from_float(1e9), Some(Amount::MAX));
        assert_eq!(Amount::try_from_float(1e15), None);
        assert_eq!(Amount::try_from_float(-1e15), None);
        assert_eq!(Amount::try_from_float(f64::NAN), None);
        assert_eq!(Amount::try_from_float(f64::INFINITY), None);
    }

    #[test]
    fn deserialize_rejects_huge_amount() {
        assert!(serde_json::from_str::<Amount>("1e15").is_err());
    }

    #[test]
    fn display_formats_at_minor_unit() {
        assert_eq!(Amount::from_cents(125_000).to_string(), "1250.00");
        assert_eq!(Amount::from_float(1.5).to_string(), "1.50");
        assert_eq!(Amount::from_float(-0.333).to_string(), "-0.33");
        assert_eq!(Amount::from_float(0.004).to_string(), "0.00");
        assert_eq!(Amount::default().to_string(), "0.00");
    }

    #[test]
    fn serde_as_number() {
        let json = serde_json::to_string(&Amount::from_cents(1050)).unwrap();
        assert_eq!(json, "10.5");
        let back: Amount = serde_json::from_str("33.3333").unwrap();
        assert_eq!(back, Amount::from_scaled(333_333));
    }

    #[test]
    fn arithmetic() {
        let mut a = Amount::from_scaled(100);
        a += Amount::from_scaled(50);
        assert_eq!(a, Amount::from_scaled(150));
        a -= Amount::from_scaled(30);
        assert_eq!(a, Amount::from_scaled(120));
        assert_eq!(a - Amount::from_scaled(200), Amount::from_scaled(-80));
        assert_eq!(-a, Amount::from_scaled(-120));
    }

    #[test]
    fn scaled_by_rate() {
        assert_eq!(
            Amount::from_cents(1000).scaled_by(38.46),
            Amount::from_float(384.6)
        );
    }

    #[test]
    fn negative_ordering() {
        let negative = Amount::from_scaled(-100);
        let zero = Amount::ZERO;
        let positive = Amount::from_scaled(100);
        assert!(negative < zero);
        assert!(zero < positive);
        assert_eq!(negative.abs(), positive);
    }
}

//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{
    prelude::{FromPrimitive as _, ToPrimitive as _},
    Decimal, RoundingStrategy,
};
use strum::{Display, EnumString};

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Number of decimal places [`Money`] is presented with.
    pub const PRESENTATION_SCALE: u32 = 2;

    /// Creates a new [`Money`] of the provided `amount` in `currency`.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Converts the provided floating-point `amount` into [`Money`] rounded
    /// for presentation (see [`Money::rounded()`]).
    ///
    /// Returns [`None`] if the `amount` is not finite.
    #[must_use]
    pub fn from_f64(amount: f64, currency: Currency) -> Option<Self> {
        Decimal::from_f64(amount).map(|amount| Self { amount, currency }.rounded())
    }

    /// Rounds this [`Money`] to [`Money::PRESENTATION_SCALE`] decimal places,
    /// with midpoints rounded away from zero.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(
                Self::PRESENTATION_SCALE,
                RoundingStrategy::MidpointAwayFromZero,
            ),
            currency: self.currency,
        }
    }

    /// Rounds this [`Money`] to a whole amount, with midpoints rounded away
    /// from zero.
    #[must_use]
    pub fn whole(self) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            currency: self.currency,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        match amount.is_integer().then(|| amount.to_i128()).flatten() {
            Some(whole) => write!(f, "{whole}{currency}"),
            None => write!(f, "{}{currency}", amount.normalize()),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

/// Currency of a [`Money`] amount.
#[derive(
    Clone, Copy, Debug, Default, Display, EnumString, Eq, Hash, PartialEq,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar.
    #[default]
    Usd,

    /// Euro.
    Eur,

    /// Indian Rupee.
    Inr,
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money::new(decimal("123.45"), Currency::Usd),
        );
        assert_eq!(
            Money::from_str("2528.27INR").unwrap(),
            Money::new(decimal("2528.27"), Currency::Inr),
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.45Usdollar").is_err());

        assert!(Money::from_str("123.00USD").is_ok());
        assert!(Money::from_str("123USD").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(
            Money::new(decimal("123.45"), Currency::Eur).to_string(),
            "123.45EUR",
        );
        assert_eq!(
            Money::new(decimal("123.00"), Currency::Usd).to_string(),
            "123USD",
        );
        assert_eq!(
            Money::new(decimal("123.50"), Currency::Usd).to_string(),
            "123.5USD",
        );
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(
            Money::new(decimal("10.125"), Currency::Usd).rounded().amount,
            decimal("10.13"),
        );
        assert_eq!(
            Money::new(decimal("10.124"), Currency::Usd).rounded().amount,
            decimal("10.12"),
        );
        assert_eq!(
            Money::new(decimal("849.5"), Currency::Usd).whole().amount,
            decimal("850"),
        );
    }

    #[test]
    fn from_f64_rejects_non_finite() {
        assert!(Money::from_f64(f64::NAN, Currency::Usd).is_none());
        assert!(Money::from_f64(f64::INFINITY, Currency::Usd).is_none());
        assert_eq!(
            Money::from_f64(2528.2742, Currency::Usd).unwrap().amount,
            decimal("2528.27"),
        );
    }
}

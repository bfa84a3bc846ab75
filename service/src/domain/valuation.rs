//! Heuristic [`Property`] valuation offered to sellers.
//!
//! [`Property`]: crate::domain::Property

use common::{define_kind, money::Currency, Money};
use derive_more::{Display, Error};
use rust_decimal::Decimal;
use smart_default::SmartDefault;

use crate::domain::property::{self, Area, Bathrooms, Bedrooms, YearBuilt};

/// Valuation configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Config {
    /// Year the age of a property is counted to.
    #[default(2024)]
    pub reference_year: YearBuilt,
}

/// Description of a property to estimate.
#[derive(Clone, Debug, Default)]
pub struct Input {
    /// [`property::Kind`] of the property, if known.
    pub kind: Option<property::Kind>,

    /// [`Area`] of the property, if known.
    pub area: Option<Area>,

    /// Number of bedrooms, if known.
    pub bedrooms: Option<Bedrooms>,

    /// Number of bathrooms, if known.
    pub bathrooms: Option<Bathrooms>,

    /// Year the property was built in, if known.
    pub year_built: Option<YearBuilt>,

    /// [`Condition`] of the property, if known.
    pub condition: Option<Condition>,

    /// Renovations done in the property (e.g. `New Roof`).
    pub renovations: Vec<String>,
}

define_kind! {
    #[doc = "Condition of a property."]
    enum Condition {
        #[doc = "Excellent condition."]
        Excellent = 1,

        #[doc = "Good condition."]
        Good = 2,

        #[doc = "Fair condition."]
        Fair = 3,

        #[doc = "Poor condition."]
        Poor = 4,
    }
}

impl Condition {
    /// Returns the price multiplier of this [`Condition`].
    #[must_use]
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::Excellent => Decimal::new(12, 1),
            Self::Good => Decimal::new(11, 1),
            Self::Fair => Decimal::ONE,
            Self::Poor => Decimal::new(85, 2),
        }
    }
}

/// Returns the price multiplier of the provided [`property::Kind`].
fn kind_multiplier(kind: property::Kind) -> Decimal {
    use property::Kind as K;

    match kind {
        K::House => Decimal::ONE,
        K::Condo => Decimal::new(85, 2),
        K::Townhouse => Decimal::new(95, 2),
        K::Apartment => Decimal::new(8, 1),
    }
}

/// Base value every estimate starts from.
const BASE_VALUE: Decimal = Decimal::from_parts(200_000, 0, 0, false, 0);

/// Value of a square foot.
const PER_SQUARE_FOOT: Decimal = Decimal::from_parts(150, 0, 0, false, 0);

/// Value of a bedroom.
const PER_BEDROOM: Decimal = Decimal::from_parts(25_000, 0, 0, false, 0);

/// Value of a bathroom.
const PER_BATHROOM: Decimal = Decimal::from_parts(15_000, 0, 0, false, 0);

/// Depreciation per year of age.
const PER_YEAR_OF_AGE: Decimal = Decimal::ONE_THOUSAND;

/// Value of a single renovation.
const PER_RENOVATION: Decimal = Decimal::from_parts(15_000, 0, 0, false, 0);

/// Estimated market value of a described property.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Valuation {
    /// Most likely value, rounded to a whole amount.
    pub estimate: Money,

    /// Lower end of the market range, [`RANGE_SPREAD`] below the estimate.
    pub low: Money,

    /// Upper end of the market range, [`RANGE_SPREAD`] above the estimate.
    pub high: Money,

    /// Estimate divided by the area, if the area is known and non-zero.
    pub per_square_foot: Option<Money>,
}

/// Relative spread of the market range around an estimate (10%).
pub const RANGE_SPREAD: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Error of a property too large to be estimated.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("property characteristics are too large to be estimated")]
pub struct OverflowError;

/// Estimates the market value of the described property in the provided
/// [`Currency`].
///
/// The estimate is rounded to a whole amount. Unknown characteristics don't
/// affect it.
///
/// # Errors
///
/// If the characteristics are too large for the estimate to be represented.
pub fn estimate(
    input: &Input,
    config: &Config,
    currency: Currency,
) -> Result<Valuation, OverflowError> {
    let Input {
        kind,
        area,
        bedrooms,
        bathrooms,
        year_built,
        condition,
        renovations,
    } = input;

    let mut value = BASE_VALUE;
    if let Some(area) = area {
        value = add_product(value, Decimal::from(*area), PER_SQUARE_FOOT)?;
    }
    if let Some(bedrooms) = bedrooms {
        value = add_product(value, Decimal::from(*bedrooms), PER_BEDROOM)?;
    }
    if let Some(bathrooms) = bathrooms {
        value = add_product(value, *bathrooms, PER_BATHROOM)?;
    }
    if let Some(year_built) = year_built {
        let age = i32::from(config.reference_year) - i32::from(*year_built);
        value = add_product(value, -Decimal::from(age), PER_YEAR_OF_AGE)?;
    }
    value = value
        .checked_mul(condition.map_or(Decimal::ONE, Condition::multiplier))
        .ok_or(OverflowError)?;
    value = add_product(value, Decimal::from(renovations.len()), PER_RENOVATION)?;
    value = value
        .checked_mul(kind.map_or(Decimal::ONE, kind_multiplier))
        .ok_or(OverflowError)?;

    let estimate = Money::new(value, currency).whole();
    let spread = |factor: Decimal| {
        estimate
            .amount
            .checked_mul(factor)
            .map(|a| Money::new(a, currency).whole())
            .ok_or(OverflowError)
    };
    Ok(Valuation {
        estimate,
        low: spread(Decimal::ONE - RANGE_SPREAD)?,
        high: spread(Decimal::ONE + RANGE_SPREAD)?,
        per_square_foot: area
            .filter(|a| *a > 0)
            .and_then(|a| estimate.amount.checked_div(Decimal::from(a)))
            .map(|a| Money::new(a, currency).whole()),
    })
}

/// Adds `count` times `unit` to the provided `value`.
fn add_product(
    value: Decimal,
    count: Decimal,
    unit: Decimal,
) -> Result<Decimal, OverflowError> {
    count
        .checked_mul(unit)
        .and_then(|v| value.checked_add(v))
        .ok_or(OverflowError)
}

#[cfg(test)]
mod spec {
    use common::money::Currency;
    use rust_decimal::Decimal;

    use super::{estimate, Condition, Config, Input, OverflowError};
    use crate::domain::property;

    #[test]
    fn unknown_property_is_worth_base_value() {
        let valuation =
            estimate(&Input::default(), &Config::default(), Currency::Usd)
                .unwrap();
        assert_eq!(valuation.estimate.amount, Decimal::from(200_000));
        assert_eq!(valuation.per_square_foot, None);
    }

    #[test]
    fn applies_every_factor() {
        let input = Input {
            kind: Some(property::Kind::Condo),
            area: Some(1000),
            bedrooms: Some(2),
            bathrooms: Some(Decimal::new(15, 1)),
            year_built: Some(2014),
            condition: Some(Condition::Good),
            renovations: vec!["New Roof".into(), "Fresh Paint".into()],
        };

        // ((200000 + 150000 + 50000 + 22500 - 10000) * 1.1 + 30000) * 0.85
        let valuation =
            estimate(&input, &Config::default(), Currency::Usd).unwrap();
        assert_eq!(valuation.estimate.amount, Decimal::from(411_188));
    }

    #[test]
    fn counts_age_from_reference_year() {
        let input = Input {
            year_built: Some(2000),
            ..Input::default()
        };

        let config = Config { reference_year: 2010 };
        assert_eq!(
            estimate(&input, &config, Currency::Usd).unwrap().estimate.amount,
            Decimal::from(190_000),
        );

        // Newer than the reference year appreciates.
        let config = Config { reference_year: 1990 };
        assert_eq!(
            estimate(&input, &config, Currency::Usd).unwrap().estimate.amount,
            Decimal::from(210_000),
        );
    }

    #[test]
    fn derives_market_range_and_price_per_square_foot() {
        let input = Input {
            area: Some(1500),
            ..Input::default()
        };

        // 200000 + 1500 * 150
        let valuation =
            estimate(&input, &Config::default(), Currency::Usd).unwrap();
        assert_eq!(valuation.estimate.amount, Decimal::from(425_000));
        assert_eq!(valuation.low.amount, Decimal::from(382_500));
        assert_eq!(valuation.high.amount, Decimal::from(467_500));
        // 425000 / 1500 = 283.33
        assert_eq!(
            valuation.per_square_foot.map(|m| m.amount),
            Some(Decimal::from(283)),
        );

        let zero_area = Input {
            area: Some(0),
            ..Input::default()
        };
        let valuation =
            estimate(&zero_area, &Config::default(), Currency::Usd).unwrap();
        assert_eq!(valuation.per_square_foot, None);
    }

    #[test]
    fn reports_unrepresentable_estimates() {
        let input = Input {
            bathrooms: Some(Decimal::MAX),
            ..Input::default()
        };
        assert_eq!(
            estimate(&input, &Config::default(), Currency::Usd),
            Err(OverflowError),
        );
    }

    #[test]
    fn parses_conditions() {
        assert_eq!("poor".parse::<Condition>().unwrap(), Condition::Poor);
        assert!("broken".parse::<Condition>().is_err());
    }
}

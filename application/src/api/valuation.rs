//! Property valuation definitions.

use common::Money;
use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use service::domain::valuation;

use crate::{
    api::{property, scalar},
    define_error, AsError, Error,
};

/// Maximal number of bathrooms of an estimated property, same as the
/// maximal number of bedrooms.
const MAX_BATHROOMS: rust_decimal::Decimal =
    rust_decimal::Decimal::from_parts(255, 0, 0, false, 0);

/// Description of a property to estimate the market value of.
///
/// Omitted characteristics don't affect the estimate.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "ValuationInput")]
pub struct Input {
    /// Kind of the property.
    #[graphql(name = "propertyType")]
    pub kind: Option<property::Kind>,

    /// Area in square feet.
    pub area: Option<i32>,

    /// Number of bedrooms.
    pub bedrooms: Option<i32>,

    /// Number of bathrooms.
    pub bathrooms: Option<scalar::Decimal>,

    /// Year the property was built in.
    pub year_built: Option<i32>,

    /// Condition of the property.
    pub condition: Option<Condition>,

    /// Renovations done in the property (e.g. `New Roof`).
    pub renovations: Option<Vec<String>>,
}

impl TryFrom<Input> for valuation::Input {
    type Error = Error;

    fn try_from(input: Input) -> Result<Self, Self::Error> {
        let Input {
            kind,
            area,
            bedrooms,
            bathrooms,
            year_built,
            condition,
            renovations,
        } = input;

        let bathrooms = bathrooms.map(rust_decimal::Decimal::from);
        if bathrooms
            .is_some_and(|b| b.is_sign_negative() || b > MAX_BATHROOMS)
        {
            return Err(ValuationError::InvalidInput.into());
        }

        Ok(Self {
            kind: kind.map(Into::into),
            area: non_negative(area)?,
            bedrooms: non_negative(bedrooms)?,
            bathrooms,
            year_built: non_negative(year_built)?,
            condition: condition.map(Into::into),
            renovations: renovations
                .unwrap_or_default()
                .into_iter()
                .filter(|r| !r.trim().is_empty())
                .collect(),
        })
    }
}

/// Estimated market value of a property.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "Valuation")]
pub struct Valuation {
    /// Most likely value.
    pub estimate: Money,

    /// Lower end of the market range.
    pub low: Money,

    /// Upper end of the market range.
    pub high: Money,

    /// Value of a square foot, if the area is known.
    pub price_per_square_foot: Option<Money>,
}

impl From<valuation::Valuation> for Valuation {
    fn from(valuation: valuation::Valuation) -> Self {
        let valuation::Valuation {
            estimate,
            low,
            high,
            per_square_foot,
        } = valuation;

        Self {
            estimate,
            low,
            high,
            price_per_square_foot: per_square_foot,
        }
    }
}

impl AsError for valuation::OverflowError {
    fn try_as_error(&self) -> Option<Error> {
        Some(ValuationError::InvalidInput.into())
    }
}

/// Converts the provided optional GraphQL integer into a domain one.
fn non_negative<T: TryFrom<i32>>(value: Option<i32>) -> Result<Option<T>, Error> {
    value
        .map(T::try_from)
        .transpose()
        .map_err(|_| ValuationError::InvalidInput.into())
}

/// Condition of a property.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "PropertyCondition")]
pub enum Condition {
    /// Excellent condition.
    Excellent,

    /// Good condition.
    Good,

    /// Fair condition.
    Fair,

    /// Poor condition.
    Poor,
}

impl From<Condition> for valuation::Condition {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Excellent => Self::Excellent,
            Condition::Good => Self::Good,
            Condition::Fair => Self::Fair,
            Condition::Poor => Self::Poor,
        }
    }
}

define_error! {
    enum ValuationError {
        #[code = "INVALID_VALUATION_INPUT"]
        #[status = BAD_REQUEST]
        #[message = "Property characteristics must be non-negative and within range"]
        InvalidInput,
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;
    use service::domain::valuation;

    use super::Input;
    use crate::api::scalar;

    fn bathrooms(value: Decimal) -> Input {
        Input {
            bathrooms: Some(scalar::Decimal::from(value)),
            ..Input::default()
        }
    }

    #[test]
    fn bounds_bathrooms() {
        let convert = |value| valuation::Input::try_from(bathrooms(value));

        assert!(convert(Decimal::new(25, 1)).is_ok());
        assert!(convert(Decimal::from(255)).is_ok());
        assert!(convert(Decimal::NEGATIVE_ONE).is_err());

        let err = convert(Decimal::MAX).unwrap_err();
        assert_eq!(err.code, "INVALID_VALUATION_INPUT");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn rejects_negative_integers() {
        let input = Input {
            area: Some(-1),
            ..Input::default()
        };
        assert!(valuation::Input::try_from(input).is_err());
    }
}

//! [`Query`] for estimating a property value.

use tracerr::Traced;

use crate::{
    domain::valuation::{self, OverflowError, Valuation},
    Service,
};

use super::Query;

/// [`Query`] estimating the market value of a described property.
#[derive(Clone, Debug, Default)]
pub struct Estimate(pub valuation::Input);

impl<C> Query<Estimate> for Service<C> {
    type Ok = Valuation;
    type Err = Traced<OverflowError>;

    async fn execute(
        &self,
        Estimate(input): Estimate,
    ) -> Result<Self::Ok, Self::Err> {
        let config = self.config();
        valuation::estimate(&input, &config.valuation, config.currency)
            .map_err(tracerr::from_and_wrap!(=> OverflowError))
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Estimate;
    use crate::{
        domain::{property, valuation},
        Config, Query as _, Service,
    };

    #[tokio::test]
    async fn estimates_with_configured_reference_year() {
        let svc = Service::new(
            Config {
                valuation: valuation::Config {
                    reference_year: 2030,
                },
                ..Config::default()
            },
            (),
        );

        let valuation = svc
            .execute(Estimate(valuation::Input {
                kind: Some(property::Kind::House),
                area: Some(2000),
                year_built: Some(2020),
                ..valuation::Input::default()
            }))
            .await
            .unwrap();

        // 200000 + 300000 - 10000
        assert_eq!(valuation.estimate.amount, Decimal::from(490_000));
        assert_eq!(
            valuation.per_square_foot.map(|m| m.amount),
            Some(Decimal::from(245)),
        );
    }

    #[tokio::test]
    async fn reports_overflowing_estimates() {
        let svc = Service::new(Config::default(), ());

        let err = svc
            .execute(Estimate(valuation::Input {
                bathrooms: Some(Decimal::MAX),
                ..valuation::Input::default()
            }))
            .await
            .unwrap_err();
        assert_eq!(*err.as_ref(), valuation::OverflowError);
    }
}

//! [`Query`] for calculating a mortgage.

use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::mortgage::{self, Summary},
    Service,
};

use super::Query;

/// [`Query`] calculating a fixed-rate mortgage [`Summary`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calculate(pub mortgage::Input);

impl<C> Query<Calculate> for Service<C> {
    type Ok = Summary;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Calculate(input): Calculate,
    ) -> Result<Self::Ok, Self::Err> {
        mortgage::amortize(input)
            .map_err(tracerr::from_and_wrap!(=> ExecutionError))?
            .summary(self.config().currency)
            .ok_or_else(|| tracerr::new!(ExecutionError::NotRepresentable))
    }
}

/// Error of [`Calculate`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Provided [`mortgage::Input`] is invalid.
    #[display("{_0}")]
    Invalid(mortgage::ValidationError),

    /// Calculated amounts cannot be represented as money.
    #[display("Mortgage amounts are too large to be represented")]
    NotRepresentable,
}

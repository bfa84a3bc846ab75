//! Mortgage calculation definitions.

use common::Money;
use juniper::{GraphQLInputObject, GraphQLObject};
use service::{
    domain::mortgage::{self, Field},
    query,
};

use crate::{error::Violation, AsError, Error};

/// Parameters of a fixed-rate mortgage.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
#[graphql(name = "MortgageInput")]
pub struct Input {
    /// Price of the property being bought, at least `100000`.
    pub property_price: f64,

    /// Amount paid upfront, less than the property price.
    pub down_payment: f64,

    /// Annual interest rate in percent, between `1` and `30`.
    pub annual_interest_rate: f64,

    /// Loan term in years: `15`, `20` or `30`.
    pub loan_term_years: i32,
}

impl From<Input> for mortgage::Input {
    fn from(input: Input) -> Self {
        Self {
            property_price: input.property_price,
            down_payment: input.down_payment,
            annual_interest_rate: input.annual_interest_rate,
            // Out of range terms are unsupported anyway.
            loan_term_years: u16::try_from(input.loan_term_years)
                .unwrap_or_default(),
        }
    }
}

/// Amounts of an amortized mortgage, rounded to cents.
#[derive(Clone, Copy, Debug, GraphQLObject)]
#[graphql(name = "MortgageSummary")]
pub struct Summary {
    /// Borrowed amount.
    pub loan_amount: Money,

    /// Fixed monthly payment.
    pub monthly_payment: Money,

    /// Sum of all the monthly payments.
    pub total_payment: Money,

    /// Total interest paid over the loan term.
    pub total_interest: Money,
}

impl From<mortgage::Summary> for Summary {
    fn from(summary: mortgage::Summary) -> Self {
        let mortgage::Summary {
            loan_amount,
            monthly_payment,
            total_payment,
            total_interest,
        } = summary;

        Self {
            loan_amount,
            monthly_payment,
            total_payment,
            total_interest,
        }
    }
}

/// Returns the name of the GraphQL [`Input`] field.
const fn field_name(field: Field) -> &'static str {
    match field {
        Field::PropertyPrice => "propertyPrice",
        Field::DownPayment => "downPayment",
        Field::InterestRate => "annualInterestRate",
        Field::LoanTerm => "loanTermYears",
    }
}

impl AsError for query::mortgage::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use query::mortgage::ExecutionError as E;

        Some(match self {
            E::Invalid(err) => Error {
                code: "INVALID_MORTGAGE_INPUT",
                status_code: http::StatusCode::BAD_REQUEST,
                message: err.to_string(),
                violations: err
                    .violations()
                    .iter()
                    .map(|v| Violation {
                        field: field_name(v.field()),
                        message: v.to_string(),
                    })
                    .collect(),
                backtrace: None,
            },
            E::NotRepresentable => Error {
                code: "MORTGAGE_NOT_REPRESENTABLE",
                status_code: http::StatusCode::UNPROCESSABLE_ENTITY,
                message: self.to_string(),
                violations: Vec::new(),
                backtrace: None,
            },
        })
    }
}

#[cfg(test)]
mod spec {
    use service::{
        domain::mortgage::{self, Violation},
        query::mortgage::ExecutionError,
    };

    use super::Input;
    use crate::AsError as _;

    #[test]
    fn maps_unrepresentable_loan_terms_to_unsupported() {
        let input = mortgage::Input::from(Input {
            property_price: 400_000.0,
            down_payment: 0.0,
            annual_interest_rate: 6.5,
            loan_term_years: -30,
        });
        assert_eq!(input.loan_term_years, 0);

        let err = mortgage::amortize(input).unwrap_err();
        assert_eq!(err.violations(), [Violation::UnsupportedLoanTerm]);
    }

    #[test]
    fn reports_violated_fields() {
        let err = mortgage::amortize(mortgage::Input {
            property_price: 50_000.0,
            down_payment: 0.0,
            annual_interest_rate: 45.0,
            loan_term_years: 30,
        })
        .unwrap_err();

        let err = ExecutionError::Invalid(err).as_error();
        assert_eq!(err.code, "INVALID_MORTGAGE_INPUT");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
        let fields = err.violations.iter().map(|v| v.field).collect::<Vec<_>>();
        assert_eq!(fields, ["propertyPrice", "annualInterestRate"]);
    }
}

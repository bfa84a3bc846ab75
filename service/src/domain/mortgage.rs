//! Fixed-rate mortgage amortization.
//!
//! Computations are done in [`f64`] without any intermediate rounding.
//! Rounding happens only when an [`Amortization`] is presented as a
//! [`Summary`].

use std::fmt;

use common::{money::Currency, Money};
use derive_more::{Display, Error};

/// Minimal price of a mortgaged property.
pub const MIN_PROPERTY_PRICE: f64 = 100_000.0;

/// Minimal annual interest rate, in percent.
pub const MIN_INTEREST_RATE: f64 = 1.0;

/// Maximal annual interest rate, in percent.
pub const MAX_INTEREST_RATE: f64 = 30.0;

/// Loan parameters to amortize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Input {
    /// Price of the property being bought.
    pub property_price: f64,

    /// Amount paid upfront.
    pub down_payment: f64,

    /// Annual interest rate, in percent (e.g. `6.5`).
    pub annual_interest_rate: f64,

    /// Loan term in years, one of [`LoanTerm`]s.
    pub loan_term_years: u16,
}

/// Supported loan terms.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum LoanTerm {
    /// 15 years.
    #[display("15")]
    Fifteen = 15,

    /// 20 years.
    #[display("20")]
    Twenty = 20,

    /// 30 years.
    #[display("30")]
    Thirty = 30,
}

impl LoanTerm {
    /// Returns the number of years in this [`LoanTerm`].
    #[must_use]
    pub const fn years(self) -> u16 {
        self as u16
    }

    /// Returns the number of monthly payments in this [`LoanTerm`].
    #[must_use]
    pub const fn payments(self) -> u32 {
        self as u32 * 12
    }
}

impl TryFrom<u16> for LoanTerm {
    type Error = Violation;

    fn try_from(years: u16) -> Result<Self, Self::Error> {
        match years {
            15 => Ok(Self::Fifteen),
            20 => Ok(Self::Twenty),
            30 => Ok(Self::Thirty),
            _ => Err(Violation::UnsupportedLoanTerm),
        }
    }
}

/// Field of an [`Input`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Field {
    /// [`Input::property_price`].
    #[display("property price")]
    PropertyPrice,

    /// [`Input::down_payment`].
    #[display("down payment")]
    DownPayment,

    /// [`Input::annual_interest_rate`].
    #[display("interest rate")]
    InterestRate,

    /// [`Input::loan_term_years`].
    #[display("loan term")]
    LoanTerm,
}

/// Single violated constraint of an [`Input`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Violation {
    /// Property price is below [`MIN_PROPERTY_PRICE`].
    #[display("property price must be at least {}", MIN_PROPERTY_PRICE)]
    PropertyPriceTooLow,

    /// Down payment is negative.
    #[display("down payment cannot be negative")]
    NegativeDownPayment,

    /// Down payment covers the whole property price, so there is nothing to
    /// amortize.
    #[display("down payment must be less than the property price")]
    DownPaymentCoversPrice,

    /// Interest rate is outside
    /// [`MIN_INTEREST_RATE`]`..=`[`MAX_INTEREST_RATE`].
    #[display(
        "interest rate must be between {} and {}",
        MIN_INTEREST_RATE,
        MAX_INTEREST_RATE
    )]
    InterestRateOutOfRange,

    /// Loan term is not one of [`LoanTerm`]s.
    #[display("loan term must be 15, 20 or 30 years")]
    UnsupportedLoanTerm,

    /// Value of the [`Field`] is `NaN` or infinite.
    #[display("{_0} must be a finite number")]
    NotFinite(Field),
}

impl Violation {
    /// Returns the [`Field`] this [`Violation`] should be reported for.
    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            Self::PropertyPriceTooLow => Field::PropertyPrice,
            Self::NegativeDownPayment | Self::DownPaymentCoversPrice => {
                Field::DownPayment
            }
            Self::InterestRateOutOfRange => Field::InterestRate,
            Self::UnsupportedLoanTerm => Field::LoanTerm,
            Self::NotFinite(field) => field,
        }
    }
}

/// Error of an invalid [`Input`], listing every violated constraint.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub struct ValidationError {
    /// Violated constraints, in [`Field`] order.
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Returns all the [`Violation`]s of this [`ValidationError`].
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Checks whether the provided [`Field`] is violated.
    #[must_use]
    pub fn violates(&self, field: Field) -> bool {
        self.violations.iter().any(|v| v.field() == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid mortgage input: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Validated [`Input`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Loan {
    /// Price of the property.
    pub property_price: f64,

    /// Amount paid upfront.
    pub down_payment: f64,

    /// Annual interest rate, in percent.
    pub annual_interest_rate: f64,

    /// [`LoanTerm`] of this [`Loan`].
    pub term: LoanTerm,
}

impl Loan {
    /// Returns the borrowed amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.property_price - self.down_payment
    }

    /// Returns the monthly interest rate as a fraction (not in percent).
    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        self.annual_interest_rate / 12.0 / 100.0
    }
}

impl TryFrom<Input> for Loan {
    type Error = ValidationError;

    fn try_from(input: Input) -> Result<Self, Self::Error> {
        let Input {
            property_price,
            down_payment,
            annual_interest_rate,
            loan_term_years,
        } = input;

        let mut violations = Vec::new();

        if !property_price.is_finite() {
            violations.push(Violation::NotFinite(Field::PropertyPrice));
        } else if property_price < MIN_PROPERTY_PRICE {
            violations.push(Violation::PropertyPriceTooLow);
        }

        if !down_payment.is_finite() {
            violations.push(Violation::NotFinite(Field::DownPayment));
        } else if down_payment < 0.0 {
            violations.push(Violation::NegativeDownPayment);
        } else if property_price.is_finite() && down_payment >= property_price
        {
            violations.push(Violation::DownPaymentCoversPrice);
        }

        if !annual_interest_rate.is_finite() {
            violations.push(Violation::NotFinite(Field::InterestRate));
        } else if !(MIN_INTEREST_RATE..=MAX_INTEREST_RATE)
            .contains(&annual_interest_rate)
        {
            violations.push(Violation::InterestRateOutOfRange);
        }

        let term = LoanTerm::try_from(loan_term_years)
            .map_err(|v| violations.push(v))
            .ok();

        match term {
            Some(term) if violations.is_empty() => Ok(Self {
                property_price,
                down_payment,
                annual_interest_rate,
                term,
            }),
            Some(_) | None => Err(ValidationError { violations }),
        }
    }
}

/// Amortization schedule totals of a [`Loan`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Amortization {
    /// Borrowed amount.
    pub loan_amount: f64,

    /// Monthly interest rate as a fraction.
    pub monthly_rate: f64,

    /// Number of monthly payments.
    pub payments: u32,

    /// Equated monthly installment.
    pub monthly_payment: f64,

    /// Sum of all the monthly payments.
    pub total_payment: f64,

    /// Part of [`Amortization::total_payment`] going to interest.
    pub total_interest: f64,
}

impl Amortization {
    /// Presents this [`Amortization`] in the provided [`Currency`], rounded to
    /// cents.
    ///
    /// Returns [`None`] if any of the amounts is not finite.
    #[must_use]
    pub fn summary(&self, currency: Currency) -> Option<Summary> {
        Some(Summary {
            loan_amount: Money::from_f64(self.loan_amount, currency)?,
            monthly_payment: Money::from_f64(self.monthly_payment, currency)?,
            total_payment: Money::from_f64(self.total_payment, currency)?,
            total_interest: Money::from_f64(self.total_interest, currency)?,
        })
    }
}

/// Presentable [`Amortization`], rounded to cents.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Summary {
    /// Borrowed amount.
    pub loan_amount: Money,

    /// Equated monthly installment.
    pub monthly_payment: Money,

    /// Sum of all the monthly payments.
    pub total_payment: Money,

    /// Part of [`Summary::total_payment`] going to interest.
    pub total_interest: Money,
}

/// Amortizes the provided [`Loan`] with fixed monthly payments.
#[must_use]
pub fn amortize_loan(loan: &Loan) -> Amortization {
    let loan_amount = loan.amount();
    let monthly_rate = loan.monthly_rate();
    let payments = loan.term.payments();
    let n = f64::from(payments);

    #[expect(clippy::float_cmp, reason = "only exact zero is degenerate")]
    let monthly_payment = if monthly_rate == 0.0 {
        // `(1 + 0)^n - 1` is zero, so the annuity formula degenerates.
        loan_amount / n
    } else {
        let growth = (1.0 + monthly_rate).powf(n);
        loan_amount * monthly_rate * growth / (growth - 1.0)
    };
    let total_payment = monthly_payment * n;

    Amortization {
        loan_amount,
        monthly_rate,
        payments,
        monthly_payment,
        total_payment,
        total_interest: total_payment - loan_amount,
    }
}

/// Validates the provided [`Input`] and amortizes it.
///
/// # Errors
///
/// Errors with every violated constraint if the [`Input`] is invalid.
pub fn amortize(input: Input) -> Result<Amortization, ValidationError> {
    Loan::try_from(input).map(|loan| amortize_loan(&loan))
}

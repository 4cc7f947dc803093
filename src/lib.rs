//! `mortgage_calc` is a Rust library for calculating repayment mortgages.
//!
//! From the property price, the deposit, the annual interest rate and the term it
//! works out:
//! - **Monthly payment**: the fixed payment that clears the loan over the term.
//! - **Total repayment and interest**: what the loan costs in full.
//! - **Affordability check**: the monthly payment if the rate were 3 points higher.
//! - **Yearly breakdown**: the balance left at each anniversary of the loan, found by
//!   simulating every monthly payment.
//!
//! The rate can also be taken from the Bank of England's published Bank Rate, see
//! [`base_rate`].
//!
//! ## Usage
//!
//! Add `mortgage_calc` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mortgage_calc = "0.1.0"
//! ```
//!
//! Then, use the `calculate_mortgage` function:
//!
//! ```rust
//! use mortgage_calc::{calculate_mortgage, LoanParameters};
//!
//! fn main() {
//!     let params = LoanParameters {
//!         property_price: 300_000.0,
//!         deposit: 60_000.0,
//!         annual_interest_rate: 3.5,
//!         term_years: 30,
//!     };
//!
//!     let calculation = calculate_mortgage(&params);
//!     println!("Monthly payment:     {:.2}", calculation.results.monthly_payment);
//!     println!("Total repayment:     {:.2}", calculation.results.total_repayment);
//!     println!("Affordability check: {:.2}", calculation.results.affordability_check);
//!
//!     for record in &calculation.yearly_breakdown {
//!         println!("Year {:>2}: {:.2}", record.year, record.remaining_debt);
//!     }
//!     assert_eq!(calculation.yearly_breakdown.len(), 31);
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

pub mod amortisation;
pub mod base_rate;
pub mod config;
pub mod error;
pub mod payment;
pub mod report;
pub mod schedule;
pub mod validation;

pub use amortisation::{calculate_capital, convert_to_monthly_interest_rate};
pub use base_rate::{InterestRateData, RateSource, fetch_latest_interest_rate, resolve_interest_rate};
pub use config::{BaseRateConfig, CalculatorConfig};
pub use error::{MortgageError, Result};
pub use payment::{
    EXTRA_INTEREST_RATE, MortgageResults, calculate_affordability_check, calculate_monthly_payment,
    calculate_total_interest, calculate_total_repayment,
};
pub use report::MortgageReport;
pub use schedule::{YearlyBreakdownRecord, calculate_yearly_breakdown};

/// Input parameters for a mortgage calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// The price of the property.
    pub property_price: f64,
    /// The deposit paid up front.
    pub deposit: f64,
    /// The annual interest rate as a percentage (e.g., 5.25 for 5.25%).
    pub annual_interest_rate: f64,
    /// The mortgage term in years.
    pub term_years: u32,
}

impl LoanParameters {
    /// The same loan at a different annual rate, e.g. a published base rate.
    pub fn with_interest_rate(self, annual_interest_rate: f64) -> Self {
        Self {
            annual_interest_rate,
            ..self
        }
    }

    /// The amount borrowed.
    pub fn capital(&self) -> f64 {
        calculate_capital(self.property_price, self.deposit)
    }

    /// See [`validation::validate_loan_parameters`].
    pub fn validate(&self) -> Result<()> {
        validation::validate_loan_parameters(self)
    }
}

/// Everything produced by one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageCalculation {
    /// The inputs the figures were calculated from.
    pub parameters: LoanParameters,
    /// The headline figures.
    pub results: MortgageResults,
    /// The balance at the start and at the end of every year of the term.
    pub yearly_breakdown: Vec<YearlyBreakdownRecord>,
}

/// Calculates the headline figures and the yearly breakdown with the standard
/// [`EXTRA_INTEREST_RATE`] stress margin.
///
/// The parameters are not validated; call [`calculate_mortgage_checked`] for that.
pub fn calculate_mortgage(params: &LoanParameters) -> MortgageCalculation {
    calculate_with_margin(params, EXTRA_INTEREST_RATE)
}

/// Like [`calculate_mortgage`], with the stress margin taken from `config`.
pub fn calculate_mortgage_with_config(params: &LoanParameters, config: &CalculatorConfig) -> MortgageCalculation {
    calculate_with_margin(params, config.stress_margin)
}

/// Validates the parameters, then calculates.
///
/// # Errors
///
/// Returns the first validation failure, see [`validation::validate_loan_parameters`].
pub fn calculate_mortgage_checked(params: &LoanParameters) -> Result<MortgageCalculation> {
    params.validate()?;
    Ok(calculate_mortgage(params))
}

fn calculate_with_margin(params: &LoanParameters, stress_margin: f64) -> MortgageCalculation {
    debug!(
        "calculating mortgage: price {}, deposit {}, rate {}%, term {} years",
        params.property_price, params.deposit, params.annual_interest_rate, params.term_years
    );

    let results = payment::calculate_mortgage_results(
        params.property_price,
        params.deposit,
        params.annual_interest_rate,
        params.term_years,
        stress_margin,
    );
    let yearly_breakdown = calculate_yearly_breakdown(
        params.property_price,
        params.deposit,
        params.annual_interest_rate,
        params.term_years,
    );

    MortgageCalculation {
        parameters: *params,
        results,
        yearly_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn default_params() -> LoanParameters {
        LoanParameters {
            property_price: 100_000.0,
            deposit: 5_000.0,
            annual_interest_rate: 5.25,
            term_years: 15,
        }
    }

    #[test]
    fn test_calculate_mortgage_happy_path() {
        let calculation = calculate_mortgage(&default_params());

        assert!((calculation.results.monthly_payment - 763.68).abs() < 0.005);
        assert_eq!(calculation.results.capital, 95_000.0);
        assert_eq!(
            calculation.results.interest,
            calculation.results.total_repayment - calculation.results.capital
        );
        assert_eq!(
            calculation.results.affordability_check,
            calculate_monthly_payment(100_000.0, 5_000.0, 8.25, 15)
        );

        assert_eq!(calculation.yearly_breakdown.len(), 16);
        assert_eq!(calculation.yearly_breakdown[0].remaining_debt, 95_000.0);
        assert!(calculation.yearly_breakdown[15].remaining_debt.abs() < 1.0);
    }

    #[test]
    fn test_calculate_mortgage_with_config_uses_stress_margin() {
        let config = CalculatorConfig {
            stress_margin: 2.0,
            ..CalculatorConfig::default()
        };
        let calculation = calculate_mortgage_with_config(&default_params(), &config);

        assert_eq!(
            calculation.results.affordability_check,
            calculate_monthly_payment(100_000.0, 5_000.0, 7.25, 15)
        );
        assert_eq!(
            calculation.results.monthly_payment,
            calculate_mortgage(&default_params()).results.monthly_payment
        );
    }

    #[test]
    fn test_calculate_mortgage_checked_rejects_invalid_input() {
        let params = LoanParameters {
            deposit: 100_000.0,
            ..default_params()
        };

        assert!(matches!(
            calculate_mortgage_checked(&params),
            Err(MortgageError::InvalidInput { .. })
        ));
        assert!(calculate_mortgage_checked(&default_params()).is_ok());
    }

    #[test]
    fn test_unchecked_calculation_propagates_degenerate_input() {
        let params = LoanParameters {
            deposit: 120_000.0,
            ..default_params()
        };
        let calculation = calculate_mortgage(&params);

        assert_eq!(calculation.results.capital, -20_000.0);
        assert_eq!(calculation.yearly_breakdown[0].remaining_debt, -20_000.0);
    }

    #[test]
    fn test_base_rate_override() {
        let base_rate = InterestRateData::Available {
            rate: dec!(4.75),
            last_updated: chrono::Utc::now(),
        };
        let rate = resolve_interest_rate(5.25, true, Some(&base_rate));
        let params = default_params().with_interest_rate(rate);

        assert_eq!(params.annual_interest_rate, 4.75);
        assert_eq!(
            calculate_mortgage(&params).results.monthly_payment,
            calculate_monthly_payment(100_000.0, 5_000.0, 4.75, 15)
        );
    }

    #[test]
    fn test_calculation_serializes() {
        let calculation = calculate_mortgage(&default_params());
        let json = serde_json::to_string(&calculation).unwrap();
        let back: MortgageCalculation = serde_json::from_str(&json).unwrap();

        assert_eq!(back.parameters, calculation.parameters);
        assert_eq!(back.yearly_breakdown.len(), 16);
    }
}

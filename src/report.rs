//! Two-decimal snapshot of a calculation for display or serialization.
//!
//! The engine keeps full `f64` precision; rounding happens only here, once, at the edge.
//! Currency symbols and locale formatting are left to whoever renders the report.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::MortgageCalculation;
use crate::error::{MortgageError, Result};
use crate::payment::MortgageResults;
use crate::schedule::YearlyBreakdownRecord;

/// Headline figures rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundedResults {
    /// The fixed monthly payment.
    pub monthly_payment: Decimal,
    /// Everything paid over the term.
    pub total_repayment: Decimal,
    /// The amount borrowed.
    pub capital: Decimal,
    /// Total interest paid over the term.
    pub interest: Decimal,
    /// Monthly payment at the stressed rate.
    pub affordability_check: Decimal,
}

/// Balance at one anniversary, rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundedYearlyRecord {
    /// Year of the term, where 0 is the start of the mortgage.
    pub year: u32,
    /// Balance outstanding at the end of this year.
    pub remaining_debt: Decimal,
}

/// A calculation ready to hand to a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageReport {
    /// The headline figures.
    pub results: RoundedResults,
    /// One record per year, starting at year 0.
    pub yearly_breakdown: Vec<RoundedYearlyRecord>,
}

impl MortgageReport {
    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Converts `value` to a `Decimal` rounded to two decimal places.
///
/// NaN and infinity give [`MortgageError::NonFiniteValue`]; finite values beyond what
/// a `Decimal` can hold give [`MortgageError::OutOfRange`].
fn to_money(field: &str, value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(MortgageError::NonFiniteValue { field: field.to_string() });
    }

    Decimal::from_f64(value)
        .map(|amount| amount.round_dp(2))
        .ok_or_else(|| MortgageError::OutOfRange { field: field.to_string() })
}

impl TryFrom<&MortgageResults> for RoundedResults {
    type Error = MortgageError;

    fn try_from(results: &MortgageResults) -> Result<Self> {
        Ok(Self {
            monthly_payment: to_money("monthly_payment", results.monthly_payment)?,
            total_repayment: to_money("total_repayment", results.total_repayment)?,
            capital: to_money("capital", results.capital)?,
            interest: to_money("interest", results.interest)?,
            affordability_check: to_money("affordability_check", results.affordability_check)?,
        })
    }
}

impl TryFrom<&YearlyBreakdownRecord> for RoundedYearlyRecord {
    type Error = MortgageError;

    fn try_from(record: &YearlyBreakdownRecord) -> Result<Self> {
        Ok(Self {
            year: record.year,
            remaining_debt: to_money("remaining_debt", record.remaining_debt)?,
        })
    }
}

impl MortgageCalculation {
    /// Rounds every figure to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`MortgageError::NonFiniteValue`] if any figure is NaN or infinite, and
    /// [`MortgageError::OutOfRange`] if one is too large for a `Decimal`. Both only
    /// happen when the engine was given degenerate input.
    pub fn to_report(&self) -> Result<MortgageReport> {
        Ok(MortgageReport {
            results: RoundedResults::try_from(&self.results)?,
            yearly_breakdown: self
                .yearly_breakdown
                .iter()
                .map(RoundedYearlyRecord::try_from)
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

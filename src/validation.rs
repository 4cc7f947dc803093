//! Input checks a caller runs before handing parameters to the engine.
//!
//! The engine functions never call these; they compute whatever the numbers give.

use crate::LoanParameters;
use crate::error::{MortgageError, Result};

/// Rejects parameters the engine would turn into meaningless figures.
///
/// # Errors
///
/// Returns [`MortgageError::NonFiniteValue`] for NaN or infinite fields, otherwise
/// [`MortgageError::InvalidInput`] for the first rule broken.
pub fn validate_loan_parameters(params: &LoanParameters) -> Result<()> {
    for (field, value) in [
        ("property_price", params.property_price),
        ("deposit", params.deposit),
        ("annual_interest_rate", params.annual_interest_rate),
    ] {
        if !value.is_finite() {
            return Err(MortgageError::NonFiniteValue { field: field.to_string() });
        }
    }

    if params.property_price <= 0.0 {
        return Err(MortgageError::invalid_input("property_price", "must be greater than zero"));
    }
    if params.deposit < 0.0 {
        return Err(MortgageError::invalid_input("deposit", "cannot be negative"));
    }
    if params.deposit >= params.property_price {
        return Err(MortgageError::invalid_input("deposit", "must be less than the property price"));
    }
    if params.term_years == 0 {
        return Err(MortgageError::invalid_input("term_years", "must be at least one year"));
    }
    if params.annual_interest_rate < 0.0 {
        return Err(MortgageError::invalid_input("annual_interest_rate", "cannot be negative"));
    }

    Ok(())
}

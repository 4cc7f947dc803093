use serde::{Deserialize, Serialize};

use crate::amortisation::{MONTHS_PER_YEAR, calculate_capital, convert_to_monthly_interest_rate};

/// Stress margin, in percentage points, added to the rate for the affordability check.
pub const EXTRA_INTEREST_RATE: f64 = 3.0;

/// Headline figures of a repayment mortgage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageResults {
    /// The fixed monthly payment.
    pub monthly_payment: f64,
    /// Everything paid over the term.
    pub total_repayment: f64,
    /// The amount borrowed (property price minus deposit).
    pub capital: f64,
    /// Total interest paid over the term.
    pub interest: f64,
    /// Monthly payment at the stressed rate.
    pub affordability_check: f64,
}

/// Calculates the fixed monthly payment that clears the capital over the term.
///
/// The annuity formula is: M = L * r / (1 - (1 + r)^-n)
///
/// At a zero rate the formula divides by zero, so the straight-line limit `L / n`
/// is used instead. The denominator is computed as `-expm1(-n * ln(1 + r))` so it
/// keeps its precision as `r` approaches zero.
///
/// # Arguments
///
/// * `property_price` - The price of the property.
/// * `deposit` - The deposit paid up front.
/// * `annual_interest_rate` - The annual rate as a percentage (e.g., 5.25 for 5.25%).
/// * `term_years` - The mortgage term in years.
pub fn calculate_monthly_payment(
    property_price: f64,
    deposit: f64,
    annual_interest_rate: f64,
    term_years: u32,
) -> f64 {
    let loan_amount = calculate_capital(property_price, deposit);
    let monthly_rate = convert_to_monthly_interest_rate(annual_interest_rate);
    let number_of_payments = f64::from(term_years) * f64::from(MONTHS_PER_YEAR);

    if monthly_rate == 0.0 {
        return loan_amount / number_of_payments;
    }

    let discount = -(-number_of_payments * monthly_rate.ln_1p()).exp_m1();
    loan_amount * monthly_rate / discount
}

/// Total repaid over the term: `T = M * years * 12`.
pub fn calculate_total_repayment(monthly_payment: f64, term_years: u32) -> f64 {
    monthly_payment * f64::from(term_years) * f64::from(MONTHS_PER_YEAR)
}

/// Total interest paid over the term: `I = T - C`.
pub fn calculate_total_interest(total_repayment: f64, capital: f64) -> f64 {
    total_repayment - capital
}

/// Monthly payment recomputed at the rate plus [`EXTRA_INTEREST_RATE`].
pub fn calculate_affordability_check(
    property_price: f64,
    deposit: f64,
    annual_interest_rate: f64,
    term_years: u32,
) -> f64 {
    calculate_affordability_check_with_margin(
        property_price,
        deposit,
        annual_interest_rate,
        term_years,
        EXTRA_INTEREST_RATE,
    )
}

/// Monthly payment recomputed at the rate plus a caller-chosen stress margin.
pub fn calculate_affordability_check_with_margin(
    property_price: f64,
    deposit: f64,
    annual_interest_rate: f64,
    term_years: u32,
    stress_margin: f64,
) -> f64 {
    calculate_monthly_payment(
        property_price,
        deposit,
        annual_interest_rate + stress_margin,
        term_years,
    )
}

/// Derives every headline figure from the four loan inputs.
pub fn calculate_mortgage_results(
    property_price: f64,
    deposit: f64,
    annual_interest_rate: f64,
    term_years: u32,
    stress_margin: f64,
) -> MortgageResults {
    let monthly_payment = calculate_monthly_payment(property_price, deposit, annual_interest_rate, term_years);
    let capital = calculate_capital(property_price, deposit);
    let total_repayment = calculate_total_repayment(monthly_payment, term_years);

    MortgageResults {
        monthly_payment,
        total_repayment,
        capital,
        interest: calculate_total_interest(total_repayment, capital),
        affordability_check: calculate_affordability_check_with_margin(
            property_price,
            deposit,
            annual_interest_rate,
            term_years,
            stress_margin,
        ),
    }
}

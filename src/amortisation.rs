//! Leaf arithmetic of a repayment mortgage.
//!
//! Everything here is a pure `f64` transform with no validation: a deposit larger than
//! the price gives a negative capital, and that is left for the caller to prevent.

/// Number of monthly payments in one year of the schedule.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Calculates the capital (loan amount): `C = P - D`.
pub fn calculate_capital(property_price: f64, deposit: f64) -> f64 {
    property_price - deposit
}

/// Converts an annual interest rate percentage to a monthly decimal multiplier.
///
/// `5.25` (meaning 5.25% per year) becomes `0.004375`.
pub fn convert_to_monthly_interest_rate(annual_interest_rate: f64) -> f64 {
    annual_interest_rate / 100.0 / 12.0
}

/// The part of a payment that covers the interest accrued on `balance` this month.
pub fn calculate_interest_portion(balance: f64, monthly_rate: f64) -> f64 {
    balance * monthly_rate
}

/// The part of a payment left over to reduce the principal.
pub fn calculate_principal_portion(monthly_payment: f64, interest_portion: f64) -> f64 {
    monthly_payment - interest_portion
}

/// Applies a single monthly payment and returns the new balance.
///
/// Interest is charged first and the remainder of the payment reduces the principal.
/// The balance never goes below zero, so a payment against a cleared loan has no effect.
pub fn apply_monthly_payment(current_balance: f64, monthly_payment: f64, monthly_rate: f64) -> f64 {
    let interest_portion = calculate_interest_portion(current_balance, monthly_rate);
    let principal_portion = calculate_principal_portion(monthly_payment, interest_portion);

    (current_balance - principal_portion).max(0.0)
}

/// Applies twelve monthly payments in sequence and returns the balance at year end.
pub fn apply_one_year_of_payments(starting_balance: f64, monthly_payment: f64, monthly_rate: f64) -> f64 {
    (0..MONTHS_PER_YEAR).fold(starting_balance, |balance, _| {
        apply_monthly_payment(balance, monthly_payment, monthly_rate)
    })
}

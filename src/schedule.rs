//! Year-by-year amortisation schedule.
//!
//! Each year applies twelve monthly payments to the balance carried over from the
//! previous year. The schedule always has `term_years + 1` entries: once the balance is
//! cleared it stays at zero until the term runs out.

use serde::{Deserialize, Serialize};

use crate::amortisation::{apply_one_year_of_payments, calculate_capital, convert_to_monthly_interest_rate};
use crate::payment::calculate_monthly_payment;

/// Remaining balance at a loan anniversary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyBreakdownRecord {
    /// Year of the term, where 0 is the start of the mortgage.
    pub year: u32,
    /// Balance outstanding at the end of this year.
    pub remaining_debt: f64,
}

/// The record for year 0, before any payment is made.
pub fn create_initial_record(loan_amount: f64) -> YearlyBreakdownRecord {
    YearlyBreakdownRecord {
        year: 0,
        remaining_debt: loan_amount,
    }
}

/// Builds the record for `year` from the balance at the end of the previous year.
///
/// Year 0 is the initial state and gets no payments.
pub fn generate_record_for_year(
    year: u32,
    previous_year_balance: f64,
    monthly_payment: f64,
    monthly_rate: f64,
) -> YearlyBreakdownRecord {
    if year == 0 {
        return create_initial_record(previous_year_balance);
    }

    YearlyBreakdownRecord {
        year,
        remaining_debt: apply_one_year_of_payments(previous_year_balance, monthly_payment, monthly_rate),
    }
}

/// Calculates the remaining balance at the start and at the end of every year of the term.
///
/// # Arguments
///
/// * `property_price` - The price of the property.
/// * `deposit` - The deposit paid up front.
/// * `annual_interest_rate` - The annual rate as a percentage (e.g., 5.25 for 5.25%).
/// * `term_years` - The mortgage term in years.
pub fn calculate_yearly_breakdown(
    property_price: f64,
    deposit: f64,
    annual_interest_rate: f64,
    term_years: u32,
) -> Vec<YearlyBreakdownRecord> {
    let loan_amount = calculate_capital(property_price, deposit);
    let monthly_payment = calculate_monthly_payment(property_price, deposit, annual_interest_rate, term_years);
    let monthly_rate = convert_to_monthly_interest_rate(annual_interest_rate);

    let mut breakdown = Vec::with_capacity(term_years as usize + 1);
    breakdown.push(create_initial_record(loan_amount));

    let mut balance = loan_amount;
    for year in 1..=term_years {
        let record = generate_record_for_year(year, balance, monthly_payment, monthly_rate);
        balance = record.remaining_debt;
        breakdown.push(record);
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const PRICE: f64 = 100_000.0;
    const DEPOSIT: f64 = 5_000.0;
    const RATE: f64 = 5.25;
    const TERM: u32 = 15;

    #[test]
    fn test_generate_record_for_year_zero_is_initial_state() {
        assert_eq!(
            generate_record_for_year(0, 95_000.0, 763.68, 0.004375),
            YearlyBreakdownRecord { year: 0, remaining_debt: 95_000.0 }
        );
    }

    #[test]
    fn test_generate_record_for_year_applies_a_year_of_payments() {
        let record = generate_record_for_year(3, 95_000.0, 763.68, 0.004375);
        assert_eq!(record.year, 3);
        assert_eq!(record.remaining_debt, apply_one_year_of_payments(95_000.0, 763.68, 0.004375));
    }

    #[rstest]
    #[case(5.25, 15)]
    #[case(0.0, 15)]
    #[case(3.5, 30)]
    #[case(5.25, 1)]
    #[case(12.0, 40)]
    fn test_breakdown_shape(#[case] rate: f64, #[case] term: u32) {
        let breakdown = calculate_yearly_breakdown(PRICE, DEPOSIT, rate, term);

        assert_eq!(breakdown.len(), term as usize + 1);
        assert_eq!(breakdown[0], create_initial_record(calculate_capital(PRICE, DEPOSIT)));

        for (index, record) in breakdown.iter().enumerate() {
            assert_eq!(record.year as usize, index);
        }
        for pair in breakdown.windows(2) {
            assert!(pair[1].remaining_debt <= pair[0].remaining_debt);
        }

        let last = breakdown[term as usize].remaining_debt;
        assert!(last.abs() < 1.0, "final balance {last} is not paid off");
    }

    #[test]
    fn test_breakdown_strictly_decreases_with_interest() {
        let breakdown = calculate_yearly_breakdown(PRICE, DEPOSIT, RATE, TERM);
        for pair in breakdown.windows(2) {
            assert!(pair[1].remaining_debt < pair[0].remaining_debt);
        }
    }

    #[test]
    fn test_zero_rate_breakdown_is_linear() {
        let breakdown = calculate_yearly_breakdown(PRICE, DEPOSIT, 0.0, TERM);
        let loan_amount = calculate_capital(PRICE, DEPOSIT);
        let monthly_payment = loan_amount / f64::from(TERM * 12);

        for year in 1..=TERM {
            let expected = (loan_amount - f64::from(year * 12) * monthly_payment).max(0.0);
            assert!((breakdown[year as usize].remaining_debt - expected).abs() < 0.05);
        }
    }

    #[test]
    fn test_large_loan_long_term() {
        let breakdown = calculate_yearly_breakdown(1_000_000.0, 200_000.0, 3.5, 30);

        assert_eq!(breakdown.len(), 31);
        assert_eq!(breakdown[0].remaining_debt, 800_000.0);
        assert!(breakdown[30].remaining_debt.abs() < 1.0);
    }

    #[test]
    fn test_overpaid_loan_stays_at_zero() {
        // Paying 10,000 a month clears 12,000 in two months; the remaining
        // years of the term keep a zero balance rather than stopping early.
        let mut balance = 12_000.0;
        let mut records = vec![create_initial_record(balance)];
        for year in 1..=3 {
            let record = generate_record_for_year(year, balance, 10_000.0, 0.004);
            balance = record.remaining_debt;
            records.push(record);
        }

        assert_eq!(records.len(), 4);
        assert!(records[1..].iter().all(|r| r.remaining_debt == 0.0));
    }
}

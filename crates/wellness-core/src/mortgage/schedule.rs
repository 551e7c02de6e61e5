//! Month-by-month amortization. This is a supplementary view; the headline
//! breakdown and the PMI estimate stay on the static first-payment snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::assumptions::MortgageInputs;
use super::breakdown::monthly_principal_and_interest;
use crate::time_value;
use crate::types::Money;
use crate::WellnessResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSummary {
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub ending_balance: Money,
}

/// Full payment schedule. The last payment absorbs rounding so the balance
/// lands exactly on zero.
pub fn amortization_schedule(inputs: &MortgageInputs) -> WellnessResult<Vec<AmortizationRow>> {
    let rate = time_value::monthly_rate(inputs.annual_interest_rate_percent);
    let payment = monthly_principal_and_interest(inputs)?;
    let n = inputs.number_of_payments();

    let mut balance = inputs.loan_amount();
    let mut rows = Vec::with_capacity(n as usize);

    for month in 1..=n {
        let interest = balance * rate;
        let mut principal = payment - interest;
        if month == n || principal > balance {
            principal = balance;
        }
        balance -= principal;
        rows.push(AmortizationRow {
            month,
            payment: principal + interest,
            principal,
            interest,
            remaining_balance: balance.max(Decimal::ZERO),
        });
    }

    Ok(rows)
}

/// Roll a monthly schedule up into calendar-year totals.
pub fn yearly_summary(rows: &[AmortizationRow]) -> Vec<AmortizationSummary> {
    rows.chunks(12)
        .enumerate()
        .map(|(i, chunk)| AmortizationSummary {
            year: i as u32 + 1,
            principal_paid: chunk.iter().map(|r| r.principal).sum(),
            interest_paid: chunk.iter().map(|r| r.interest).sum(),
            ending_balance: chunk
                .last()
                .map(|r| r.remaining_balance)
                .unwrap_or(Decimal::ZERO),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn inputs() -> MortgageInputs {
        MortgageInputs {
            home_price: dec!(250000),
            down_payment_percent: dec!(20),
            loan_term_years: 15,
            annual_interest_rate_percent: dec!(5.5),
        }
    }

    #[test]
    fn test_schedule_pays_off_loan() {
        let rows = amortization_schedule(&inputs()).unwrap();
        assert_eq!(rows.len(), 180);
        assert_eq!(rows.last().unwrap().remaining_balance, Decimal::ZERO);
        let principal: Decimal = rows.iter().map(|r| r.principal).sum();
        assert!((principal - dec!(200000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_first_row_matches_snapshot_interest() {
        let rows = amortization_schedule(&inputs()).unwrap();
        // 200k * 5.5% / 12
        assert!((rows[0].interest - dec!(916.67)).abs() < dec!(0.01));
    }

    #[test]
    fn test_yearly_summary_covers_term() {
        let rows = amortization_schedule(&inputs()).unwrap();
        let years = yearly_summary(&rows);
        assert_eq!(years.len(), 15);
        assert!(years[0].interest_paid > years[14].interest_paid);
    }
}

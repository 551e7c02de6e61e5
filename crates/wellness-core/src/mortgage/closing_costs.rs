use serde::{Deserialize, Serialize};

use super::assumptions::{ClosingCostSchedule, MortgageInputs};
use crate::types::Money;

/// One-time fees paid at purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosingCosts {
    /// Scales with the loan amount
    pub loan_origination: Money,
    pub appraisal: Money,
    pub credit_report: Money,
    pub title_insurance: Money,
    pub recording_fees: Money,
    /// Scales with the home price
    pub transfer_taxes: Money,
    pub home_inspection: Money,
    pub other: Money,
    pub total_closing_costs: Money,
}

impl ClosingCosts {
    /// Line items in display order.
    pub fn line_items(&self) -> [(&'static str, Money); 8] {
        [
            ("Loan origination", self.loan_origination),
            ("Appraisal", self.appraisal),
            ("Credit report", self.credit_report),
            ("Title insurance", self.title_insurance),
            ("Recording fees", self.recording_fees),
            ("Transfer taxes", self.transfer_taxes),
            ("Home inspection", self.home_inspection),
            ("Other", self.other),
        ]
    }
}

/// Price the eight closing-cost line items. The scaling items are always
/// derived from the current price and loan, never cached.
pub fn compute_closing_costs(
    inputs: &MortgageInputs,
    schedule: &ClosingCostSchedule,
) -> ClosingCosts {
    let loan_origination = inputs.loan_amount() * schedule.origination_rate;
    let transfer_taxes = inputs.home_price * schedule.transfer_tax_rate;

    let total_closing_costs = loan_origination
        + schedule.appraisal
        + schedule.credit_report
        + schedule.title_insurance
        + schedule.recording_fees
        + transfer_taxes
        + schedule.home_inspection
        + schedule.other;

    ClosingCosts {
        loan_origination,
        appraisal: schedule.appraisal,
        credit_report: schedule.credit_report,
        title_insurance: schedule.title_insurance,
        recording_fees: schedule.recording_fees,
        transfer_taxes,
        home_inspection: schedule.home_inspection,
        other: schedule.other,
        total_closing_costs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_schedule_totals() {
        let inputs = MortgageInputs {
            home_price: dec!(400000),
            down_payment_percent: dec!(20),
            loan_term_years: 30,
            annual_interest_rate_percent: dec!(7),
        };
        let costs = compute_closing_costs(&inputs, &ClosingCostSchedule::default());
        assert_eq!(costs.loan_origination, dec!(3200));
        assert_eq!(costs.transfer_taxes, dec!(1600));
        // 3200 + 500 + 50 + 1500 + 125 + 1600 + 400 + 500
        assert_eq!(costs.total_closing_costs, dec!(7875));
        let summed: rust_decimal::Decimal = costs.line_items().iter().map(|(_, v)| *v).sum();
        assert_eq!(summed, costs.total_closing_costs);
    }
}

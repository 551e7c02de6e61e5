use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::assumptions::{CostAssumptions, CostOverrides, MortgageInputs, RecurringCosts};
use crate::time_value;
use crate::types::Money;
use crate::WellnessResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// First-payment snapshot of the monthly housing payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageBreakdown {
    pub principal: Money,
    pub interest: Money,
    pub pmi: Money,
    pub taxes: Money,
    pub insurance: Money,
    pub hoa: Money,
    /// principal + interest + pmi + taxes + insurance + hoa
    pub total: Money,
}

impl MortgageBreakdown {
    pub fn principal_and_interest(&self) -> Money {
        self.principal + self.interest
    }
}

/// Monthly costs derived from the price, the loan and the assumption rates,
/// before any manual edits.
pub fn default_recurring_costs(
    inputs: &MortgageInputs,
    assumptions: &CostAssumptions,
) -> RecurringCosts {
    let monthly_share = |rate: Decimal, base: Money| base * rate / MONTHS_PER_YEAR;

    let mortgage_insurance = if inputs.requires_pmi() {
        monthly_share(assumptions.pmi_rate, inputs.loan_amount())
    } else {
        Decimal::ZERO
    };

    RecurringCosts {
        property_tax: monthly_share(assumptions.property_tax_rate, inputs.home_price),
        homeowners_insurance: monthly_share(assumptions.insurance_rate, inputs.home_price),
        mortgage_insurance,
        hoa_fees: assumptions.hoa_fees_monthly,
        utilities: assumptions.utilities_monthly,
        maintenance: monthly_share(assumptions.maintenance_rate, inputs.home_price),
    }
}

/// Layer manual edits over the derived defaults. PMI stays zero when the
/// down payment is 20% or more, edited or not.
pub fn resolve_recurring_costs(
    inputs: &MortgageInputs,
    assumptions: &CostAssumptions,
    overrides: &CostOverrides,
) -> RecurringCosts {
    let defaults = default_recurring_costs(inputs, assumptions);
    let mortgage_insurance = if inputs.requires_pmi() {
        overrides
            .mortgage_insurance
            .unwrap_or(defaults.mortgage_insurance)
    } else {
        Decimal::ZERO
    };

    RecurringCosts {
        property_tax: overrides.property_tax.unwrap_or(defaults.property_tax),
        homeowners_insurance: overrides
            .homeowners_insurance
            .unwrap_or(defaults.homeowners_insurance),
        mortgage_insurance,
        hoa_fees: overrides.hoa_fees.unwrap_or(defaults.hoa_fees),
        utilities: overrides.utilities.unwrap_or(defaults.utilities),
        maintenance: overrides.maintenance.unwrap_or(defaults.maintenance),
    }
}

/// Monthly principal-and-interest payment for the loan.
pub fn monthly_principal_and_interest(inputs: &MortgageInputs) -> WellnessResult<Money> {
    let rate = time_value::monthly_rate(inputs.annual_interest_rate_percent);
    time_value::annuity_payment(inputs.loan_amount(), rate, inputs.number_of_payments())
}

/// Split the first monthly payment into its components.
pub fn compute_breakdown(
    inputs: &MortgageInputs,
    costs: &RecurringCosts,
) -> WellnessResult<MortgageBreakdown> {
    let rate = time_value::monthly_rate(inputs.annual_interest_rate_percent);
    let payment_pi = monthly_principal_and_interest(inputs)?;

    let interest = inputs.loan_amount() * rate;
    let principal = payment_pi - interest;
    let pmi = if inputs.requires_pmi() {
        costs.mortgage_insurance
    } else {
        Decimal::ZERO
    };

    let total = payment_pi + pmi + costs.property_tax + costs.homeowners_insurance + costs.hoa_fees;

    Ok(MortgageBreakdown {
        principal,
        interest,
        pmi,
        taxes: costs.property_tax,
        insurance: costs.homeowners_insurance,
        hoa: costs.hoa_fees,
        total,
    })
}

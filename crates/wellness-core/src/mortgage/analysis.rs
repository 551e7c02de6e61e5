use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::assumptions::{
    ClosingCostSchedule, CostAssumptions, CostOverrides, MortgageInputs, RecurringCosts,
    PMI_EXEMPT_DOWN_PAYMENT_PERCENT,
};
use super::breakdown::{compute_breakdown, resolve_recurring_costs, MortgageBreakdown};
use super::closing_costs::{compute_closing_costs, ClosingCosts};
use crate::error::WellnessError;
use crate::time_value;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::WellnessResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Years of PMI assumed when estimating its lifetime cost. Fixed estimate,
/// independent of how fast equity actually builds.
pub const PMI_ESTIMATE_YEARS: u32 = 7;

/// Horizons reported when the caller does not ask for specific ones.
pub const DEFAULT_PROJECTION_YEARS: [u32; 5] = [1, 5, 10, 15, 30];

/// Longest projection horizon accepted.
pub const MAX_PROJECTION_YEARS: u32 = 100;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Everything needed for a one-shot home cost analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeCostInput {
    pub mortgage: MortgageInputs,
    #[serde(default)]
    pub assumptions: CostAssumptions,
    #[serde(default)]
    pub overrides: CostOverrides,
    #[serde(default)]
    pub closing_costs: ClosingCostSchedule,
    /// Projection horizons in years; empty means the defaults
    #[serde(default)]
    pub projection_years: Vec<u32>,
}

/// Linear extrapolation of the first-month snapshot over a horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostProjection {
    pub years: u32,
    /// P&I payments, stopping once the loan term ends
    pub mortgage_payments: Money,
    /// PMI, stopping after the fixed estimate period
    pub mortgage_insurance: Money,
    /// Taxes, insurance and HOA
    pub escrow_and_fees: Money,
    /// Utilities and maintenance
    pub living_costs: Money,
    pub total_cost: Money,
    /// total_cost plus cash to close
    pub total_with_cash_to_close: Money,
    /// Loan balance still owed at the end of the horizon
    pub remaining_loan_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeCostOutput {
    pub down_payment_amount: Money,
    pub loan_amount: Money,
    pub recurring_costs: RecurringCosts,
    pub breakdown: MortgageBreakdown,
    pub principal_and_interest: Money,
    pub closing_costs: ClosingCosts,
    /// Down payment plus total closing costs
    pub cash_to_close: Money,
    /// Breakdown total plus utilities and maintenance
    pub monthly_cost_of_ownership: Money,
    /// P&I over the full term minus the loan amount
    pub lifetime_interest: Money,
    pub pmi_lifetime_estimate: Money,
    pub pmi_estimate_years: u32,
    pub projections: Vec<CostProjection>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full home ownership cost analysis.
pub fn analyze_home_costs(
    input: &HomeCostInput,
) -> WellnessResult<ComputationOutput<HomeCostOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let inputs = &input.mortgage;
    inputs.validate(&mut warnings)?;
    input.overrides.validate()?;
    input.assumptions.validate()?;
    input.closing_costs.validate()?;

    let recurring_costs = resolve_recurring_costs(inputs, &input.assumptions, &input.overrides);
    let breakdown = compute_breakdown(inputs, &recurring_costs)?;
    let closing_costs = compute_closing_costs(inputs, &input.closing_costs);

    let down_payment_amount = inputs.down_payment_amount();
    let loan_amount = inputs.loan_amount();
    let principal_and_interest = breakdown.principal_and_interest();
    let cash_to_close = down_payment_amount + closing_costs.total_closing_costs;
    let monthly_cost_of_ownership =
        breakdown.total + recurring_costs.utilities + recurring_costs.maintenance;

    let lifetime_interest = (principal_and_interest
        * Decimal::from(inputs.number_of_payments())
        - loan_amount)
        .max(Decimal::ZERO);
    let pmi_lifetime_estimate = breakdown.pmi * dec!(12) * Decimal::from(PMI_ESTIMATE_YEARS);

    let horizons: Vec<u32> = if input.projection_years.is_empty() {
        DEFAULT_PROJECTION_YEARS.to_vec()
    } else {
        input.projection_years.clone()
    };
    if horizons.iter().any(|&y| y > MAX_PROJECTION_YEARS) {
        return Err(WellnessError::invalid(
            "projection_years",
            format!("Projection horizons cannot exceed {MAX_PROJECTION_YEARS} years."),
        ));
    }
    if horizons.contains(&0) {
        warnings.push("Projection horizon of 0 years contributes no cost.".into());
    }

    let projections = horizons
        .iter()
        .map(|&years| project_costs(years, inputs, &breakdown, &recurring_costs, cash_to_close))
        .collect::<WellnessResult<Vec<_>>>()?;

    if breakdown.principal < Decimal::ZERO {
        warnings.push("First payment does not cover interest; the loan negatively amortizes.".into());
    }

    let output = HomeCostOutput {
        down_payment_amount,
        loan_amount,
        recurring_costs,
        breakdown,
        principal_and_interest,
        closing_costs,
        cash_to_close,
        monthly_cost_of_ownership,
        lifetime_interest,
        pmi_lifetime_estimate,
        pmi_estimate_years: PMI_ESTIMATE_YEARS,
        projections,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "payment": "fixed-rate annuity on the loan amount",
        "breakdown": "first amortization period only",
        "projections": "first-month snapshot extrapolated linearly",
        "pmi": format!(
            "binary at {PMI_EXEMPT_DOWN_PAYMENT_PERCENT}% down, estimated for {PMI_ESTIMATE_YEARS} years"
        ),
        "cost_assumptions": &input.assumptions,
        "closing_cost_schedule": &input.closing_costs,
    });

    Ok(with_metadata(
        "Home Ownership Cost Analysis",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Extrapolate the monthly snapshot over `years`.
pub fn project_costs(
    years: u32,
    inputs: &MortgageInputs,
    breakdown: &MortgageBreakdown,
    costs: &RecurringCosts,
    cash_to_close: Money,
) -> WellnessResult<CostProjection> {
    let months = years * 12;
    let loan_months = months.min(inputs.number_of_payments());
    let pmi_months = months.min(PMI_ESTIMATE_YEARS * 12);

    let mortgage_payments = breakdown.principal_and_interest() * Decimal::from(loan_months);
    let mortgage_insurance = breakdown.pmi * Decimal::from(pmi_months);
    let escrow_and_fees =
        (breakdown.taxes + breakdown.insurance + breakdown.hoa) * Decimal::from(months);
    let living_costs = (costs.utilities + costs.maintenance) * Decimal::from(months);
    let total_cost = mortgage_payments + mortgage_insurance + escrow_and_fees + living_costs;
    let remaining_loan_balance = time_value::remaining_balance(
        inputs.loan_amount(),
        time_value::monthly_rate(inputs.annual_interest_rate_percent),
        breakdown.principal_and_interest(),
        loan_months,
    )?
    .round_dp(2);

    Ok(CostProjection {
        years,
        mortgage_payments,
        mortgage_insurance,
        escrow_and_fees,
        living_costs,
        total_cost,
        total_with_cash_to_close: total_cost + cash_to_close,
        remaining_loan_balance,
    })
}

//! Stateful form model for the calculator.
//!
//! Every setter validates the candidate inputs, then re-derives the whole
//! snapshot before returning. Nothing price-dependent is stored separately,
//! so a failed setter leaves the previous state untouched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::assumptions::{
    ClosingCostSchedule, CostAssumptions, CostField, CostOverrides, MortgageInputs,
    RecurringCosts,
};
use super::breakdown::{compute_breakdown, resolve_recurring_costs, MortgageBreakdown};
use super::closing_costs::{compute_closing_costs, ClosingCosts};
use crate::types::{Money, Percent};
use crate::WellnessResult;

/// Everything the calculator shows for the current inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorSnapshot {
    pub down_payment_amount: Money,
    pub loan_amount: Money,
    pub recurring_costs: RecurringCosts,
    pub closing_costs: ClosingCosts,
    pub breakdown: MortgageBreakdown,
    pub cash_to_close: Money,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct HomeCostCalculator {
    inputs: MortgageInputs,
    assumptions: CostAssumptions,
    overrides: CostOverrides,
    schedule: ClosingCostSchedule,
    snapshot: CalculatorSnapshot,
}

impl HomeCostCalculator {
    pub fn new(
        inputs: MortgageInputs,
        assumptions: CostAssumptions,
        schedule: ClosingCostSchedule,
    ) -> WellnessResult<Self> {
        let overrides = CostOverrides::default();
        let snapshot = derive_snapshot(&inputs, &assumptions, &overrides, &schedule)?;
        Ok(Self {
            inputs,
            assumptions,
            overrides,
            schedule,
            snapshot,
        })
    }

    pub fn inputs(&self) -> &MortgageInputs {
        &self.inputs
    }

    pub fn overrides(&self) -> &CostOverrides {
        &self.overrides
    }

    pub fn snapshot(&self) -> &CalculatorSnapshot {
        &self.snapshot
    }

    pub fn set_home_price(&mut self, home_price: Money) -> WellnessResult<&CalculatorSnapshot> {
        let mut inputs = self.inputs.clone();
        inputs.home_price = home_price;
        self.apply(inputs, self.overrides.clone())
    }

    pub fn set_down_payment_percent(
        &mut self,
        percent: Percent,
    ) -> WellnessResult<&CalculatorSnapshot> {
        let mut inputs = self.inputs.clone();
        inputs.down_payment_percent = percent;
        self.apply(inputs, self.overrides.clone())
    }

    pub fn set_loan_term_years(&mut self, years: u32) -> WellnessResult<&CalculatorSnapshot> {
        let mut inputs = self.inputs.clone();
        inputs.loan_term_years = years;
        self.apply(inputs, self.overrides.clone())
    }

    pub fn set_interest_rate_percent(
        &mut self,
        percent: Percent,
    ) -> WellnessResult<&CalculatorSnapshot> {
        let mut inputs = self.inputs.clone();
        inputs.annual_interest_rate_percent = percent;
        self.apply(inputs, self.overrides.clone())
    }

    /// Manually edit a monthly cost. It stays fixed through later price
    /// changes until [`reset_cost`](Self::reset_cost) is called.
    pub fn set_cost(&mut self, field: CostField, amount: Money) -> WellnessResult<&CalculatorSnapshot> {
        let mut overrides = self.overrides.clone();
        overrides.set(field, Some(amount));
        self.apply(self.inputs.clone(), overrides)
    }

    /// Return a monthly cost to its derived default.
    pub fn reset_cost(&mut self, field: CostField) -> WellnessResult<&CalculatorSnapshot> {
        let mut overrides = self.overrides.clone();
        overrides.set(field, None);
        self.apply(self.inputs.clone(), overrides)
    }

    pub fn set_closing_cost_schedule(
        &mut self,
        schedule: ClosingCostSchedule,
    ) -> WellnessResult<&CalculatorSnapshot> {
        let snapshot = derive_snapshot(&self.inputs, &self.assumptions, &self.overrides, &schedule)?;
        self.schedule = schedule;
        self.snapshot = snapshot;
        Ok(&self.snapshot)
    }

    fn apply(
        &mut self,
        inputs: MortgageInputs,
        overrides: CostOverrides,
    ) -> WellnessResult<&CalculatorSnapshot> {
        let snapshot = derive_snapshot(&inputs, &self.assumptions, &overrides, &self.schedule)?;
        debug!(
            home_price = %inputs.home_price,
            down_payment_percent = %inputs.down_payment_percent,
            total = %snapshot.breakdown.total,
            "recalculated"
        );
        self.inputs = inputs;
        self.overrides = overrides;
        self.snapshot = snapshot;
        Ok(&self.snapshot)
    }
}

fn derive_snapshot(
    inputs: &MortgageInputs,
    assumptions: &CostAssumptions,
    overrides: &CostOverrides,
    schedule: &ClosingCostSchedule,
) -> WellnessResult<CalculatorSnapshot> {
    let mut warnings = Vec::new();
    inputs.validate(&mut warnings)?;
    overrides.validate()?;
    assumptions.validate()?;
    schedule.validate()?;

    let recurring_costs = resolve_recurring_costs(inputs, assumptions, overrides);
    let breakdown = compute_breakdown(inputs, &recurring_costs)?;
    let closing_costs = compute_closing_costs(inputs, schedule);
    let down_payment_amount = inputs.down_payment_amount();

    Ok(CalculatorSnapshot {
        down_payment_amount,
        loan_amount: inputs.loan_amount(),
        cash_to_close: down_payment_amount + closing_costs.total_closing_costs,
        recurring_costs,
        closing_costs,
        breakdown,
        warnings,
    })
}

//! Home ownership cost calculator: first-payment mortgage breakdown,
//! closing costs, cash to close and linear multi-year projections.
//!
//! All math in `rust_decimal::Decimal`; nothing here does I/O.

pub mod analysis;
pub mod assumptions;
pub mod breakdown;
pub mod calculator;
pub mod closing_costs;
pub mod schedule;

pub use analysis::{analyze_home_costs, HomeCostInput, HomeCostOutput};
pub use assumptions::{
    ClosingCostSchedule, CostAssumptions, CostField, CostOverrides, MortgageInputs,
    RecurringCosts,
};
pub use breakdown::{compute_breakdown, default_recurring_costs, MortgageBreakdown};
pub use calculator::HomeCostCalculator;
pub use closing_costs::{compute_closing_costs, ClosingCosts};

#![cfg(feature = "mortgage")]

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wellness_core::mortgage::analysis::{analyze_home_costs, HomeCostInput};
use wellness_core::mortgage::{
    compute_breakdown, default_recurring_costs, ClosingCostSchedule, CostAssumptions,
    CostOverrides, HomeCostCalculator, MortgageInputs,
};

fn inputs(price: Decimal, down: Decimal, years: u32, rate: Decimal) -> MortgageInputs {
    MortgageInputs {
        home_price: price,
        down_payment_percent: down,
        loan_term_years: years,
        annual_interest_rate_percent: rate,
    }
}

// ===========================================================================
// Reference values
// ===========================================================================

#[test]
fn test_reference_payment_280k_thirty_year() {
    // 350k price with 20% down leaves a 280k loan.
    // Standard annuity: 280000 * r(1+r)^360 / ((1+r)^360 - 1), r = 0.065/12
    // ≈ 1769.79; the calculator's published example quotes ≈ 1769.12.
    let i = inputs(dec!(350000), dec!(20), 30, dec!(6.5));
    let costs = default_recurring_costs(&i, &CostAssumptions::default());
    let b = compute_breakdown(&i, &costs).unwrap();
    let pi = b.principal_and_interest();
    assert!((pi - dec!(1769.79)).abs() < dec!(0.05), "got {pi}");
    assert!((pi - dec!(1769.12)).abs() < dec!(1.0), "got {pi}");
}

#[test]
fn test_fifteen_year_reference() {
    // 200k at 5% over 15 years ≈ 1581.59
    let i = inputs(dec!(250000), dec!(20), 15, dec!(5));
    let costs = default_recurring_costs(&i, &CostAssumptions::default());
    let b = compute_breakdown(&i, &costs).unwrap();
    assert!((b.principal_and_interest() - dec!(1581.59)).abs() < dec!(0.05));
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_down_payment_plus_loan_equals_price() {
    let prices = [dec!(85000), dec!(349999.99), dec!(1250000), dec!(612345.67)];
    let downs = [dec!(3), dec!(3.5), dec!(10), dec!(19.99), dec!(20), dec!(47.25), dec!(100)];
    for price in prices {
        for down in downs {
            let i = inputs(price, down, 30, dec!(6));
            assert_eq!(i.down_payment_amount() + i.loan_amount(), price);
        }
    }
}

#[test]
fn test_no_pmi_at_or_above_twenty_percent() {
    for down in [dec!(20), dec!(25), dec!(50), dec!(100)] {
        let i = inputs(dec!(400000), down, 30, dec!(7));
        let overrides = CostOverrides {
            mortgage_insurance: Some(dec!(250)),
            ..Default::default()
        };
        let out = analyze_home_costs(&HomeCostInput {
            mortgage: i,
            assumptions: CostAssumptions::default(),
            overrides,
            closing_costs: ClosingCostSchedule::default(),
            projection_years: vec![],
        })
        .unwrap()
        .result;
        assert_eq!(out.recurring_costs.mortgage_insurance, Decimal::ZERO);
        assert_eq!(out.breakdown.pmi, Decimal::ZERO);
        assert_eq!(out.pmi_lifetime_estimate, Decimal::ZERO);
    }
}

#[test]
fn test_total_is_sum_of_parts() {
    for (down, rate) in [(dec!(5), dec!(6.5)), (dec!(20), dec!(0)), (dec!(35), dec!(11.25))] {
        let i = inputs(dec!(475000), down, 30, rate);
        let costs = default_recurring_costs(&i, &CostAssumptions::default());
        let b = compute_breakdown(&i, &costs).unwrap();
        let sum = b.principal + b.interest + b.pmi + b.taxes + b.insurance + b.hoa;
        assert!((b.total - sum).abs() < dec!(0.000000000001), "{} vs {}", b.total, sum);
    }
}

#[test]
fn test_breakdown_is_idempotent() {
    let i = inputs(dec!(525000), dec!(12), 30, dec!(6.875));
    let costs = default_recurring_costs(&i, &CostAssumptions::default());
    let first = compute_breakdown(&i, &costs).unwrap();
    let second = compute_breakdown(&i, &costs).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_zero_term_is_error() {
    let i = inputs(dec!(300000), dec!(20), 0, dec!(0));
    let costs = default_recurring_costs(&i, &CostAssumptions::default());
    assert!(compute_breakdown(&i, &costs).is_err());
}

// ===========================================================================
// Stateful calculator
// ===========================================================================

#[test]
fn test_calculator_keeps_loan_invariant_through_edits() {
    let mut calc = HomeCostCalculator::new(
        inputs(dec!(300000), dec!(5), 30, dec!(6)),
        CostAssumptions::default(),
        ClosingCostSchedule::default(),
    )
    .unwrap();

    calc.set_home_price(dec!(410000)).unwrap();
    calc.set_down_payment_percent(dec!(15)).unwrap();
    calc.set_interest_rate_percent(dec!(5.75)).unwrap();
    let snap = calc.set_loan_term_years(15).unwrap();

    assert_eq!(snap.loan_amount, dec!(410000) - snap.down_payment_amount);
    assert_eq!(snap.closing_costs.loan_origination, snap.loan_amount * dec!(0.01));
    assert_eq!(snap.closing_costs.transfer_taxes, dec!(410000) * dec!(0.004));
    assert_eq!(snap.cash_to_close, snap.down_payment_amount + snap.closing_costs.total_closing_costs);
}

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::WellnessError;
use crate::types::{Money, Percent, Rate};
use crate::WellnessResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Convert an annual percentage (6.5 = 6.5%) into a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / MONTHS_PER_YEAR
}

/// Level payment that amortizes `principal` over `nper` periods at `rate`
/// per period. Returned as a positive amount.
pub fn annuity_payment(principal: Money, rate: Rate, nper: u32) -> WellnessResult<Money> {
    if nper == 0 {
        return Err(WellnessError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    if rate < Decimal::ZERO {
        return Err(WellnessError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate cannot be negative".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = growth_factor(rate, nper)?;
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(WellnessError::DivisionByZero {
            context: "annuity payment factor".into(),
        });
    }

    // rate * factor / (factor - 1) stays close to `rate`, so scaling the
    // principal last keeps large loans in range
    let per_unit = rate
        .checked_mul(factor)
        .ok_or_else(|| overflow("rate"))?
        / denominator;
    principal.checked_mul(per_unit).ok_or_else(|| overflow("principal"))
}

/// Outstanding balance after `periods` level payments, floored at zero.
pub fn remaining_balance(
    principal: Money,
    rate: Rate,
    payment: Money,
    periods: u32,
) -> WellnessResult<Money> {
    if rate.is_zero() {
        let paid = payment
            .checked_mul(Decimal::from(periods))
            .ok_or_else(|| overflow("payment"))?;
        return Ok((principal - paid).max(Decimal::ZERO));
    }

    // B_k = F_k * (P - pmt/r) + pmt/r. For an amortizing payment the
    // bracket is small, so no term grows past the principal.
    let factor = growth_factor(rate, periods)?;
    let payoff = payment / rate;
    let balance = factor
        .checked_mul(principal - payoff)
        .and_then(|grown| grown.checked_add(payoff))
        .ok_or_else(|| overflow("principal"))?;
    Ok(balance.max(Decimal::ZERO))
}

/// (1 + rate)^periods
fn growth_factor(rate: Rate, periods: u32) -> WellnessResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| overflow("rate"))
}

fn overflow(field: &str) -> WellnessError {
    WellnessError::InvalidInput {
        field: field.into(),
        reason: "Amount is too large to calculate with.".into(),
    }
}

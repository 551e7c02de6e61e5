use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::WellnessError;
use crate::types::{Money, Percent, Rate};
use crate::WellnessResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Down payment (in percent) at or above which no PMI is charged.
pub const PMI_EXEMPT_DOWN_PAYMENT_PERCENT: Decimal = dec!(20);

/// Smallest down payment the calculator accepts, in percent.
pub const MIN_DOWN_PAYMENT_PERCENT: Decimal = dec!(3);

/// Loan terms offered by the calculator form.
pub const STANDARD_TERMS_YEARS: [u32; 2] = [15, 30];

const MAX_TERM_YEARS: u32 = 50;

/// Largest home price (and flat monthly or one-off amount) accepted.
pub const MAX_HOME_PRICE: Money = dec!(1_000_000_000_000);

// ---------------------------------------------------------------------------
// Purchase parameters
// ---------------------------------------------------------------------------

/// Purchase parameters for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageInputs {
    pub home_price: Money,
    /// Down payment as a whole percentage of the price (20 = 20%)
    pub down_payment_percent: Percent,
    pub loan_term_years: u32,
    /// Annual interest rate as a whole percentage (6.5 = 6.5%)
    pub annual_interest_rate_percent: Percent,
}

impl MortgageInputs {
    pub fn down_payment_amount(&self) -> Money {
        self.home_price * self.down_payment_percent / dec!(100)
    }

    /// Always `home_price - down_payment_amount`.
    pub fn loan_amount(&self) -> Money {
        self.home_price - self.down_payment_amount()
    }

    pub fn number_of_payments(&self) -> u32 {
        self.loan_term_years * 12
    }

    pub fn requires_pmi(&self) -> bool {
        self.down_payment_percent < PMI_EXEMPT_DOWN_PAYMENT_PERCENT
    }

    /// Reject inputs the formulas cannot handle, pushing soft issues onto
    /// `warnings`.
    pub fn validate(&self, warnings: &mut Vec<String>) -> WellnessResult<()> {
        if self.home_price <= Decimal::ZERO {
            return Err(WellnessError::invalid(
                "home_price",
                "Home price must be positive.",
            ));
        }
        if self.home_price > MAX_HOME_PRICE {
            return Err(WellnessError::invalid(
                "home_price",
                format!("Home price cannot exceed {MAX_HOME_PRICE}."),
            ));
        }
        if self.down_payment_percent < MIN_DOWN_PAYMENT_PERCENT
            || self.down_payment_percent > dec!(100)
        {
            return Err(WellnessError::invalid(
                "down_payment_percent",
                format!("Down payment must be between {MIN_DOWN_PAYMENT_PERCENT}% and 100%."),
            ));
        }
        if self.loan_term_years == 0 {
            return Err(WellnessError::invalid(
                "loan_term_years",
                "Loan term must be at least one year.",
            ));
        }
        if self.loan_term_years > MAX_TERM_YEARS {
            return Err(WellnessError::invalid(
                "loan_term_years",
                format!("Loan term cannot exceed {MAX_TERM_YEARS} years."),
            ));
        }
        if self.annual_interest_rate_percent < Decimal::ZERO
            || self.annual_interest_rate_percent > dec!(100)
        {
            return Err(WellnessError::invalid(
                "annual_interest_rate_percent",
                "Interest rate must be between 0% and 100%.",
            ));
        }

        if !STANDARD_TERMS_YEARS.contains(&self.loan_term_years) {
            warnings.push(format!(
                "Non-standard loan term of {} years; the form offers 15 or 30.",
                self.loan_term_years
            ));
        }
        if self.annual_interest_rate_percent.is_zero() {
            warnings.push("Zero interest rate: payments are straight-line principal.".into());
        }
        if self.requires_pmi() {
            warnings.push(format!(
                "Down payment of {}% is below {}%; PMI applies.",
                self.down_payment_percent, PMI_EXEMPT_DOWN_PAYMENT_PERCENT
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Recurring-cost assumptions
// ---------------------------------------------------------------------------

/// Rates used to derive the default monthly costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostAssumptions {
    /// Annual property tax as a fraction of the home price
    pub property_tax_rate: Rate,
    /// Annual homeowners insurance as a fraction of the home price
    pub insurance_rate: Rate,
    /// Annual PMI premium as a fraction of the loan amount
    pub pmi_rate: Rate,
    /// Annual maintenance reserve as a fraction of the home price
    pub maintenance_rate: Rate,
    pub hoa_fees_monthly: Money,
    pub utilities_monthly: Money,
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            property_tax_rate: dec!(0.012),
            insurance_rate: dec!(0.005),
            pmi_rate: dec!(0.005),
            maintenance_rate: dec!(0.01),
            hoa_fees_monthly: Decimal::ZERO,
            utilities_monthly: dec!(250),
        }
    }
}

impl CostAssumptions {
    pub fn validate(&self) -> WellnessResult<()> {
        check_rate("property_tax_rate", self.property_tax_rate)?;
        check_rate("insurance_rate", self.insurance_rate)?;
        check_rate("pmi_rate", self.pmi_rate)?;
        check_rate("maintenance_rate", self.maintenance_rate)?;
        check_amount("hoa_fees_monthly", self.hoa_fees_monthly)?;
        check_amount("utilities_monthly", self.utilities_monthly)
    }
}

/// Monthly recurring costs of owning the home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringCosts {
    pub property_tax: Money,
    pub homeowners_insurance: Money,
    /// Zero whenever the down payment is at least 20%
    pub mortgage_insurance: Money,
    pub hoa_fees: Money,
    pub utilities: Money,
    pub maintenance: Money,
}

/// Which recurring cost a manual edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostField {
    PropertyTax,
    HomeownersInsurance,
    MortgageInsurance,
    HoaFees,
    Utilities,
    Maintenance,
}

/// Manually edited monthly amounts. `None` keeps the derived default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostOverrides {
    pub property_tax: Option<Money>,
    pub homeowners_insurance: Option<Money>,
    pub mortgage_insurance: Option<Money>,
    pub hoa_fees: Option<Money>,
    pub utilities: Option<Money>,
    pub maintenance: Option<Money>,
}

impl CostOverrides {
    pub fn set(&mut self, field: CostField, value: Option<Money>) {
        let slot = match field {
            CostField::PropertyTax => &mut self.property_tax,
            CostField::HomeownersInsurance => &mut self.homeowners_insurance,
            CostField::MortgageInsurance => &mut self.mortgage_insurance,
            CostField::HoaFees => &mut self.hoa_fees,
            CostField::Utilities => &mut self.utilities,
            CostField::Maintenance => &mut self.maintenance,
        };
        *slot = value;
    }

    pub fn validate(&self) -> WellnessResult<()> {
        let fields = [
            ("property_tax", self.property_tax),
            ("homeowners_insurance", self.homeowners_insurance),
            ("mortgage_insurance", self.mortgage_insurance),
            ("hoa_fees", self.hoa_fees),
            ("utilities", self.utilities),
            ("maintenance", self.maintenance),
        ];
        for (name, value) in fields {
            if let Some(amount) = value {
                check_amount(name, amount)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Closing-cost schedule
// ---------------------------------------------------------------------------

/// Flat fees and scaling rates behind the eight closing-cost line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosingCostSchedule {
    /// Fraction of the loan amount
    pub origination_rate: Rate,
    pub appraisal: Money,
    pub credit_report: Money,
    pub title_insurance: Money,
    pub recording_fees: Money,
    /// Fraction of the home price
    pub transfer_tax_rate: Rate,
    pub home_inspection: Money,
    pub other: Money,
}

impl Default for ClosingCostSchedule {
    fn default() -> Self {
        Self {
            origination_rate: dec!(0.01),
            appraisal: dec!(500),
            credit_report: dec!(50),
            title_insurance: dec!(1500),
            recording_fees: dec!(125),
            transfer_tax_rate: dec!(0.004),
            home_inspection: dec!(400),
            other: dec!(500),
        }
    }
}

impl ClosingCostSchedule {
    pub fn validate(&self) -> WellnessResult<()> {
        check_rate("origination_rate", self.origination_rate)?;
        check_rate("transfer_tax_rate", self.transfer_tax_rate)?;
        let flat = [
            ("appraisal", self.appraisal),
            ("credit_report", self.credit_report),
            ("title_insurance", self.title_insurance),
            ("recording_fees", self.recording_fees),
            ("home_inspection", self.home_inspection),
            ("other", self.other),
        ];
        for (name, amount) in flat {
            check_amount(name, amount)?;
        }
        Ok(())
    }
}

/// Annual fraction between 0 and 1.
fn check_rate(field: &str, rate: Rate) -> WellnessResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(WellnessError::invalid(field, "Rate must be between 0 and 1."));
    }
    Ok(())
}

fn check_amount(field: &str, amount: Money) -> WellnessResult<()> {
    if amount < Decimal::ZERO {
        return Err(WellnessError::invalid(field, "Amount cannot be negative."));
    }
    if amount > MAX_HOME_PRICE {
        return Err(WellnessError::invalid(
            field,
            format!("Amount cannot exceed {MAX_HOME_PRICE}."),
        ));
    }
    Ok(())
}

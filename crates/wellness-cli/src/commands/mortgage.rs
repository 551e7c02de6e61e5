use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::Value;

use wellness_core::mortgage::schedule::{amortization_schedule, yearly_summary};
use wellness_core::mortgage::{
    self, compute_closing_costs, ClosingCostSchedule, CostAssumptions, CostField, CostOverrides,
    HomeCostInput, MortgageInputs,
};

use crate::config::{AppContext, WellnessConfig};
use crate::input;

/// Purchase parameters shared by the mortgage commands
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PurchaseArgs {
    /// Purchase price of the home
    #[arg(long)]
    pub home_price: Option<Decimal>,

    /// Down payment as a percentage of the price (20 = 20%)
    #[arg(long, alias = "down", default_value = "20")]
    pub down_payment: Decimal,

    /// Loan term in years
    #[arg(long, alias = "term", default_value = "30")]
    pub term_years: u32,

    /// Annual interest rate as a percentage (6.5 = 6.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,
}

impl PurchaseArgs {
    fn to_inputs(&self) -> Result<MortgageInputs, Box<dyn std::error::Error>> {
        Ok(MortgageInputs {
            home_price: self
                .home_price
                .ok_or("--home-price is required (or provide --input)")?,
            down_payment_percent: self.down_payment,
            loan_term_years: self.term_years,
            annual_interest_rate_percent: self.rate.unwrap_or(dec!(6.5)),
        })
    }
}

/// Arguments for the home cost analysis
#[derive(Args)]
pub struct MortgageArgs {
    #[command(flatten)]
    pub purchase: PurchaseArgs,

    /// Monthly property tax override
    #[arg(long)]
    pub property_tax: Option<Decimal>,

    /// Monthly homeowners insurance override
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Monthly PMI override (ignored at 20% down or more)
    #[arg(long)]
    pub pmi: Option<Decimal>,

    /// Monthly HOA fees
    #[arg(long)]
    pub hoa: Option<Decimal>,

    /// Monthly utilities override
    #[arg(long)]
    pub utilities: Option<Decimal>,

    /// Monthly maintenance override
    #[arg(long)]
    pub maintenance: Option<Decimal>,

    /// Projection horizons in years, comma separated
    #[arg(long, value_delimiter = ',')]
    pub years: Vec<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct AmortizationArgs {
    #[command(flatten)]
    pub purchase: PurchaseArgs,

    /// Summarise by year instead of listing every payment
    #[arg(long)]
    pub yearly: bool,

    /// Path to JSON file with mortgage inputs
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the closing cost estimate
#[derive(Args)]
pub struct ClosingCostsArgs {
    #[command(flatten)]
    pub purchase: PurchaseArgs,

    /// Path to JSON file with mortgage inputs
    #[arg(long)]
    pub input: Option<String>,
}

/// JSON body for `mortgage --input` or stdin. Sections left out fall back
/// to the config file.
#[derive(Debug, Deserialize)]
pub struct HomeCostRequest {
    pub mortgage: MortgageInputs,
    pub assumptions: Option<CostAssumptions>,
    #[serde(default)]
    pub overrides: CostOverrides,
    pub closing_costs: Option<ClosingCostSchedule>,
    #[serde(default)]
    pub projection_years: Vec<u32>,
}

impl HomeCostRequest {
    fn into_input(self, config: &WellnessConfig) -> HomeCostInput {
        HomeCostInput {
            mortgage: self.mortgage,
            assumptions: self
                .assumptions
                .unwrap_or_else(|| config.cost_assumptions.clone()),
            overrides: self.overrides,
            closing_costs: self
                .closing_costs
                .unwrap_or_else(|| config.closing_costs.clone()),
            projection_years: self.projection_years,
        }
    }
}

impl MortgageArgs {
    fn into_input(self, config: &WellnessConfig) -> Result<HomeCostInput, Box<dyn std::error::Error>> {
        let mut overrides = CostOverrides::default();
        let edits = [
            (CostField::PropertyTax, self.property_tax),
            (CostField::HomeownersInsurance, self.insurance),
            (CostField::MortgageInsurance, self.pmi),
            (CostField::HoaFees, self.hoa),
            (CostField::Utilities, self.utilities),
            (CostField::Maintenance, self.maintenance),
        ];
        for (field, value) in edits {
            if value.is_some() {
                overrides.set(field, value);
            }
        }

        Ok(HomeCostInput {
            mortgage: self.purchase.to_inputs()?,
            assumptions: config.cost_assumptions.clone(),
            overrides,
            closing_costs: config.closing_costs.clone(),
            projection_years: self.years,
        })
    }
}

pub fn run_mortgage(args: MortgageArgs, ctx: &AppContext) -> Result<Value, Box<dyn std::error::Error>> {
    let input = if let Some(ref path) = args.input {
        input::file::read_json::<HomeCostRequest>(path)?.into_input(&ctx.config)
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value::<HomeCostRequest>(data)?.into_input(&ctx.config)
    } else {
        args.into_input(&ctx.config)?
    };

    let result = mortgage::analyze_home_costs(&input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_amortization(args: AmortizationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = read_inputs(args.input.as_deref(), &args.purchase)?;
    let mut warnings = Vec::new();
    inputs.validate(&mut warnings)?;

    let rows = amortization_schedule(&inputs)?;
    if args.yearly {
        Ok(serde_json::to_value(yearly_summary(&rows))?)
    } else {
        Ok(serde_json::to_value(rows)?)
    }
}

pub fn run_closing_costs(args: ClosingCostsArgs, ctx: &AppContext) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = read_inputs(args.input.as_deref(), &args.purchase)?;
    let mut warnings = Vec::new();
    inputs.validate(&mut warnings)?;

    ctx.config.closing_costs.validate()?;

    let costs = compute_closing_costs(&inputs, &ctx.config.closing_costs);
    let cash_to_close = inputs.down_payment_amount() + costs.total_closing_costs;
    let items: Vec<Value> = costs
        .line_items()
        .iter()
        .map(|(label, amount)| serde_json::json!({ "item": label, "amount": amount }))
        .collect();

    Ok(serde_json::json!({
        "down_payment_amount": inputs.down_payment_amount(),
        "total_closing_costs": costs.total_closing_costs,
        "cash_to_close": cash_to_close,
        "line_items": items,
        "warnings": warnings,
    }))
}

fn read_inputs(path: Option<&str>, purchase: &PurchaseArgs) -> Result<MortgageInputs, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return input::file::read_json(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    purchase.to_inputs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn purchase() -> PurchaseArgs {
        PurchaseArgs {
            home_price: Some(dec!(350000)),
            down_payment: dec!(20),
            term_years: 30,
            rate: Some(dec!(6.5)),
        }
    }

    fn mortgage_args(input: Option<String>) -> MortgageArgs {
        MortgageArgs {
            purchase: purchase(),
            property_tax: None,
            insurance: None,
            pmi: None,
            hoa: Some(dec!(75)),
            utilities: None,
            maintenance: None,
            years: vec![],
            input,
        }
    }

    /// Config with utilities at 999/month and no "other" closing fee.
    fn configured() -> AppContext {
        let mut config = WellnessConfig::default();
        config.cost_assumptions.utilities_monthly = dec!(999);
        config.closing_costs.other = Decimal::ZERO;
        AppContext {
            config,
            data_dir: PathBuf::from(".wellness"),
        }
    }

    fn num(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    fn write_input(dir: &Path, body: &str) -> String {
        let path = dir.join("input.json");
        std::fs::write(&path, body).unwrap();
        path.display().to_string()
    }

    const MORTGAGE_ONLY: &str = r#"{"mortgage": {"home_price": 350000,
        "down_payment_percent": 20, "loan_term_years": 30,
        "annual_interest_rate_percent": 6.5}}"#;

    #[test]
    fn test_purchase_requires_price() {
        let args = PurchaseArgs {
            home_price: None,
            ..purchase()
        };
        assert!(args.to_inputs().is_err());
    }

    #[test]
    fn test_purchase_rate_default() {
        let args = PurchaseArgs {
            rate: None,
            ..purchase()
        };
        assert_eq!(args.to_inputs().unwrap().annual_interest_rate_percent, dec!(6.5));
    }

    #[test]
    fn test_mortgage_input_file_falls_back_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(dir.path(), MORTGAGE_ONLY);

        let value = run_mortgage(mortgage_args(Some(path)), &configured()).unwrap();
        let result = &value["result"];
        assert_eq!(num(&result["recurring_costs"]["utilities"]), dec!(999));
        assert_eq!(num(&result["closing_costs"]["other"]), dec!(0));
    }

    #[test]
    fn test_mortgage_input_file_sections_win_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"{"mortgage": {"home_price": 350000,
            "down_payment_percent": 20, "loan_term_years": 30,
            "annual_interest_rate_percent": 6.5},
            "assumptions": {"utilities_monthly": "180"}}"#;
        let path = write_input(dir.path(), body);

        let value = run_mortgage(mortgage_args(Some(path)), &configured()).unwrap();
        let result = &value["result"];
        assert_eq!(num(&result["recurring_costs"]["utilities"]), dec!(180));
        assert_eq!(num(&result["closing_costs"]["other"]), dec!(0));
    }

    #[test]
    fn test_mortgage_flags_use_config_and_overrides() {
        let input = mortgage_args(None).into_input(&configured().config).unwrap();
        assert_eq!(input.assumptions.utilities_monthly, dec!(999));
        assert_eq!(input.closing_costs.other, Decimal::ZERO);
        assert_eq!(input.overrides.hoa_fees, Some(dec!(75)));
        assert_eq!(input.overrides.utilities, None);
    }

    #[test]
    fn test_closing_costs_handler_uses_config_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(
            dir.path(),
            r#"{"home_price": 350000, "down_payment_percent": 20,
                "loan_term_years": 30, "annual_interest_rate_percent": 6.5}"#,
        );
        let args = ClosingCostsArgs {
            purchase: purchase(),
            input: Some(path),
        };

        let value = run_closing_costs(args, &configured()).unwrap();
        // 2800 origination + 500 + 50 + 1500 + 125 + 1400 transfer + 400, no "other"
        assert_eq!(num(&value["total_closing_costs"]), dec!(6775.000));
        assert_eq!(num(&value["cash_to_close"]), dec!(76775.000));
    }

    #[test]
    fn test_amortization_handler_yearly() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(
            dir.path(),
            r#"{"home_price": 250000, "down_payment_percent": 20,
                "loan_term_years": 15, "annual_interest_rate_percent": 5.5}"#,
        );
        let args = AmortizationArgs {
            purchase: purchase(),
            yearly: true,
            input: Some(path),
        };

        let value = run_amortization(args).unwrap();
        let years = value.as_array().unwrap();
        assert_eq!(years.len(), 15);
        assert_eq!(num(&years[14]["ending_balance"]), dec!(0));
    }
}

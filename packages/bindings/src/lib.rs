use chrono::Utc;
use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use wellness_core::emergency::checklist::{self, ChecklistItem, ChecklistKind};
use wellness_core::journal::{JournalEntry, LexiconAnalyzer, MoodAnalyzer};
use wellness_core::mortgage::schedule;
use wellness_core::mortgage::{HomeCostInput, MortgageInputs, RecurringCosts};
use wellness_core::yoga::{self, PracticeSession};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Home costs
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_home_costs(input_json: String) -> NapiResult<String> {
    let input: HomeCostInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wellness_core::mortgage::analyze_home_costs(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct BreakdownRequest {
    mortgage: MortgageInputs,
    recurring_costs: RecurringCosts,
}

/// First-month breakdown for inputs and already-resolved recurring costs.
#[napi]
pub fn compute_breakdown(input_json: String) -> NapiResult<String> {
    let req: BreakdownRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let mut warnings = Vec::new();
    req.mortgage.validate(&mut warnings).map_err(to_napi_error)?;
    let output = wellness_core::mortgage::compute_breakdown(&req.mortgage, &req.recurring_costs)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let inputs: MortgageInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let mut warnings = Vec::new();
    inputs.validate(&mut warnings).map_err(to_napi_error)?;
    let rows = schedule::amortization_schedule(&inputs).map_err(to_napi_error)?;
    serde_json::to_string(&rows).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Journal
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_sentiment(text: String) -> NapiResult<String> {
    let analysis = LexiconAnalyzer::new().analyze(&text).map_err(to_napi_error)?;
    serde_json::to_string(&analysis).map_err(to_napi_error)
}

/// Insights over the stored entries array, as of now.
#[napi]
pub fn journal_insights(entries_json: String) -> NapiResult<String> {
    let entries: Vec<JournalEntry> = serde_json::from_str(&entries_json).map_err(to_napi_error)?;
    let insights = wellness_core::journal::journal_insights(&entries, Utc::now());
    serde_json::to_string(&insights).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Emergency
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ChecklistRequest {
    kind: ChecklistKind,
    items: Vec<ChecklistItem>,
}

#[napi]
pub fn group_checklist(input_json: String) -> NapiResult<String> {
    let req: ChecklistRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({
        "groups": checklist::group_items(req.kind, &req.items),
        "progress": checklist::progress(req.kind, &req.items),
    }))
    .map_err(to_napi_error)
}

#[napi]
pub fn default_checklist(kind: String) -> NapiResult<String> {
    let kind: ChecklistKind = kind.parse().map_err(to_napi_error)?;
    serde_json::to_string(&kind.default_items()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Yoga
// ---------------------------------------------------------------------------

#[napi]
pub fn yoga_progress(sessions_json: String) -> NapiResult<String> {
    let sessions: Vec<PracticeSession> =
        serde_json::from_str(&sessions_json).map_err(to_napi_error)?;
    serde_json::to_string(&yoga::progress_summary(&sessions)).map_err(to_napi_error)
}

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// The roster document written for the viewer and the XLSX exporter.
/// Optional sections are omitted entirely when absent.
#[derive(Debug, Clone, Serialize)]
pub struct OutputDoc {
    #[serde(rename = "peopleOrder")]
    pub people_order: Vec<String>,
    pub assignments: Vec<Assignment>,
    pub matrix: Vec<MatrixRow>,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infeasible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Assignment {
    pub date: u32,
    #[serde(rename = "staffId")]
    pub staff_id: String,
    pub shift: String,
}

/// One date's row of the roster grid. Every staff id appears; the empty
/// string encodes "off".
#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub date: u32,
    pub shifts: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub shortage: Vec<SlotShortage>,
    pub overstaff: Vec<SlotOverstaff>,
    pub totals: Totals,
    pub diagnostics: SummaryDiagnostics,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotShortage {
    pub date: u32,
    pub slot: String,
    pub lack: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotOverstaff {
    pub date: u32,
    pub slot: String,
    pub excess: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Totals {
    pub assigned: u32,
    pub shortage: u32,
    pub excess: u32,
    #[serde(rename = "wishOffViolations")]
    pub wish_off_violations: u32,
    /// Legacy alias of `wishOffViolations`; always identical.
    #[serde(rename = "violatedPreferences")]
    pub violated_preferences: u32,
    #[serde(rename = "totalNeed")]
    pub total_need: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SummaryDiagnostics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demand: Option<DemandDiagnostics>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weekly: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub monthly: Vec<Value>,
    #[serde(rename = "wishOffConflicts", skip_serializing_if = "Vec::is_empty")]
    pub wish_off_conflicts: Vec<Value>,
    #[serde(rename = "wishOffConflictCount", skip_serializing_if = "Option::is_none")]
    pub wish_off_conflict_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemandDiagnostics {
    pub days: u32,
    #[serde(rename = "weekdayOfDay1")]
    pub weekday_of_day1: u8,
    #[serde(rename = "dayTypeSample")]
    pub day_type_sample: Vec<String>,
    #[serde(rename = "perDayTotals")]
    pub per_day_totals: Vec<PerDayTotal>,
    #[serde(rename = "totalNeed")]
    pub total_need: u32,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerDayTotal {
    pub date: u32,
    pub total: u32,
    pub slots: BTreeMap<String, u32>,
    #[serde(rename = "carryApplied")]
    pub carry_applied: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    pub availability: BTreeMap<String, BTreeMap<String, u32>>,
    #[serde(rename = "availabilityWarnings")]
    pub availability_warnings: Vec<AvailabilityWarning>,
    pub warnings: Vec<String>,
    pub flags: Flags,
    pub var_counts: VarCounts,
    #[serde(rename = "logOutput")]
    pub log_output: String,
    #[serde(rename = "unmetCandidates", skip_serializing_if = "Vec::is_empty")]
    pub unmet_candidates: Vec<UnmetCandidate>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AvailabilityWarning {
    pub date: u32,
    pub slot: String,
    pub need: u32,
    pub available: u32,
}

/// Slots whose demand exceeds the availability ceiling, reported when the
/// model is infeasible.
#[derive(Debug, Clone, Serialize)]
pub struct UnmetCandidate {
    pub date: u32,
    pub slot: String,
    pub need: u32,
    #[serde(rename = "maxPossible")]
    pub max_possible: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Flags {
    pub inconsistent_summary: bool,
    pub availability_warning: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct VarCounts {
    pub x: usize,
    pub shortage: usize,
    pub over: usize,
    #[serde(rename = "violateOff")]
    pub violate_off: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Value,
}

//! Request and response shapes for the tax endpoints.
//!
//! Wire names are camelCase: the surface predates this service and the
//! front-end depends on it.

use crate::models::TaxRecord;
use serde::{Deserialize, Serialize};
use tax_engine::{BreakdownEntry, Regime};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTaxRequest {
    #[validate(length(min = 1, max = 100, message = "Display name is required"))]
    pub display_name: String,

    pub gross_income: f64,

    #[serde(default)]
    pub regime: Regime,

    #[serde(default)]
    pub deductions: f64,
}

/// Echo of the computation, independent of the stored record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationData {
    pub display_name: String,
    pub gross_income: f64,
    pub regime: Regime,
    pub deductions: f64,
    pub taxable_income: f64,
    pub tax_amount: f64,
    pub effective_rate: f64,
    pub slab_breakdown: Vec<BreakdownEntry>,
}

impl From<&TaxRecord> for CalculationData {
    fn from(record: &TaxRecord) -> Self {
        Self {
            display_name: record.display_name.clone(),
            gross_income: record.gross_income,
            regime: record.regime,
            deductions: record.deductions,
            taxable_income: record.taxable_income,
            tax_amount: record.tax_amount,
            effective_rate: record.effective_rate,
            slab_breakdown: record.slab_breakdown.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTaxResponse {
    pub success: bool,
    pub data: CalculationData,
    pub record: TaxRecordResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRecordResponse {
    pub id: String,
    pub owner_id: String,
    pub display_name: String,
    pub gross_income: f64,
    pub regime: Regime,
    pub deductions: f64,
    pub taxable_income: f64,
    pub tax_amount: f64,
    pub effective_rate: f64,
    pub slab_breakdown: Vec<BreakdownEntry>,
    pub created_at: String,
}

impl From<TaxRecord> for TaxRecordResponse {
    fn from(record: TaxRecord) -> Self {
        Self {
            id: record.id,
            owner_id: record.owner_id,
            display_name: record.display_name,
            gross_income: record.gross_income,
            regime: record.regime,
            deductions: record.deductions,
            taxable_income: record.taxable_income,
            tax_amount: record.tax_amount,
            effective_rate: record.effective_rate,
            slab_breakdown: record.slab_breakdown,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    /// Case-insensitive substring match on the display name.
    pub name: Option<String>,
    pub regime: Option<Regime>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_records: u64,
    pub records_per_page: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub success: bool,
    pub records: Vec<TaxRecordResponse>,
    pub pagination: Pagination,
}

/// Aggregate over every record the caller owns. Also the decode target
/// for the repository's `$group` output, so the camelCase names double as
/// the pipeline's projected field names.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub count: i64,
    pub total_income: f64,
    pub total_tax: f64,
    pub avg_tax_rate: f64,
    pub avg_income: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeStats {
    pub regime: Regime,
    pub count: i64,
    pub avg_tax_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub success: bool,
    pub overall: OverallStats,
    pub by_regime: Vec<RegimeStats>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

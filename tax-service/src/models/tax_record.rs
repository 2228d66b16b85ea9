use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tax_engine::{BreakdownEntry, Computation, Regime};
use uuid::Uuid;

/// A persisted tax computation.
///
/// Write-once: created on a successful computation, never updated,
/// deleted only by its owner. Every query against the collection filters
/// on `owner_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRecord {
    #[serde(rename = "_id")]
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
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl TaxRecord {
    pub fn new(
        owner_id: String,
        display_name: String,
        gross_income: f64,
        regime: Regime,
        deductions: f64,
        computation: Computation,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            display_name,
            gross_income,
            regime,
            deductions,
            taxable_income: computation.taxable_income,
            tax_amount: computation.tax_amount,
            effective_rate: computation.effective_rate,
            slab_breakdown: computation.breakdown,
            created_at: Utc::now(),
        }
    }
}

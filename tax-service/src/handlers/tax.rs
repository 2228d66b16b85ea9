//! Tax endpoints. Every operation is scoped to the caller's user id;
//! ownership is part of the query filter, never a post-hoc check.

use crate::dtos::{
    CalculateTaxRequest, CalculateTaxResponse, CalculationData, DeleteResponse, HistoryParams,
    HistoryResponse, Pagination, StatsResponse, TaxRecordResponse,
};
use crate::error::AppError;
use crate::middleware::UserId;
use crate::models::TaxRecord;
use crate::services::HistoryFilter;
use crate::startup::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

const DEFAULT_PAGE_SIZE: u64 = 50;
const MAX_PAGE_SIZE: u64 = 100;

/// Compute tax for the request and persist the result as a new record
/// owned by the caller.
pub async fn calculate_tax(
    State(state): State<AppState>,
    user_id: UserId,
    Json(payload): Json<CalculateTaxRequest>,
) -> Result<(StatusCode, Json<CalculateTaxResponse>), AppError> {
    payload.validate()?;

    // The engine rejects negative and non-finite amounts itself.
    let computation = tax_engine::calculate(payload.gross_income, payload.regime, payload.deductions)?;

    let record = TaxRecord::new(
        user_id.0,
        payload.display_name.trim().to_string(),
        payload.gross_income,
        payload.regime,
        payload.deductions,
        computation,
    );

    tracing::info!(
        record_id = %record.id,
        owner_id = %record.owner_id,
        regime = record.regime.as_str(),
        tax_amount = record.tax_amount,
        "Tax computed"
    );

    state.repository.insert(&record).await.map_err(|e| {
        // The computation is correct but not saved; callers may retry.
        tracing::error!(record_id = %record.id, "Failed to persist tax record: {}", e);
        e
    })?;

    let data = CalculationData::from(&record);

    Ok((
        StatusCode::CREATED,
        Json(CalculateTaxResponse {
            success: true,
            data,
            record: TaxRecordResponse::from(record),
        }),
    ))
}

/// Paginated history of the caller's computations, newest first.
pub async fn list_history(
    State(state): State<AppState>,
    user_id: UserId,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let filter = HistoryFilter {
        name: params.name,
        regime: params.regime,
    };

    let (records, total) = state
        .repository
        .list_for_owner(&user_id.0, &filter, page, page_size)
        .await?;

    let total_pages = (total as f64 / page_size as f64).ceil() as u64;

    Ok(Json(HistoryResponse {
        success: true,
        records: records.into_iter().map(TaxRecordResponse::from).collect(),
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_records: total,
            records_per_page: page_size,
        },
    }))
}

/// Aggregate statistics over all of the caller's records. An empty
/// history yields zeroed stats, not an error.
pub async fn get_stats(
    State(state): State<AppState>,
    user_id: UserId,
) -> Result<Json<StatsResponse>, AppError> {
    let overall = state.repository.overall_stats(&user_id.0).await?;
    let by_regime = state.repository.regime_stats(&user_id.0).await?;

    Ok(Json(StatsResponse {
        success: true,
        overall,
        by_regime,
    }))
}

pub async fn get_record(
    State(state): State<AppState>,
    user_id: UserId,
    Path(record_id): Path<String>,
) -> Result<Json<TaxRecordResponse>, AppError> {
    let record = state
        .repository
        .find_for_owner(&user_id.0, &record_id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Record not found")))?;

    Ok(Json(TaxRecordResponse::from(record)))
}

/// Delete one of the caller's records. A foreign id and a missing id
/// produce the same not-found, so record existence never leaks.
pub async fn delete_record(
    State(state): State<AppState>,
    user_id: UserId,
    Path(record_id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state
        .repository
        .delete_for_owner(&user_id.0, &record_id)
        .await?;

    if !deleted {
        return Err(AppError::NotFound(anyhow::anyhow!("Record not found")));
    }

    tracing::info!(record_id = %record_id, owner_id = %user_id.0, "Tax record deleted");

    Ok(Json(DeleteResponse {
        success: true,
        message: "Record deleted successfully".to_string(),
    }))
}

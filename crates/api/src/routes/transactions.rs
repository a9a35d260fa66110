//! Flat bundle-transaction listing endpoint

use crate::{
    helpers::query_error,
    state::ApiState,
    validation::{TransactionsQuery, normalize_transactions_query},
};
use api_types::{ErrorResponse, Transaction, TransactionsResponse};
use axum::{
    Json,
    extract::{Query, State},
};

#[utoipa::path(
    get,
    path = "/transactions",
    params(
        TransactionsQuery
    ),
    responses(
        (status = 200, description = "Bundle transactions in descending block order", body = TransactionsResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "relayscope"
)]
/// List bundle transactions in descending block number order, execution
/// order within each block.
pub async fn transactions(
    Query(params): Query<TransactionsQuery>,
    State(state): State<ApiState>,
) -> Result<Json<TransactionsResponse>, ErrorResponse> {
    let filter = normalize_transactions_query(&params, state.default_limit())?;

    let rows = state
        .client
        .get_transactions_paginated(&filter)
        .await
        .map_err(|e| query_error("transactions", e))?;

    let latest_block_number = state
        .client
        .get_latest_block_number()
        .await
        .map_err(|e| query_error("latest block number", e))?
        .unwrap_or_default();

    let transactions: Vec<Transaction> = rows.into_iter().map(Transaction::from).collect();
    tracing::info!(count = transactions.len(), "Returning transactions");
    Ok(Json(TransactionsResponse { transactions, latest_block_number }))
}

//! Single-bundle lookup endpoint

use crate::{
    helpers::{parse_bundle_hash, query_error},
    state::ApiState,
};
use api_types::{BundleResponse, ErrorResponse, Transaction};
use axum::{
    Json,
    extract::{Path, State},
};
use storage::{BundleFamily, MAX_BUNDLE_TRANSACTIONS};

#[utoipa::path(
    get,
    path = "/bundle/{bundle_hash}",
    params(
        ("bundle_hash" = String, Path, description = "0x-prefixed 32-byte bundle hash")
    ),
    responses(
        (status = 200, description = "Transactions of the bundle in execution order", body = BundleResponse),
        (status = 400, description = "Malformed bundle hash", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "relayscope"
)]
/// Get the transactions of a single bundle.
///
/// The lookup is bounded; a bundle exceeding the bound is returned truncated
/// with a warning rather than failing.
pub async fn bundle(
    Path(bundle_hash): Path<String>,
    State(state): State<ApiState>,
) -> Result<Json<BundleResponse>, ErrorResponse> {
    let hash = parse_bundle_hash(&bundle_hash)?;

    let rows = state
        .client
        .get_bundle_transactions(hash, BundleFamily::Regular)
        .await
        .map_err(|e| query_error("bundle", e))?;

    if rows.len() as u64 >= MAX_BUNDLE_TRANSACTIONS {
        tracing::warn!(
            bundle_hash = %bundle_hash,
            limit = MAX_BUNDLE_TRANSACTIONS,
            "bundle hit the transaction bound, result truncated"
        );
    }

    let transactions: Vec<Transaction> = rows.into_iter().map(Transaction::from).collect();
    Ok(Json(BundleResponse { transactions }))
}

//! Block reconstruction endpoint

use crate::{
    era,
    helpers::query_error,
    reconcile::reconcile,
    state::ApiState,
    validation::{BlocksQuery, normalize_blocks_query},
};
use api_types::{Block, BlocksResponse, ErrorResponse};
use axum::{
    Json,
    extract::{Query, State},
};
use storage::BundleFamily;

#[utoipa::path(
    get,
    path = "/blocks",
    params(
        BlocksQuery
    ),
    responses(
        (status = 200, description = "Reconstructed blocks in descending order", body = BlocksResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "relayscope"
)]
/// List reconstructed blocks in descending block number order.
///
/// Requests scoped below the protocol transition are served by the
/// dual-channel reconciliation path; later ranges read the regular channel
/// only.
pub async fn blocks(
    Query(params): Query<BlocksQuery>,
    State(state): State<ApiState>,
) -> Result<Json<BlocksResponse>, ErrorResponse> {
    let filter = normalize_blocks_query(&params, state.default_limit())?;

    let blocks: Vec<Block> = if era::uses_megabundles(&filter, state.transition_block()) {
        // The two channel fetches are independent; issue them concurrently
        // and join before the merge.
        let (regular, megabundle) = tokio::try_join!(
            state.client.get_block_aggregates(&filter, BundleFamily::Regular),
            state.client.get_block_aggregates(&filter, BundleFamily::Megabundle),
        )
        .map_err(|e| query_error("blocks", e))?;

        reconcile(
            regular.into_iter().map(Block::from).collect(),
            megabundle.into_iter().map(Block::from).collect(),
            filter.limit,
        )
    } else {
        let rows = state
            .client
            .get_block_aggregates(&filter, BundleFamily::Regular)
            .await
            .map_err(|e| query_error("blocks", e))?;
        rows.into_iter().map(Block::from).collect()
    };

    let latest_block_number = state
        .client
        .get_latest_block_number()
        .await
        .map_err(|e| query_error("latest block number", e))?
        .unwrap_or_default();

    tracing::info!(count = blocks.len(), "Returning blocks");
    Ok(Json(BlocksResponse { blocks, latest_block_number }))
}

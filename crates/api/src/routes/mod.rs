//! API route definitions

pub mod blocks;
pub mod bundle;
pub mod transactions;

use crate::{ApiDoc, state::ApiState};
use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the router with all API endpoints.
pub fn router(state: ApiState) -> Router {
    let api_routes = Router::new()
        .route("/blocks", get(blocks::blocks))
        .route("/transactions", get(transactions::transactions))
        .route("/bundle/:bundle_hash", get(bundle::bundle));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(api_routes)
        .with_state(state)
}

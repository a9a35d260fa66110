//! Relayscope query engine and HTTP handlers.
//!
//! The engine reconstructs historical blocks from two independently recorded
//! submission channels (regular bundles and megabundles), reconciles them
//! into one coherent block list with per-transaction channel attribution,
//! and serves the result through a thin axum surface.

pub mod era;
pub mod helpers;
pub mod reconcile;
pub mod routes;
pub mod state;
pub mod validation;

pub use routes::router;
pub use state::{ApiState, MAX_LIMIT};

use utoipa::OpenApi;

/// `OpenAPI` documentation structure
#[derive(Debug, OpenApi)]
#[openapi(
    paths(routes::blocks::blocks, routes::transactions::transactions, routes::bundle::bundle),
    components(
        schemas(
            api_types::Block,
            api_types::Transaction,
            api_types::BlocksResponse,
            api_types::TransactionsResponse,
            api_types::BundleResponse,
            api_types::ErrorResponse,
        )
    ),
    tags(
        (name = "relayscope", description = "Relayscope API endpoints")
    ),
    info(
        title = "Relayscope API",
        description = "API for historical relay blocks and bundle transactions",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

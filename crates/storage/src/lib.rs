//! Read-only `ClickHouse` access layer for the relayscope API.
//!
//! The relay records bundle transactions into two immutable table families,
//! one per submission channel. This crate reconstructs per-block aggregates
//! from those rows; merging the two channels is the API layer's concern.

pub mod models;
pub mod reader;
pub mod types;

pub use models::{BlockAggregateRow, BundleTransactionRow};
pub use reader::{
    BlockFilter, BundleFamily, MAX_BUNDLE_TRANSACTIONS, StorageReader, TransactionFilter,
};
pub use types::{AddressBytes, HashBytes};

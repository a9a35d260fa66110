//! Data types for the relayscope API.
//!
//! These structs define the JSON responses returned by the API server. They
//! are provided in a separate crate so that consumers can depend on them
//! without pulling in the rest of the server implementation.

#![allow(missing_docs)]

use alloy_primitives::Address;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use storage::{AddressBytes, BlockAggregateRow, BundleTransactionRow, HashBytes};
use utoipa::ToSchema;

/// One transaction of a reconstructed block.
///
/// Wei amounts are serialized as decimal strings since they routinely exceed
/// the safe JSON integer range.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct Transaction {
    pub transaction_hash: String,
    pub bundle_index: u64,
    pub tx_index: u64,
    pub block_number: u64,
    pub eoa_address: String,
    pub to_address: String,
    pub gas_used: u64,
    pub gas_price: String,
    pub eth_sent_to_fee_recipient: String,
    pub fee_recipient_eth_diff: String,
    pub bundle_type: String,
    /// Set to `true` when the transaction is attributed to the megabundle
    /// channel; omitted otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_megabundle: Option<bool>,
}

/// One block reconstructed from the relay's bundle records.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct Block {
    pub block_number: u64,
    pub fee_recipient: String,
    pub fee_recipient_eth_diff: String,
    pub eth_sent_to_fee_recipient: String,
    pub gas_used: u64,
    pub gas_price: String,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BlocksResponse {
    pub blocks: Vec<Block>,
    pub latest_block_number: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub latest_block_number: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BundleResponse {
    pub transactions: Vec<Transaction>,
}

/// Format an address in its EIP-55 checksummed form.
pub fn format_address(addr: AddressBytes) -> String {
    Address::from(addr).to_string()
}

/// Format a 32-byte hash as a 0x-prefixed hex string.
pub fn format_hash(hash: HashBytes) -> String {
    format!("0x{}", hex::encode(hash))
}

impl From<BlockAggregateRow> for Block {
    fn from(row: BlockAggregateRow) -> Self {
        let transactions = (0..row.tx_hashes.len())
            .map(|i| Transaction {
                transaction_hash: format_hash(row.tx_hashes[i]),
                bundle_index: row.bundle_indexes[i],
                tx_index: row.tx_indexes[i],
                block_number: row.block_number,
                eoa_address: format_address(row.eoa_addresses[i]),
                to_address: format_address(row.to_addresses[i]),
                gas_used: row.tx_gas_used[i],
                gas_price: row.tx_gas_prices[i].to_string(),
                eth_sent_to_fee_recipient: row.coinbase_transfers[i].to_string(),
                fee_recipient_eth_diff: row.total_miner_rewards[i].to_string(),
                bundle_type: row.bundle_types[i].clone(),
                is_megabundle: None,
            })
            .collect();

        Self {
            block_number: row.block_number,
            fee_recipient: format_address(row.fee_recipient),
            fee_recipient_eth_diff: row.fee_recipient_eth_diff.to_string(),
            eth_sent_to_fee_recipient: row.eth_sent_to_fee_recipient.to_string(),
            gas_used: row.gas_used,
            gas_price: row.gas_price.to_string(),
            transactions,
        }
    }
}

impl From<BundleTransactionRow> for Transaction {
    fn from(row: BundleTransactionRow) -> Self {
        Self {
            transaction_hash: format_hash(row.tx_hash),
            bundle_index: row.bundle_index,
            tx_index: row.tx_index,
            block_number: row.block_number,
            eoa_address: format_address(row.eoa_address),
            to_address: format_address(row.to_address),
            gas_used: row.gas_used,
            gas_price: row.gas_price.to_string(),
            eth_sent_to_fee_recipient: row.coinbase_transfer.to_string(),
            fee_recipient_eth_diff: row.total_miner_reward.to_string(),
            bundle_type: row.bundle_type,
            is_megabundle: None,
        }
    }
}

/// Problem-document style error returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub r#type: String,
    pub title: String,
    #[serde(skip)]
    #[schema(ignore)]
    pub status: StatusCode,
    pub detail: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(
        r#type: impl Into<String>,
        title: impl Into<String>,
        status: StatusCode,
        detail: impl Into<String>,
    ) -> Self {
        Self { r#type: r#type.into(), title: title.into(), status, detail: detail.into() }
    }

    /// Validation failure naming the offending parameter.
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new("invalid-params", "Bad Request", StatusCode::BAD_REQUEST, detail)
    }

    /// Opaque infrastructure failure; internals are logged, never leaked.
    pub fn database_error() -> Self {
        Self::new(
            "database-error",
            "Internal Server Error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "A database error occurred",
        )
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> axum::response::Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate_row() -> BlockAggregateRow {
        BlockAggregateRow {
            block_number: 12_000_000,
            fee_recipient: AddressBytes([0xaa; 20]),
            fee_recipient_eth_diff: 3_000_000_000_000_000_000,
            eth_sent_to_fee_recipient: 1_000_000_000_000_000_000,
            gas_used: 600_000,
            gas_price: 5_000_000_000_000,
            tx_hashes: vec![HashBytes([0x11; 32]), HashBytes([0x22; 32])],
            bundle_indexes: vec![0, 1],
            tx_indexes: vec![0, 0],
            eoa_addresses: vec![AddressBytes([0x01; 20]), AddressBytes([0x02; 20])],
            to_addresses: vec![AddressBytes([0x03; 20]), AddressBytes([0x04; 20])],
            tx_gas_used: vec![400_000, 200_000],
            tx_gas_prices: vec![5_000_000_000_000, 5_000_000_000_000],
            coinbase_transfers: vec![1_000_000_000_000_000_000, 0],
            total_miner_rewards: vec![2_000_000_000_000_000_000, 1_000_000_000_000_000_000],
            bundle_types: vec!["flashbots".to_owned(), "flashbots".to_owned()],
        }
    }

    #[test]
    fn block_from_row_zips_transaction_columns() {
        let block = Block::from(aggregate_row());
        assert_eq!(block.transactions.len(), 2);
        assert_eq!(block.transactions[0].bundle_index, 0);
        assert_eq!(block.transactions[1].bundle_index, 1);
        assert_eq!(block.transactions[0].transaction_hash, format!("0x{}", "11".repeat(32)));
        assert_eq!(block.transactions[1].block_number, 12_000_000);
        assert_eq!(block.fee_recipient_eth_diff, "3000000000000000000");
        assert_eq!(block.gas_price, "5000000000000");
    }

    #[test]
    fn is_megabundle_is_omitted_when_unset() {
        let block = Block::from(aggregate_row());
        let json = serde_json::to_value(&block.transactions[0]).unwrap();
        assert!(json.get("is_megabundle").is_none());
    }

    #[test]
    fn addresses_are_checksummed() {
        let addr: Address =
            "0x742d35cc6634c0532925a3b844bc454e4438f44e".parse().unwrap();
        let formatted = format_address(AddressBytes::from(addr));
        assert_eq!(formatted, "0x742d35Cc6634C0532925a3b844Bc454e4438f44e");
    }

    #[test]
    fn error_response_serializes_problem_fields() {
        let err = ErrorResponse::validation("limit must be positive");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "invalid-params");
        assert_eq!(json["detail"], "limit must be positive");
        assert!(json.get("status").is_none());
    }
}

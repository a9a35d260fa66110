//! Row models returned by the reader queries.

use clickhouse::Row;
use serde::{Deserialize, Serialize};

use crate::types::{AddressBytes, HashBytes};

/// One block reconstructed by a single-channel aggregation.
///
/// Transaction columns come back as parallel `groupArray` columns, already
/// sorted by `(bundle_index, tx_index)` in the inner query. Index `i` across
/// the vectors describes one transaction.
#[derive(Debug, Clone, Row, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockAggregateRow {
    /// Block number
    pub block_number: u64,
    /// Account credited with the block rewards
    pub fee_recipient: AddressBytes,
    /// Total value credited to the fee recipient, in wei
    pub fee_recipient_eth_diff: u128,
    /// Direct-transfer portion of the credited value, in wei
    pub eth_sent_to_fee_recipient: u128,
    /// Sum of gas used over the block's bundle transactions
    pub gas_used: u64,
    /// floor(eth diff / gas used), 0 when no gas was used
    pub gas_price: u128,
    /// Transaction content hashes
    pub tx_hashes: Vec<HashBytes>,
    /// Bundle position of each transaction within the block
    pub bundle_indexes: Vec<u64>,
    /// Position of each transaction within its bundle
    pub tx_indexes: Vec<u64>,
    /// Sender address of each transaction
    pub eoa_addresses: Vec<AddressBytes>,
    /// Recipient address of each transaction
    pub to_addresses: Vec<AddressBytes>,
    /// Gas used by each transaction
    pub tx_gas_used: Vec<u64>,
    /// Effective gas price of each transaction, in wei
    pub tx_gas_prices: Vec<u128>,
    /// Direct transfer to the fee recipient per transaction, in wei
    pub coinbase_transfers: Vec<u128>,
    /// Total value credited to the fee recipient per transaction, in wei
    pub total_miner_rewards: Vec<u128>,
    /// Channel classifier tag of each transaction
    pub bundle_types: Vec<String>,
}

/// One bundle-transaction row, used by the flat transaction listing and the
/// bundle lookup.
#[derive(Debug, Clone, Row, Serialize, Deserialize, PartialEq, Eq)]
pub struct BundleTransactionRow {
    /// Block the transaction landed in
    pub block_number: u64,
    /// Hash of the bundle the transaction was submitted in
    pub bundle_hash: HashBytes,
    /// Bundle position within the block
    pub bundle_index: u64,
    /// Position within the bundle
    pub tx_index: u64,
    /// Transaction content hash
    pub tx_hash: HashBytes,
    /// Sender address
    pub eoa_address: AddressBytes,
    /// Recipient address
    pub to_address: AddressBytes,
    /// Gas used
    pub gas_used: u64,
    /// Effective gas price, in wei
    pub gas_price: u128,
    /// Direct transfer to the fee recipient, in wei
    pub coinbase_transfer: u128,
    /// Total value credited to the fee recipient, in wei
    pub total_miner_reward: u128,
    /// Channel classifier tag
    pub bundle_type: String,
}

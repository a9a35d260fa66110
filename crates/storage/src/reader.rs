//! Read-only `ClickHouse` reader for the relayscope API.
//! Builds the per-channel block aggregations and the flat transaction lookups.

use clickhouse::{Client, Row, RowOwned, RowRead};
use derive_more::Debug;
use eyre::Result;
use hex::encode;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, error};
use url::Url;

use crate::{
    models::{BlockAggregateRow, BundleTransactionRow},
    types::{AddressBytes, HashBytes},
};

/// Upper bound on transactions returned for a single bundle lookup. The
/// result is truncated at this bound rather than failing; callers log when
/// they hit it.
pub const MAX_BUNDLE_TRANSACTIONS: u64 = 1000;

/// Which submission channel a query reads from.
///
/// The relay recorded ordinary per-bundle submissions and privileged
/// megabundle submissions into separate table families with the same shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BundleFamily {
    /// Ordinary per-bundle submissions
    Regular,
    /// Privileged megabundle submissions (pre-transition era only)
    Megabundle,
}

impl BundleFamily {
    const fn table(self) -> &'static str {
        match self {
            Self::Regular => "bundle_transactions",
            Self::Megabundle => "megabundle_transactions",
        }
    }

    const fn hash_column(self) -> &'static str {
        match self {
            Self::Regular => "bundle_hash",
            Self::Megabundle => "megabundle_hash",
        }
    }
}

/// Normalized filter set for the block aggregations.
///
/// Produced by the API layer's parameter normalization; all fields are
/// already validated and addresses canonicalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockFilter {
    /// Exclusive upper bound on block number (descending pagination cursor)
    pub before: Option<u64>,
    /// Exact block number match
    pub block_number: Option<u64>,
    /// Only blocks credited to this fee recipient
    pub fee_recipient: Option<AddressBytes>,
    /// Only blocks containing at least one transaction sent by this address
    pub from: Option<AddressBytes>,
    /// Maximum number of block rows returned per channel
    pub limit: u64,
}

/// Normalized filter set for the flat transaction listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Exclusive upper bound on block number
    pub before: Option<u64>,
    /// Only transactions sent by this address
    pub from: Option<AddressBytes>,
    /// Maximum number of transaction rows returned
    pub limit: u64,
}

/// `ClickHouse` reader client (read-only operations)
#[derive(Clone, Debug)]
pub struct StorageReader {
    /// Base client
    #[debug(skip)]
    base: Client,
    /// Database name
    db_name: String,
}

impl StorageReader {
    /// Create a new `ClickHouse` reader client
    pub fn new(url: Url, db_name: String, username: String, password: String) -> Result<Self> {
        let client = Client::default()
            .with_url(url)
            .with_database(db_name.clone())
            .with_user(username)
            .with_password(password);

        Ok(Self { base: client, db_name })
    }

    async fn execute<R>(&self, query: &str) -> Result<Vec<R>>
    where
        R: RowOwned + RowRead,
    {
        let client = self.base.clone();
        let start = Instant::now();

        let result = client.query(query).fetch_all::<R>().await;

        let duration_ms = start.elapsed().as_millis();
        match &result {
            Ok(rows) => {
                debug!(query = %query, duration_ms, rows = rows.len(), "ClickHouse query executed")
            }
            Err(e) => error!(query = %query, duration_ms, error = %e, "ClickHouse query failed"),
        }
        result.map_err(Into::into)
    }

    fn block_aggregates_query(&self, filter: &BlockFilter, family: BundleFamily) -> String {
        let table = family.table();
        let mut conditions = String::new();
        if let Some(before) = filter.before {
            conditions.push_str(&format!(" AND block_number < {before}"));
        }
        if let Some(number) = filter.block_number {
            conditions.push_str(&format!(" AND block_number = {number}"));
        }
        if let Some(addr) = filter.fee_recipient {
            conditions.push_str(&format!(" AND fee_recipient = unhex('{}')", encode(addr)));
        }
        if let Some(addr) = filter.from {
            // Existential match: keep the whole block if any of its
            // transactions was sent by the address.
            conditions.push_str(&format!(
                " AND block_number IN ( \
                     SELECT block_number FROM {db}.{table} \
                     WHERE eoa_address = unhex('{}')\
                 )",
                encode(addr),
                db = self.db_name,
            ));
        }

        format!(
            "SELECT block_number, \
                    any(fee_recipient) AS fee_recipient, \
                    sum(total_miner_reward) AS total_diff, \
                    sum(coinbase_transfer) AS direct_transfers, \
                    toUInt64(sum(gas_used)) AS gas_used_sum, \
                    if(sum(gas_used) > 0, \
                       intDiv(sum(total_miner_reward), toUInt128(sum(gas_used))), \
                       toUInt128(0)) AS effective_gas_price, \
                    groupArray(tx_hash) AS tx_hashes, \
                    groupArray(bundle_index) AS bundle_indexes, \
                    groupArray(tx_index) AS tx_indexes, \
                    groupArray(eoa_address) AS eoa_addresses, \
                    groupArray(to_address) AS to_addresses, \
                    groupArray(gas_used) AS tx_gas_used, \
                    groupArray(gas_price) AS tx_gas_prices, \
                    groupArray(coinbase_transfer) AS coinbase_transfers, \
                    groupArray(total_miner_reward) AS total_miner_rewards, \
                    groupArray(bundle_type) AS bundle_types \
             FROM ( \
                 SELECT block_number, fee_recipient, bundle_index, tx_index, tx_hash, \
                        eoa_address, to_address, gas_used, gas_price, coinbase_transfer, \
                        total_miner_reward, bundle_type \
                 FROM {db}.{table} \
                 WHERE 1 = 1{conditions} \
                 ORDER BY block_number ASC, bundle_index ASC, tx_index ASC \
             ) \
             GROUP BY block_number \
             ORDER BY block_number DESC \
             LIMIT {limit}",
            db = self.db_name,
            limit = filter.limit,
        )
    }

    /// Reconstruct per-block aggregates from one submission channel.
    ///
    /// Returns at most `filter.limit` block-keyed rows in descending block
    /// number order. The two channels are limited independently; a caller
    /// merging both must truncate again after the union.
    pub async fn get_block_aggregates(
        &self,
        filter: &BlockFilter,
        family: BundleFamily,
    ) -> Result<Vec<BlockAggregateRow>> {
        let query = self.block_aggregates_query(filter, family);
        self.execute::<BlockAggregateRow>(&query).await
    }

    /// Get bundle transactions in descending block number order, ordered by
    /// `(bundle_index, tx_index)` within a block.
    pub async fn get_transactions_paginated(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<BundleTransactionRow>> {
        let mut query = format!(
            "SELECT block_number, bundle_hash, bundle_index, tx_index, tx_hash, \
                    eoa_address, to_address, gas_used, gas_price, coinbase_transfer, \
                    total_miner_reward, bundle_type \
             FROM {db}.bundle_transactions \
             WHERE 1 = 1",
            db = self.db_name,
        );
        if let Some(before) = filter.before {
            query.push_str(&format!(" AND block_number < {before}"));
        }
        if let Some(addr) = filter.from {
            query.push_str(&format!(" AND eoa_address = unhex('{}')", encode(addr)));
        }
        query.push_str(" ORDER BY block_number DESC, bundle_index ASC, tx_index ASC");
        query.push_str(&format!(" LIMIT {}", filter.limit));

        self.execute::<BundleTransactionRow>(&query).await
    }

    /// Get the transactions of a single bundle in execution order, truncated
    /// at [`MAX_BUNDLE_TRANSACTIONS`].
    pub async fn get_bundle_transactions(
        &self,
        bundle_hash: HashBytes,
        family: BundleFamily,
    ) -> Result<Vec<BundleTransactionRow>> {
        let query = format!(
            "SELECT block_number, {hash_col} AS bundle_hash, bundle_index, tx_index, tx_hash, \
                    eoa_address, to_address, gas_used, gas_price, coinbase_transfer, \
                    total_miner_reward, bundle_type \
             FROM {db}.{table} \
             WHERE {hash_col} = unhex('{hash}') \
             ORDER BY block_number ASC, bundle_index ASC, tx_index ASC \
             LIMIT {MAX_BUNDLE_TRANSACTIONS}",
            db = self.db_name,
            table = family.table(),
            hash_col = family.hash_column(),
            hash = encode(bundle_hash),
        );

        self.execute::<BundleTransactionRow>(&query).await
    }

    /// Get the highest block number recorded across both channels.
    pub async fn get_latest_block_number(&self) -> Result<Option<u64>> {
        #[derive(Row, Deserialize)]
        struct MaxBlock {
            block_number: u64,
        }

        let query = format!(
            "SELECT max(block_number) AS block_number FROM ( \
                 SELECT block_number FROM {db}.bundle_transactions \
                 UNION ALL \
                 SELECT block_number FROM {db}.megabundle_transactions \
             )",
            db = self.db_name,
        );

        let rows = self.execute::<MaxBlock>(&query).await?;
        let row = match rows.into_iter().next() {
            Some(r) => r,
            None => return Ok(None),
        };
        if row.block_number == 0 {
            return Ok(None);
        }
        Ok(Some(row.block_number))
    }
}

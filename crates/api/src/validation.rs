//! Validation and normalization for API query parameters

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    helpers::parse_optional_address,
    state::MAX_LIMIT,
};
use api_types::ErrorResponse;
use storage::{BlockFilter, TransactionFilter};

/// Raw query parameters for the `/blocks` endpoint.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct BlocksQuery {
    /// Exclusive upper bound on block number, or the literal "latest"
    pub before: Option<String>,
    /// Maximum number of blocks to return
    pub limit: Option<String>,
    /// Exact block number to return
    pub block_number: Option<String>,
    /// Only blocks credited to this fee recipient
    pub fee_recipient: Option<String>,
    /// Earlier-generation alias for `fee_recipient`
    pub miner: Option<String>,
    /// Only blocks containing at least one transaction sent by this address
    pub from: Option<String>,
}

/// Raw query parameters for the `/transactions` endpoint.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct TransactionsQuery {
    /// Exclusive upper bound on block number, or the literal "latest"
    pub before: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<String>,
    /// Only transactions sent by this address
    pub from: Option<String>,
}

/// Normalize and validate `/blocks` parameters into a storage filter.
///
/// Pure; detects every validation failure before any data access happens.
pub fn normalize_blocks_query(
    params: &BlocksQuery,
    default_limit: u64,
) -> Result<BlockFilter, ErrorResponse> {
    let before = parse_before(params.before.as_deref())?;
    let block_number = parse_block_number(params.block_number.as_deref())?;
    let limit = validate_limit(params.limit.as_deref(), default_limit)?;
    // `miner` is the earlier schema generation's name for the fee recipient.
    let fee_recipient = parse_optional_address(
        "fee_recipient",
        params.fee_recipient.as_ref().or(params.miner.as_ref()),
    )?;
    let from = parse_optional_address("from", params.from.as_ref())?;

    Ok(BlockFilter { before, block_number, fee_recipient, from, limit })
}

/// Normalize and validate `/transactions` parameters into a storage filter.
pub fn normalize_transactions_query(
    params: &TransactionsQuery,
    default_limit: u64,
) -> Result<TransactionFilter, ErrorResponse> {
    let before = parse_before(params.before.as_deref())?;
    let limit = validate_limit(params.limit.as_deref(), default_limit)?;
    let from = parse_optional_address("from", params.from.as_ref())?;

    Ok(TransactionFilter { before, from, limit })
}

/// Parse the `before` cursor. The literal "latest" means no upper bound.
fn parse_before(raw: Option<&str>) -> Result<Option<u64>, ErrorResponse> {
    match raw {
        None => Ok(None),
        Some("latest") => Ok(None),
        Some(s) => s.parse::<u64>().map(Some).map_err(|_| {
            ErrorResponse::validation(format!(
                "before must be a block number or 'latest', got '{s}'"
            ))
        }),
    }
}

fn parse_block_number(raw: Option<&str>) -> Result<Option<u64>, ErrorResponse> {
    match raw {
        None => Ok(None),
        Some(s) => s.parse::<u64>().map(Some).map_err(|_| {
            ErrorResponse::validation(format!("block_number must be a block number, got '{s}'"))
        }),
    }
}

/// Validate the `limit` parameter, falling back to the configured default.
///
/// Accepted as a string so a malformed value gets the same error shape as
/// `before` and `block_number` instead of failing in the extractor.
fn validate_limit(raw: Option<&str>, default_limit: u64) -> Result<u64, ErrorResponse> {
    let limit = match raw {
        None => default_limit,
        Some(s) => s.parse::<u64>().map_err(|_| {
            ErrorResponse::validation(format!("limit must be a number, got '{s}'"))
        })?,
    };
    if limit == 0 || limit > MAX_LIMIT {
        return Err(ErrorResponse::validation(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {limit}"
        )));
    }
    Ok(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_LIMIT: u64 = 10;

    #[test]
    fn before_latest_means_no_upper_bound() {
        let params = BlocksQuery { before: Some("latest".to_owned()), ..Default::default() };
        let filter = normalize_blocks_query(&params, DEFAULT_LIMIT).unwrap();
        assert_eq!(filter.before, None);
    }

    #[test]
    fn before_parses_as_cursor() {
        let params = BlocksQuery { before: Some("12000000".to_owned()), ..Default::default() };
        let filter = normalize_blocks_query(&params, DEFAULT_LIMIT).unwrap();
        assert_eq!(filter.before, Some(12_000_000));
    }

    #[test]
    fn before_rejects_non_numeric_naming_value() {
        let params = BlocksQuery { before: Some("soon".to_owned()), ..Default::default() };
        let err = normalize_blocks_query(&params, DEFAULT_LIMIT).unwrap_err();
        assert_eq!(err.r#type, "invalid-params");
        assert!(err.detail.contains("'soon'"));
    }

    #[test]
    fn block_number_rejects_non_numeric_naming_value() {
        let params = BlocksQuery { block_number: Some("abc".to_owned()), ..Default::default() };
        let err = normalize_blocks_query(&params, DEFAULT_LIMIT).unwrap_err();
        assert!(err.detail.contains("block_number"));
        assert!(err.detail.contains("'abc'"));
    }

    #[test]
    fn limit_defaults_when_absent() {
        let filter = normalize_blocks_query(&BlocksQuery::default(), DEFAULT_LIMIT).unwrap();
        assert_eq!(filter.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn limit_zero_is_rejected_naming_value() {
        let params = BlocksQuery { limit: Some("0".to_owned()), ..Default::default() };
        let err = normalize_blocks_query(&params, DEFAULT_LIMIT).unwrap_err();
        assert_eq!(err.r#type, "invalid-params");
        assert!(err.detail.contains("got 0"));
    }

    #[test]
    fn limit_above_max_is_rejected_naming_value() {
        let params =
            BlocksQuery { limit: Some((MAX_LIMIT + 1).to_string()), ..Default::default() };
        let err = normalize_blocks_query(&params, DEFAULT_LIMIT).unwrap_err();
        assert!(err.detail.contains(&format!("got {}", MAX_LIMIT + 1)));
    }

    #[test]
    fn limit_rejects_non_numeric_naming_value() {
        let params = BlocksQuery { limit: Some("abc".to_owned()), ..Default::default() };
        let err = normalize_blocks_query(&params, DEFAULT_LIMIT).unwrap_err();
        assert_eq!(err.r#type, "invalid-params");
        assert!(err.detail.contains("limit must be a number"));
        assert!(err.detail.contains("'abc'"));
    }

    #[test]
    fn limit_at_max_is_accepted() {
        let params = BlocksQuery { limit: Some(MAX_LIMIT.to_string()), ..Default::default() };
        let filter = normalize_blocks_query(&params, DEFAULT_LIMIT).unwrap();
        assert_eq!(filter.limit, MAX_LIMIT);
    }

    #[test]
    fn miner_is_an_alias_for_fee_recipient() {
        let addr = "0x742d35Cc6634C0532925a3b844Bc9e7595f8e3A1".to_owned();
        let via_miner =
            BlocksQuery { miner: Some(addr.clone()), ..Default::default() };
        let via_fee_recipient =
            BlocksQuery { fee_recipient: Some(addr), ..Default::default() };

        let a = normalize_blocks_query(&via_miner, DEFAULT_LIMIT).unwrap();
        let b = normalize_blocks_query(&via_fee_recipient, DEFAULT_LIMIT).unwrap();
        assert_eq!(a.fee_recipient, b.fee_recipient);
        assert!(a.fee_recipient.is_some());
    }

    #[test]
    fn malformed_address_propagates_canonicalizer_error() {
        let params = BlocksQuery { from: Some("0xzz".to_owned()), ..Default::default() };
        let err = normalize_blocks_query(&params, DEFAULT_LIMIT).unwrap_err();
        assert_eq!(err.r#type, "invalid-params");
        assert!(err.detail.contains("from address"));
    }

    #[test]
    fn query_deserializes_from_url_encoding() {
        let params: BlocksQuery =
            serde_urlencoded::from_str("before=latest&limit=5&block_number=100").unwrap();
        assert_eq!(params.before.as_deref(), Some("latest"));
        assert_eq!(params.limit.as_deref(), Some("5"));
        assert_eq!(params.block_number.as_deref(), Some("100"));
    }

    #[test]
    fn transactions_query_normalizes() {
        let params = TransactionsQuery {
            before: Some("500".to_owned()),
            limit: Some("3".to_owned()),
            from: None,
        };
        let filter = normalize_transactions_query(&params, DEFAULT_LIMIT).unwrap();
        assert_eq!(filter.before, Some(500));
        assert_eq!(filter.limit, 3);
        assert_eq!(filter.from, None);
    }
}

//! Common helper functions used across API endpoints

use alloy_primitives::{Address, B256};
use api_types::ErrorResponse;
use storage::{AddressBytes, HashBytes};

/// Canonicalize an address string to its checksummed byte form.
pub fn parse_address(field: &str, addr_str: &str) -> Result<AddressBytes, ErrorResponse> {
    match addr_str.parse::<Address>() {
        Ok(a) => Ok(AddressBytes::from(a)),
        Err(e) => {
            tracing::warn!(error = %e, field, address = addr_str, "Failed to parse address");
            Err(ErrorResponse::validation(format!("invalid {field} address '{addr_str}': {e}")))
        }
    }
}

/// Canonicalize an optional address string.
pub fn parse_optional_address(
    field: &str,
    addr_str: Option<&String>,
) -> Result<Option<AddressBytes>, ErrorResponse> {
    match addr_str {
        Some(addr) => parse_address(field, addr).map(Some),
        None => Ok(None),
    }
}

/// Parse a 0x-prefixed 32-byte bundle hash.
pub fn parse_bundle_hash(raw: &str) -> Result<HashBytes, ErrorResponse> {
    match raw.parse::<B256>() {
        Ok(h) => Ok(HashBytes::from(h)),
        Err(e) => {
            tracing::warn!(error = %e, hash = raw, "Failed to parse bundle hash");
            Err(ErrorResponse::validation(format!("invalid bundle hash '{raw}': {e}")))
        }
    }
}

/// Create a database error response with logging
pub fn database_error(operation: &str, error: impl std::fmt::Display) -> ErrorResponse {
    tracing::error!(operation, error = %error, "Database operation failed");
    ErrorResponse::database_error()
}

/// Create a database error response for a specific query type
pub fn query_error(query_type: &str, error: impl std::fmt::Display) -> ErrorResponse {
    database_error(&format!("get {query_type}"), error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_valid() {
        let addr = "0x742d35Cc6634C0532925a3b844Bc9e7595f8e3A1";
        let result = parse_address("miner", addr).unwrap();
        assert_eq!(result.as_bytes()[0], 0x74);
    }

    #[test]
    fn test_parse_address_invalid() {
        let result = parse_address("from", "invalid_address");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.r#type, "invalid-params");
        assert!(err.detail.contains("invalid from address"));
        assert!(err.detail.contains("invalid_address"));
    }

    #[test]
    fn test_parse_optional_address_none() {
        assert!(parse_optional_address("from", None).unwrap().is_none());
    }

    #[test]
    fn test_parse_bundle_hash_valid() {
        let raw = format!("0x{}", "ab".repeat(32));
        let hash = parse_bundle_hash(&raw).unwrap();
        assert_eq!(hash.as_bytes()[0], 0xab);
    }

    #[test]
    fn test_parse_bundle_hash_invalid() {
        let result = parse_bundle_hash("0x1234");
        assert!(result.is_err());
        assert!(result.unwrap_err().detail.contains("invalid bundle hash"));
    }
}

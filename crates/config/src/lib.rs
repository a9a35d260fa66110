//! Relayscope configuration
use clap::Parser;
use url::Url;

/// Origins allowed by the CORS layer when none are configured explicitly.
pub const DEFAULT_ALLOWED_ORIGINS: &str =
    "https://blocks.relayscope.xyz,https://relayscope.xyz";

/// First block of the post-transition protocol era. The megabundle channel
/// only existed before this block, so requests scoped entirely at or above it
/// skip the megabundle aggregation.
pub const DEFAULT_TRANSITION_BLOCK: u64 = 15_537_394;

/// Clickhouse database configuration options
#[derive(Debug, Clone, Parser)]
pub struct ClickhouseOpts {
    /// Clickhouse URL
    #[clap(long, env = "CLICKHOUSE_URL")]
    pub url: Url,
    /// Clickhouse database
    #[clap(long, env = "CLICKHOUSE_DB")]
    pub db: String,
    /// Clickhouse username
    #[clap(long, env = "CLICKHOUSE_USERNAME")]
    pub username: String,
    /// Clickhouse password
    #[clap(long, env = "CLICKHOUSE_PASSWORD")]
    pub password: String,
}

/// API server configuration options
#[derive(Debug, Clone, Parser)]
pub struct ApiOpts {
    /// Host to bind the API server to
    #[clap(long, env = "API_HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Port to bind the API server to
    #[clap(long, env = "API_PORT", default_value = "3000")]
    pub port: u16,
    /// Comma-separated list of origins allowed by the CORS layer
    #[clap(
        long,
        env = "API_ALLOWED_ORIGINS",
        default_value = DEFAULT_ALLOWED_ORIGINS,
        value_delimiter = ','
    )]
    pub allowed_origins: Vec<String>,
    /// Default number of blocks/transactions returned when no limit is given
    #[clap(long, env = "API_DEFAULT_LIMIT", default_value = "10")]
    pub default_limit: u64,
    /// Block number of the protocol-era transition used for query routing
    #[clap(long, env = "RELAY_TRANSITION_BLOCK", default_value_t = DEFAULT_TRANSITION_BLOCK)]
    pub transition_block: u64,
}

/// CLI options for the relayscope API server
#[derive(Debug, Clone, Parser)]
pub struct Opts {
    /// Clickhouse database configuration
    #[clap(flatten)]
    pub clickhouse: ClickhouseOpts,

    /// API server configuration
    #[clap(flatten)]
    pub api: ApiOpts,
}

#[cfg(test)]
mod tests {
    use super::Opts;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Opts::command().debug_assert()
    }
}

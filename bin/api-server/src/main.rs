//! API server binary

use std::net::SocketAddr;

use clap::Parser;
use config::Opts;
use dotenvy::dotenv;
use storage::StorageReader;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = StorageReader::new(
        opts.clickhouse.url,
        opts.clickhouse.db,
        opts.clickhouse.username,
        opts.clickhouse.password,
    )?;

    let addr: SocketAddr = format!("{}:{}", opts.api.host, opts.api.port).parse()?;
    server::run(
        addr,
        client,
        opts.api.allowed_origins,
        opts.api.default_limit,
        opts.api.transition_block,
    )
    .await
}

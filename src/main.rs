//! One-shot seeding job
//!
//! Provisions the built-in fixture catalog into a DynamoDB Local instance
//! before an integration-test run. Exits non-zero on the first failure with
//! a message naming the failing table (and item index, for writes).

mod fixtures;

use dynamo_seed::{DynamoStore, StoreConfig, provision_catalog, resolve_credentials};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        error!("seeding failed: {}", err);
        std::process::exit(1);
    }

    info!("all fixtures provisioned");
}

async fn run() -> Result<(), dynamo_seed::Error> {
    let credentials = resolve_credentials()?;
    let store = DynamoStore::connect(StoreConfig::new(credentials)).await;
    provision_catalog(&store, &fixtures::catalog()).await?;
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

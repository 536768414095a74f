//! # DynamoDB Fixture Seeding
//!
//! Deterministic, reproducible provisioning of tables and seed items into a
//! DynamoDB(-Local) instance, for use as integration-test fixtures. A
//! seeding run consumes a declarative catalog of (table schema, items)
//! pairs and leaves the store fully populated before returning.
//!
//! ## Features
//!
//! - **Declarative catalog**: table schemas (keys, attribute types, global
//!   secondary indexes, throughput) and typed items as plain data
//! - **Strictly sequential**: one fully-awaited store call at a time, so a
//!   seed run never exhausts the store's write buffer
//! - **Fail-fast**: the first failure halts the run with the table name and
//!   item index; nothing is retried or rolled back
//! - **Testable**: the engine talks to a store trait, so an in-memory fake
//!   can stand in for DynamoDB
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dynamo_seed::catalog::{AttributeType, FixtureSpec, ItemRecord, TableSchema};
//! use dynamo_seed::{provision_catalog, resolve_credentials, DynamoStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dynamo_seed::Error> {
//!     // Credentials come from AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY
//!     let credentials = resolve_credentials()?;
//!     let store = DynamoStore::connect(StoreConfig::new(credentials)).await;
//!
//!     let catalog = vec![
//!         FixtureSpec::new(TableSchema::new("user").hash_key("id", AttributeType::String))
//!             .with_item(ItemRecord::new().set_string("id", "a"))
//!             .with_item(ItemRecord::new().set_string("id", "b")),
//!     ];
//!
//!     provision_catalog(&store, &catalog).await?;
//!     Ok(())
//! }
//! ```
#![deny(
    warnings,
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results,
    deprecated,
    unknown_lints,
    unreachable_code,
    unused_mut
)]

mod error;
pub use error::{ConfigError, Error, ProvisionError, StoreError};

/// Fixture catalog data model
pub mod catalog;

/// Credential resolution from the environment
pub mod credentials;

/// Provisioning engine
pub mod provision;

/// Store handle and DynamoDB client wiring
pub mod store;

// Re-export main types for convenience
pub use catalog::{FixtureSpec, ItemRecord, TableSchema};
pub use credentials::{SeedCredentials, resolve_credentials};
pub use provision::{provision_catalog, provision_fixture};
pub use store::{DynamoStore, FixtureStore, StoreConfig};

// Re-export the SDK types callers touch directly
pub use aws_sdk_dynamodb::Client as DynamoDbClient;
pub use aws_sdk_dynamodb::types::AttributeValue;

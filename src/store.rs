//! Store handle and DynamoDB client wiring
//!
//! [`FixtureStore`] is the seam between the provisioning engine and the
//! target store: one control-plane operation, one data-plane operation.
//! [`DynamoStore`] is the production implementation over
//! `aws_sdk_dynamodb::Client`; tests substitute an in-memory fake.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, GlobalSecondaryIndex, KeySchemaElement, Projection,
    ProvisionedThroughput, ReturnConsumedCapacity, ReturnValue,
};
use aws_types::sdk_config::TimeoutConfig;
use std::time::Duration;

use crate::catalog::{ItemRecord, ProjectionMode, SecondaryIndex, TableSchema, Throughput};
use crate::credentials::SeedCredentials;
use crate::error::StoreError;

/// Default region, matching the original integration environment
pub const DEFAULT_REGION: &str = "ap-northeast-1";

/// Default endpoint: DynamoDB Local
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Control-plane and data-plane operations of the target store
///
/// The provisioning engine drives exactly these two calls and nothing else.
#[async_trait]
pub trait FixtureStore: Send + Sync {
    /// Create the table described by `schema`
    ///
    /// Idempotency is not assumed: creating an already-existing table is an
    /// error.
    async fn create_table(&self, schema: &TableSchema) -> Result<(), StoreError>;

    /// Write one item, overwriting any existing item with the same key
    async fn put_item(&self, table: &str, item: &ItemRecord) -> Result<(), StoreError>;
}

/// Connection settings for [`DynamoStore::connect`]
#[derive(Clone, Debug)]
pub struct StoreConfig {
    credentials: SeedCredentials,
    region: String,
    endpoint: String,
}

impl StoreConfig {
    /// Settings pointing at DynamoDB Local with the default region
    pub fn new(credentials: SeedCredentials) -> Self {
        Self {
            credentials,
            region: DEFAULT_REGION.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Override the region
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Override the endpoint URL
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// DynamoDB-backed store handle
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: DynamoDbClient,
}

impl DynamoStore {
    /// Wrap an existing SDK client
    pub fn new(client: DynamoDbClient) -> Self {
        Self { client }
    }

    /// Build a client from explicit credentials and connection settings
    ///
    /// Configures:
    /// - Connect timeout: 3 seconds
    /// - Read timeout: 20 seconds
    /// - Operation timeout: 60 seconds
    pub async fn connect(config: StoreConfig) -> Self {
        let timeout_config = TimeoutConfig::builder()
            .connect_timeout(Duration::from_secs(3))
            .read_timeout(Duration::from_secs(20))
            .operation_timeout(Duration::from_secs(60))
            .build();

        let credentials = Credentials::new(
            config.credentials.access_key_id,
            config.credentials.secret_access_key,
            None,
            None,
            "dynamo-seed-env",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(config.region))
            .endpoint_url(config.endpoint)
            .timeout_config(timeout_config)
            .load()
            .await;

        Self {
            client: DynamoDbClient::new(&sdk_config),
        }
    }

    /// Borrow the underlying SDK client
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }
}

#[async_trait]
impl FixtureStore for DynamoStore {
    async fn create_table(&self, schema: &TableSchema) -> Result<(), StoreError> {
        let mut builder = self
            .client
            .create_table()
            .table_name(schema.table_name())
            .provisioned_throughput(to_sdk_throughput(schema.provisioned_throughput())?);

        for key in schema.key_schema() {
            builder = builder.key_schema(
                KeySchemaElement::builder()
                    .attribute_name(key.name())
                    .key_type(key.kind().as_key_type())
                    .build()?,
            );
        }

        for decl in schema.attribute_definitions() {
            builder = builder.attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(decl.name())
                    .attribute_type(decl.attribute_type().as_scalar())
                    .build()?,
            );
        }

        for index in schema.secondary_indexes() {
            builder = builder.global_secondary_indexes(to_sdk_index(index)?);
        }

        // ResourceInUseException propagates: seeding assumes the table does
        // not exist yet, and a second run over the same store must fail.
        let _ = builder.send().await?;
        Ok(())
    }

    async fn put_item(&self, table: &str, item: &ItemRecord) -> Result<(), StoreError> {
        let _ = self
            .client
            .put_item()
            .table_name(table)
            .return_values(ReturnValue::None)
            .return_consumed_capacity(ReturnConsumedCapacity::None)
            .set_item(Some(item.attributes().clone()))
            .send()
            .await?;
        Ok(())
    }
}

fn to_sdk_throughput(throughput: Throughput) -> Result<ProvisionedThroughput, StoreError> {
    Ok(ProvisionedThroughput::builder()
        .read_capacity_units(throughput.read_capacity_units)
        .write_capacity_units(throughput.write_capacity_units)
        .build()?)
}

fn to_sdk_index(index: &SecondaryIndex) -> Result<GlobalSecondaryIndex, StoreError> {
    let mut builder = GlobalSecondaryIndex::builder()
        .index_name(index.index_name())
        .provisioned_throughput(to_sdk_throughput(index.provisioned_throughput())?);

    for key in index.key_schema() {
        builder = builder.key_schema(
            KeySchemaElement::builder()
                .attribute_name(key.name())
                .key_type(key.kind().as_key_type())
                .build()?,
        );
    }

    let mut projection =
        Projection::builder().projection_type(index.projection_mode().as_projection_type());
    if let ProjectionMode::Include(attrs) = index.projection_mode() {
        projection = projection.set_non_key_attributes(Some(attrs.clone()));
    }

    Ok(builder.projection(projection.build()).build()?)
}

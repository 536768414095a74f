use aws_sdk_dynamodb::error::BuildError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_runtime_api::http::Response;
use serde_dynamo::Error as SerdeDynamoError;
use std::error::Error as StdError;
use std::fmt;

type DynamoCreateTableError = SdkError<CreateTableError, Response>;
type DynamoPutError = SdkError<PutItemError, Response>;

/// Credential/configuration resolution error
///
/// Surfaced once at process start, before any store interaction.
#[derive(Debug)]
pub enum ConfigError {
    /// A mandatory credential environment variable is not set
    MissingCredential(&'static str),
}

/// Error produced by a store's control-plane or data-plane operation
#[derive(Debug)]
pub enum StoreError {
    /// DynamoDB CreateTable operation error
    CreateTable(DynamoCreateTableError),
    /// DynamoDB PutItem operation error
    PutItem(DynamoPutError),
    /// DynamoDB request builder error
    Build(BuildError),
    /// Item serialization error
    Serialize(SerdeDynamoError),
    /// The table already exists in the target store
    TableExists(String),
    /// The input violates a catalog invariant and was rejected before reaching the store
    Validation(String),
}

impl StoreError {
    /// Check if the error means the table already existed
    ///
    /// Covers both the in-process rejection and DynamoDB's
    /// `ResourceInUseException`. Seeding is not idempotent, so a second run
    /// against the same store surfaces this on its first table.
    pub fn is_table_exists(&self) -> bool {
        match self {
            StoreError::TableExists(_) => true,
            StoreError::CreateTable(e) => matches!(
                e.as_service_error(),
                Some(CreateTableError::ResourceInUseException(_))
            ),
            _ => false,
        }
    }

    /// Check if the error is a catalog invariant rejection
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

/// Provisioning engine error
///
/// Fatal for the whole run. Everything written before the failure stays in
/// the store; nothing is rolled back or retried.
#[derive(Debug)]
pub enum ProvisionError {
    /// Table creation failed; no items were written for the fixture
    TableCreationFailed {
        /// Name of the table that could not be created
        table: String,
        /// Underlying store error
        source: StoreError,
    },
    /// An item write failed; items written before it remain in the store
    ItemWriteFailed {
        /// Name of the table being written
        table: String,
        /// Zero-based position of the failing item in the fixture's item list
        index: usize,
        /// Underlying store error
        source: StoreError,
    },
}

impl ProvisionError {
    /// Name of the table the failure occurred on
    pub fn table(&self) -> &str {
        match self {
            ProvisionError::TableCreationFailed { table, .. } => table,
            ProvisionError::ItemWriteFailed { table, .. } => table,
        }
    }

    /// Index of the failing item, if the failure happened on a write
    pub fn item_index(&self) -> Option<usize> {
        match self {
            ProvisionError::TableCreationFailed { .. } => None,
            ProvisionError::ItemWriteFailed { index, .. } => Some(*index),
        }
    }

    /// The underlying store error
    pub fn store_error(&self) -> &StoreError {
        match self {
            ProvisionError::TableCreationFailed { source, .. } => source,
            ProvisionError::ItemWriteFailed { source, .. } => source,
        }
    }
}

/// Top-level error for a seeding run
#[derive(Debug)]
pub enum Error {
    /// Credential resolution failed before any store interaction
    Config(ConfigError),
    /// The provisioning run failed
    Provision(ProvisionError),
}

macro_rules! impl_from_error {
    ($name:ident => $target:ident :: $variant:ident) => {
        impl From<$name> for $target {
            fn from(e: $name) -> Self {
                $target::$variant(e)
            }
        }
    };
}

impl_from_error!(DynamoCreateTableError => StoreError::CreateTable);
impl_from_error!(DynamoPutError => StoreError::PutItem);
impl_from_error!(BuildError => StoreError::Build);
impl_from_error!(SerdeDynamoError => StoreError::Serialize);
impl_from_error!(ConfigError => Error::Config);
impl_from_error!(ProvisionError => Error::Provision);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingCredential(name) => write!(
                f,
                "failed to get aws credentials: environment variable `{}` is not set",
                name
            ),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::CreateTable(e) => {
                write!(f, "DynamoDB CreateTable operation failed: {}", e)
            }
            StoreError::PutItem(e) => {
                write!(f, "DynamoDB PutItem operation failed: {}", e)
            }
            StoreError::Build(e) => write!(f, "DynamoDB request builder error: {}", e),
            StoreError::Serialize(e) => write!(f, "item serialization error: {}", e),
            StoreError::TableExists(table) => {
                write!(f, "table `{}` already exists", table)
            }
            StoreError::Validation(reason) => write!(f, "{}", reason),
        }
    }
}

impl fmt::Display for ProvisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionError::TableCreationFailed { table, source } => {
                write!(f, "failed to create table `{}`: {}", table, source)
            }
            ProvisionError::ItemWriteFailed {
                table,
                index,
                source,
            } => write!(
                f,
                "failed to write item {} to table `{}`: {}",
                index, table, source
            ),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "{}", e),
            Error::Provision(e) => write!(f, "{}", e),
        }
    }
}

impl StdError for ConfigError {}
impl StdError for StoreError {}
impl StdError for ProvisionError {}
impl StdError for Error {}

//! Fixture catalog data model
//!
//! A catalog is an ordered list of [`FixtureSpec`]s, each pairing a
//! [`TableSchema`] with the [`ItemRecord`]s to load into that table. The
//! catalog is plain data: it is constructed once, read by the provisioning
//! engine, and never mutated.

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::{AttributeValue, KeyType, ProjectionType, ScalarAttributeType};
use serde::Serialize;
use serde_dynamo::to_item;
use std::collections::HashMap;

use crate::error::StoreError;

/// Scalar type of a key attribute
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeType {
    /// DynamoDB `S`
    String,
    /// DynamoDB `N`
    Number,
    /// DynamoDB `B`
    Binary,
}

impl AttributeType {
    /// The SDK scalar type for this attribute type
    pub fn as_scalar(self) -> ScalarAttributeType {
        match self {
            AttributeType::String => ScalarAttributeType::S,
            AttributeType::Number => ScalarAttributeType::N,
            AttributeType::Binary => ScalarAttributeType::B,
        }
    }
}

/// Role of a key attribute within a key schema
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    /// Partition key
    Hash,
    /// Sort key
    Range,
}

impl KeyKind {
    /// The SDK key type for this key kind
    pub fn as_key_type(self) -> KeyType {
        match self {
            KeyKind::Hash => KeyType::Hash,
            KeyKind::Range => KeyType::Range,
        }
    }
}

/// One element of a key schema
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyAttribute {
    name: String,
    kind: KeyKind,
}

impl KeyAttribute {
    /// Attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hash or Range
    pub fn kind(&self) -> KeyKind {
        self.kind
    }
}

/// Attribute type declaration
///
/// Every attribute referenced by a key schema, primary or secondary, must
/// carry exactly one declaration on the owning table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeDecl {
    name: String,
    attribute_type: AttributeType,
}

impl AttributeDecl {
    /// Attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared scalar type
    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }
}

/// Provisioned read/write capacity units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Throughput {
    /// Read capacity units
    pub read_capacity_units: i64,
    /// Write capacity units
    pub write_capacity_units: i64,
}

impl Default for Throughput {
    fn default() -> Self {
        Self {
            read_capacity_units: 5,
            write_capacity_units: 5,
        }
    }
}

impl Throughput {
    /// Throughput with explicit read/write capacity units
    pub fn new(read_capacity_units: i64, write_capacity_units: i64) -> Self {
        Self {
            read_capacity_units,
            write_capacity_units,
        }
    }
}

/// Attribute projection mode of a secondary index
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Project every attribute
    All,
    /// Project key attributes only
    KeysOnly,
    /// Project key attributes plus the named non-key attributes
    Include(Vec<String>),
}

impl ProjectionMode {
    /// The SDK projection type for this mode
    pub fn as_projection_type(&self) -> ProjectionType {
        match self {
            ProjectionMode::All => ProjectionType::All,
            ProjectionMode::KeysOnly => ProjectionType::KeysOnly,
            ProjectionMode::Include(_) => ProjectionType::Include,
        }
    }
}

/// Global secondary index definition
///
/// Key attribute types are declared on the owning [`TableSchema`] via
/// [`TableSchema::attribute`], matching how DynamoDB scopes
/// `AttributeDefinitions` to the table.
#[derive(Clone, Debug, PartialEq)]
pub struct SecondaryIndex {
    name: String,
    key_schema: Vec<KeyAttribute>,
    projection: ProjectionMode,
    throughput: Throughput,
}

impl SecondaryIndex {
    /// New index with an `All` projection and default throughput
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_schema: Vec::new(),
            projection: ProjectionMode::All,
            throughput: Throughput::default(),
        }
    }

    /// Add the index partition key
    pub fn hash_key(mut self, name: impl Into<String>) -> Self {
        self.key_schema.push(KeyAttribute {
            name: name.into(),
            kind: KeyKind::Hash,
        });
        self
    }

    /// Add the index sort key
    pub fn range_key(mut self, name: impl Into<String>) -> Self {
        self.key_schema.push(KeyAttribute {
            name: name.into(),
            kind: KeyKind::Range,
        });
        self
    }

    /// Set the projection mode
    pub fn projection(mut self, mode: ProjectionMode) -> Self {
        self.projection = mode;
        self
    }

    /// Set the index throughput
    pub fn throughput(mut self, read_capacity_units: i64, write_capacity_units: i64) -> Self {
        self.throughput = Throughput::new(read_capacity_units, write_capacity_units);
        self
    }

    /// Index name
    pub fn index_name(&self) -> &str {
        &self.name
    }

    /// Index key schema
    pub fn key_schema(&self) -> &[KeyAttribute] {
        &self.key_schema
    }

    /// Projection mode
    pub fn projection_mode(&self) -> &ProjectionMode {
        &self.projection
    }

    /// Index throughput
    pub fn provisioned_throughput(&self) -> Throughput {
        self.throughput
    }
}

/// Declarative description of one table
///
/// # Example
///
/// ```rust
/// use dynamo_seed::catalog::{AttributeType, ProjectionMode, SecondaryIndex, TableSchema};
///
/// let schema = TableSchema::new("Project")
///     .hash_key("id", AttributeType::String)
///     .attribute("orgId", AttributeType::String)
///     .attribute("updatedAt", AttributeType::String)
///     .secondary_index(
///         SecondaryIndex::new("orgIndex")
///             .hash_key("orgId")
///             .range_key("updatedAt")
///             .projection(ProjectionMode::All),
///     );
/// assert!(schema.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TableSchema {
    name: String,
    key_schema: Vec<KeyAttribute>,
    attribute_definitions: Vec<AttributeDecl>,
    secondary_indexes: Vec<SecondaryIndex>,
    throughput: Throughput,
}

impl TableSchema {
    /// New schema with default throughput and no keys
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_schema: Vec::new(),
            attribute_definitions: Vec::new(),
            secondary_indexes: Vec::new(),
            throughput: Throughput::default(),
        }
    }

    /// Add the partition key and its type declaration
    pub fn hash_key(mut self, name: impl Into<String>, attribute_type: AttributeType) -> Self {
        let name = name.into();
        self.key_schema.push(KeyAttribute {
            name: name.clone(),
            kind: KeyKind::Hash,
        });
        self.attribute_definitions.push(AttributeDecl {
            name,
            attribute_type,
        });
        self
    }

    /// Add the sort key and its type declaration
    pub fn range_key(mut self, name: impl Into<String>, attribute_type: AttributeType) -> Self {
        let name = name.into();
        self.key_schema.push(KeyAttribute {
            name: name.clone(),
            kind: KeyKind::Range,
        });
        self.attribute_definitions.push(AttributeDecl {
            name,
            attribute_type,
        });
        self
    }

    /// Declare an attribute type without adding it to the primary key schema
    ///
    /// Needed for attributes used only as secondary index keys.
    pub fn attribute(mut self, name: impl Into<String>, attribute_type: AttributeType) -> Self {
        self.attribute_definitions.push(AttributeDecl {
            name: name.into(),
            attribute_type,
        });
        self
    }

    /// Add a secondary index
    pub fn secondary_index(mut self, index: SecondaryIndex) -> Self {
        self.secondary_indexes.push(index);
        self
    }

    /// Set the table throughput
    pub fn throughput(mut self, read_capacity_units: i64, write_capacity_units: i64) -> Self {
        self.throughput = Throughput::new(read_capacity_units, write_capacity_units);
        self
    }

    /// Table name
    pub fn table_name(&self) -> &str {
        &self.name
    }

    /// Primary key schema
    pub fn key_schema(&self) -> &[KeyAttribute] {
        &self.key_schema
    }

    /// Attribute type declarations
    pub fn attribute_definitions(&self) -> &[AttributeDecl] {
        &self.attribute_definitions
    }

    /// Secondary indexes
    pub fn secondary_indexes(&self) -> &[SecondaryIndex] {
        &self.secondary_indexes
    }

    /// Table throughput
    pub fn provisioned_throughput(&self) -> Throughput {
        self.throughput
    }

    /// Check the schema invariants
    ///
    /// Every key schema (primary and per-index) must hold exactly one Hash
    /// key and at most one Range key, and every key attribute must have
    /// exactly one type declaration on the table.
    pub fn validate(&self) -> Result<(), StoreError> {
        for (i, decl) in self.attribute_definitions.iter().enumerate() {
            if self.attribute_definitions[..i]
                .iter()
                .any(|earlier| earlier.name == decl.name)
            {
                return Err(StoreError::Validation(format!(
                    "table `{}`: attribute `{}` is declared more than once",
                    self.name, decl.name
                )));
            }
        }

        check_key_schema(&format!("table `{}`", self.name), &self.key_schema)?;
        self.check_keys_declared(&format!("table `{}`", self.name), &self.key_schema)?;

        for index in &self.secondary_indexes {
            let scope = format!("index `{}` of table `{}`", index.name, self.name);
            check_key_schema(&scope, &index.key_schema)?;
            self.check_keys_declared(&scope, &index.key_schema)?;
        }

        Ok(())
    }

    /// Check that an item carries every key attribute, non-null
    pub fn check_item_keys(&self, item: &ItemRecord) -> Result<(), StoreError> {
        for key in &self.key_schema {
            match item.get(key.name()) {
                None => {
                    return Err(StoreError::Validation(format!(
                        "item for table `{}` is missing key attribute `{}`",
                        self.name,
                        key.name()
                    )));
                }
                Some(AttributeValue::Null(_)) => {
                    return Err(StoreError::Validation(format!(
                        "item for table `{}` has null key attribute `{}`",
                        self.name,
                        key.name()
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn check_keys_declared(&self, scope: &str, keys: &[KeyAttribute]) -> Result<(), StoreError> {
        for key in keys {
            if !self
                .attribute_definitions
                .iter()
                .any(|decl| decl.name == key.name)
            {
                return Err(StoreError::Validation(format!(
                    "{}: key attribute `{}` has no attribute type declaration",
                    scope, key.name
                )));
            }
        }
        Ok(())
    }
}

fn check_key_schema(scope: &str, keys: &[KeyAttribute]) -> Result<(), StoreError> {
    if keys.is_empty() || keys.len() > 2 {
        return Err(StoreError::Validation(format!(
            "{}: key schema must hold one or two key attributes, got {}",
            scope,
            keys.len()
        )));
    }

    let hash_count = keys.iter().filter(|k| k.kind == KeyKind::Hash).count();
    if hash_count != 1 {
        return Err(StoreError::Validation(format!(
            "{}: key schema must hold exactly one HASH key, got {}",
            scope, hash_count
        )));
    }

    let range_count = keys.iter().filter(|k| k.kind == KeyKind::Range).count();
    if range_count > 1 {
        return Err(StoreError::Validation(format!(
            "{}: key schema must hold at most one RANGE key, got {}",
            scope, range_count
        )));
    }

    Ok(())
}

/// One item to write, as a typed attribute map
///
/// Values are built either attribute by attribute (`set_*`) or from any
/// `Serialize` model via [`ItemRecord::from_model`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemRecord {
    attributes: HashMap<String, AttributeValue>,
}

impl ItemRecord {
    /// Empty item
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an item from a `Serialize` model
    pub fn from_model<T: Serialize>(model: &T) -> Result<Self, StoreError> {
        let attributes: HashMap<String, AttributeValue> = to_item(model)?;
        Ok(Self { attributes })
    }

    /// Set a string attribute
    pub fn set_string(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self
            .attributes
            .insert(name.into(), AttributeValue::S(value.into()));
        self
    }

    /// Set a number attribute
    ///
    /// DynamoDB numbers travel as strings; any `ToString` number works.
    pub fn set_number(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        let _ = self
            .attributes
            .insert(name.into(), AttributeValue::N(value.to_string()));
        self
    }

    /// Set a binary attribute
    pub fn set_binary(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let _ = self
            .attributes
            .insert(name.into(), AttributeValue::B(Blob::new(bytes)));
        self
    }

    /// Set a boolean attribute
    pub fn set_bool(mut self, name: impl Into<String>, value: bool) -> Self {
        let _ = self
            .attributes
            .insert(name.into(), AttributeValue::Bool(value));
        self
    }

    /// Set a null attribute
    pub fn set_null(mut self, name: impl Into<String>) -> Self {
        let _ = self
            .attributes
            .insert(name.into(), AttributeValue::Null(true));
        self
    }

    /// Set a string-set attribute
    pub fn set_string_set<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        let _ = self
            .attributes
            .insert(name.into(), AttributeValue::Ss(values));
        self
    }

    /// Set a number-set attribute
    pub fn set_number_set<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        let _ = self
            .attributes
            .insert(name.into(), AttributeValue::Ns(values));
        self
    }

    /// Set a binary-set attribute
    pub fn set_binary_set<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Vec<u8>>,
    {
        let values = values.into_iter().map(Blob::new).collect();
        let _ = self
            .attributes
            .insert(name.into(), AttributeValue::Bs(values));
        self
    }

    /// Set a raw attribute value
    pub fn set_value(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        let _ = self.attributes.insert(name.into(), value);
        self
    }

    /// Look up an attribute by name
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the item has no attributes
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Borrow the attribute map
    pub fn attributes(&self) -> &HashMap<String, AttributeValue> {
        &self.attributes
    }

    /// Consume the item into its attribute map
    pub fn into_attributes(self) -> HashMap<String, AttributeValue> {
        self.attributes
    }
}

/// One fixture: a table schema plus the items to load into it
///
/// Constructed once as static configuration and consumed exactly once per
/// provisioning run; item order is write order.
#[derive(Clone, Debug, PartialEq)]
pub struct FixtureSpec {
    schema: TableSchema,
    items: Vec<ItemRecord>,
}

impl FixtureSpec {
    /// Fixture with no items
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            items: Vec::new(),
        }
    }

    /// Append one item
    pub fn with_item(mut self, item: ItemRecord) -> Self {
        self.items.push(item);
        self
    }

    /// Append several items, preserving their order
    pub fn with_items(mut self, items: impl IntoIterator<Item = ItemRecord>) -> Self {
        self.items.extend(items);
        self
    }

    /// The table schema
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// The items, in write order
    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }
}

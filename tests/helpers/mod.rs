//! Shared in-memory store fake
//!
//! `MemoryStore` implements the store seam without a running DynamoDB: it
//! records every control-plane and data-plane call in issue order, keeps
//! table contents, and can be told to fail a specific create or write.

use async_trait::async_trait;
use dynamo_seed::catalog::{ItemRecord, TableSchema};
use dynamo_seed::{FixtureStore, StoreError};
use std::collections::HashMap;
use std::sync::Mutex;

/// One recorded store call
#[derive(Clone, Debug, PartialEq)]
pub enum StoreCall {
    CreateTable(String),
    PutItem(String, ItemRecord),
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<ItemRecord>>>,
    calls: Mutex<Vec<StoreCall>>,
    fail_create: Mutex<Option<String>>,
    fail_put: Mutex<Option<(String, usize)>>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_table` for `table` fail with a simulated outage
    pub fn fail_create_table(&self, table: &str) {
        *self.fail_create.lock().unwrap() = Some(table.to_string());
    }

    /// Make the write that would land at `index` in `table` fail
    pub fn fail_put_item(&self, table: &str, index: usize) {
        *self.fail_put.lock().unwrap() = Some((table.to_string(), index));
    }

    /// Every call issued so far, in order
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Contents of `name`, in write order, if the table exists
    pub fn table(&self, name: &str) -> Option<Vec<ItemRecord>> {
        self.tables.lock().unwrap().get(name).cloned()
    }

    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.lock().unwrap().keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl FixtureStore for MemoryStore {
    async fn create_table(&self, schema: &TableSchema) -> Result<(), StoreError> {
        let name = schema.table_name().to_string();
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::CreateTable(name.clone()));

        if self.fail_create.lock().unwrap().as_deref() == Some(name.as_str()) {
            return Err(StoreError::Validation(
                "simulated control-plane outage".to_string(),
            ));
        }

        let mut tables = self.tables.lock().unwrap();
        if tables.contains_key(&name) {
            return Err(StoreError::TableExists(name));
        }
        let _ = tables.insert(name, Vec::new());
        Ok(())
    }

    async fn put_item(&self, table: &str, item: &ItemRecord) -> Result<(), StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::PutItem(table.to_string(), item.clone()));

        let mut tables = self.tables.lock().unwrap();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::Validation(format!("table `{}` does not exist", table)))?;

        if let Some((fail_table, fail_index)) = self.fail_put.lock().unwrap().as_ref() {
            if fail_table == table && *fail_index == rows.len() {
                return Err(StoreError::Validation(
                    "simulated data-plane outage".to_string(),
                ));
            }
        }

        rows.push(item.clone());
        Ok(())
    }
}

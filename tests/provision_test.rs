//! Engine behavior against the in-memory store

mod helpers;

use dynamo_seed::catalog::{AttributeType, FixtureSpec, ItemRecord, TableSchema};
use dynamo_seed::credentials::resolve_credentials_with;
use dynamo_seed::{AttributeValue, ProvisionError, provision_catalog, provision_fixture};
use helpers::{MemoryStore, StoreCall};
use serde::Serialize;

fn table_t() -> TableSchema {
    TableSchema::new("T").hash_key("id", AttributeType::String)
}

fn two_item_fixture() -> FixtureSpec {
    FixtureSpec::new(table_t())
        .with_item(ItemRecord::new().set_string("id", "a"))
        .with_item(ItemRecord::new().set_string("id", "b"))
}

#[tokio::test]
async fn provisions_table_and_items_in_order() {
    let store = MemoryStore::new();
    provision_catalog(&store, &[two_item_fixture()])
        .await
        .unwrap();

    let rows = store.table("T").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("id"), Some(&AttributeValue::S("a".to_string())));
    assert_eq!(rows[1].get("id"), Some(&AttributeValue::S("b".to_string())));

    assert_eq!(
        store.calls(),
        vec![
            StoreCall::CreateTable("T".to_string()),
            StoreCall::PutItem("T".to_string(), ItemRecord::new().set_string("id", "a")),
            StoreCall::PutItem("T".to_string(), ItemRecord::new().set_string("id", "b")),
        ]
    );
}

#[tokio::test]
async fn write_order_matches_item_list_order() {
    let items: Vec<ItemRecord> = (0..10)
        .map(|i| ItemRecord::new().set_string("id", format!("id{}", i)))
        .collect();
    let fixture = FixtureSpec::new(table_t()).with_items(items.clone());

    let store = MemoryStore::new();
    provision_fixture(&store, &fixture).await.unwrap();

    let puts: Vec<ItemRecord> = store
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            StoreCall::PutItem(_, item) => Some(item),
            StoreCall::CreateTable(_) => None,
        })
        .collect();
    assert_eq!(puts, items);
}

#[tokio::test]
async fn empty_fixture_creates_table_with_no_items() {
    let store = MemoryStore::new();
    provision_fixture(&store, &FixtureSpec::new(table_t()))
        .await
        .unwrap();

    assert_eq!(store.table("T").unwrap().len(), 0);
    assert_eq!(store.call_count(), 1);
}

#[tokio::test]
async fn create_failure_aborts_before_any_write() {
    let store = MemoryStore::new();
    store.fail_create_table("T");

    let err = provision_catalog(&store, &[two_item_fixture()])
        .await
        .unwrap_err();
    assert!(matches!(err, ProvisionError::TableCreationFailed { .. }));
    assert_eq!(err.table(), "T");

    // only the failed create reached the store
    assert_eq!(store.calls(), vec![StoreCall::CreateTable("T".to_string())]);
    assert!(store.table("T").is_none());
}

#[tokio::test]
async fn item_failure_keeps_prefix_and_reports_index() {
    let store = MemoryStore::new();
    store.fail_put_item("T", 1);

    let err = provision_catalog(&store, &[two_item_fixture()])
        .await
        .unwrap_err();
    match &err {
        ProvisionError::ItemWriteFailed { table, index, .. } => {
            assert_eq!(table, "T");
            assert_eq!(*index, 1);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // the table and exactly the first item remain
    let rows = store.table("T").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("id"), Some(&AttributeValue::S("a".to_string())));
}

#[tokio::test]
async fn catalog_halts_at_first_failing_fixture() {
    let store = MemoryStore::new();
    store.fail_create_table("second");

    let catalog = vec![
        FixtureSpec::new(TableSchema::new("first").hash_key("id", AttributeType::String))
            .with_item(ItemRecord::new().set_string("id", "a")),
        FixtureSpec::new(TableSchema::new("second").hash_key("id", AttributeType::String))
            .with_item(ItemRecord::new().set_string("id", "b")),
        FixtureSpec::new(TableSchema::new("third").hash_key("id", AttributeType::String)),
    ];

    let err = provision_catalog(&store, &catalog).await.unwrap_err();
    assert_eq!(err.table(), "second");

    // everything before the failure is written, nothing after is attempted
    assert_eq!(store.table("first").unwrap().len(), 1);
    assert!(store.table("third").is_none());
    assert!(
        !store
            .calls()
            .contains(&StoreCall::CreateTable("third".to_string()))
    );
    assert!(
        !store
            .calls()
            .iter()
            .any(|call| matches!(call, StoreCall::PutItem(table, _) if table == "second"))
    );
}

#[tokio::test]
async fn duplicate_table_name_fails_on_second_occurrence() {
    let store = MemoryStore::new();
    let catalog = vec![
        FixtureSpec::new(table_t()).with_item(ItemRecord::new().set_string("id", "a")),
        FixtureSpec::new(table_t()).with_item(ItemRecord::new().set_string("id", "b")),
    ];

    let err = provision_catalog(&store, &catalog).await.unwrap_err();
    match &err {
        ProvisionError::TableCreationFailed { table, source } => {
            assert_eq!(table, "T");
            assert!(source.is_table_exists());
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // the duplicate fixture's items were never written
    assert_eq!(store.table("T").unwrap().len(), 1);
}

#[tokio::test]
async fn second_run_fails_on_first_create() {
    let store = MemoryStore::new();
    let catalog = vec![two_item_fixture()];

    provision_catalog(&store, &catalog).await.unwrap();
    let err = provision_catalog(&store, &catalog).await.unwrap_err();

    assert!(matches!(
        &err,
        ProvisionError::TableCreationFailed { source, .. } if source.is_table_exists()
    ));
}

#[tokio::test]
async fn missing_credential_fails_before_any_store_call() {
    let store = MemoryStore::new();

    // the run flow of the seeding binary: credentials first, then provision
    let run = || async {
        let _credentials =
            resolve_credentials_with(|_| None).map_err(dynamo_seed::Error::from)?;
        provision_catalog(&store, &[two_item_fixture()])
            .await
            .map_err(dynamo_seed::Error::from)
    };

    let err = run().await.unwrap_err();
    assert!(matches!(err, dynamo_seed::Error::Config(_)));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn invalid_schema_is_rejected_before_reaching_the_store() {
    let store = MemoryStore::new();
    let broken =
        FixtureSpec::new(TableSchema::new("broken").range_key("year", AttributeType::Number));

    let err = provision_fixture(&store, &broken).await.unwrap_err();
    assert!(matches!(err, ProvisionError::TableCreationFailed { .. }));
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn item_missing_key_attribute_reports_its_index() {
    let store = MemoryStore::new();
    let fixture = FixtureSpec::new(table_t())
        .with_item(ItemRecord::new().set_string("id", "a"))
        .with_item(ItemRecord::new().set_string("name", "no key here"));

    let err = provision_fixture(&store, &fixture).await.unwrap_err();
    assert_eq!(err.item_index(), Some(1));
    assert!(err.store_error().is_validation());

    // the first item made it in before the rejection
    assert_eq!(store.table("T").unwrap().len(), 1);
}

#[tokio::test]
async fn typed_models_provision_like_hand_built_items() {
    #[derive(Serialize)]
    struct HelloRow {
        id: String,
        year: u32,
    }

    let fixture = FixtureSpec::new(
        TableSchema::new("hello")
            .hash_key("id", AttributeType::String)
            .range_key("year", AttributeType::Number),
    )
    .with_item(
        ItemRecord::from_model(&HelloRow {
            id: "bokuweb".to_string(),
            year: 2019,
        })
        .unwrap(),
    )
    .with_item(
        ItemRecord::from_model(&HelloRow {
            id: "raiden".to_string(),
            year: 2020,
        })
        .unwrap(),
    );

    let store = MemoryStore::new();
    provision_fixture(&store, &fixture).await.unwrap();

    let rows = store.table("hello").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].get("id"),
        Some(&AttributeValue::S("bokuweb".to_string()))
    );
    assert_eq!(
        rows[1].get("year"),
        Some(&AttributeValue::N("2020".to_string()))
    );
}

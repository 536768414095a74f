//! Provisioning engine
//!
//! Drives a fixture catalog against a [`FixtureStore`]: create each table,
//! then write its items, strictly one call at a time. The sequencing is the
//! engine's whole concurrency contract — every control-plane and data-plane
//! call is fully awaited before the next is issued, so at most one write is
//! ever in flight against the store's write buffer.

use tracing::info;

use crate::catalog::FixtureSpec;
use crate::error::ProvisionError;
use crate::store::FixtureStore;

/// Provision every fixture in `catalog`, strictly in catalog order
///
/// Stops at the first failure and propagates it unchanged. Fixtures after
/// the failing one are never attempted, nothing already written is rolled
/// back, and nothing is retried.
pub async fn provision_catalog<S>(store: &S, catalog: &[FixtureSpec]) -> Result<(), ProvisionError>
where
    S: FixtureStore + ?Sized,
{
    for spec in catalog {
        provision_fixture(store, spec).await?;
    }
    Ok(())
}

/// Create one fixture's table, then write its items one at a time, in order
///
/// The table named by the fixture's schema must not already exist. On a
/// creation failure no items are written; on a write failure the error
/// carries the zero-based item index, and items written before it stay in
/// the store.
pub async fn provision_fixture<S>(store: &S, spec: &FixtureSpec) -> Result<(), ProvisionError>
where
    S: FixtureStore + ?Sized,
{
    let table = spec.schema().table_name();
    info!("processing table `{}`", table);

    spec.schema()
        .validate()
        .map_err(|source| ProvisionError::TableCreationFailed {
            table: table.to_string(),
            source,
        })?;

    store
        .create_table(spec.schema())
        .await
        .map_err(|source| ProvisionError::TableCreationFailed {
            table: table.to_string(),
            source,
        })?;

    // NOTE: issuing these puts concurrently runs the store out of write
    // buffer; each write must complete before the next is issued.
    for (index, item) in spec.items().iter().enumerate() {
        spec.schema()
            .check_item_keys(item)
            .map_err(|source| ProvisionError::ItemWriteFailed {
                table: table.to_string(),
                index,
                source,
            })?;

        store
            .put_item(table, item)
            .await
            .map_err(|source| ProvisionError::ItemWriteFailed {
                table: table.to_string(),
                index,
                source,
            })?;
    }

    Ok(())
}

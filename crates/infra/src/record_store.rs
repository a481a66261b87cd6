//! In-memory record store for items, stock snapshots and deliveries.
//!
//! Lock order is always items → snapshots → deliveries. Writes that depend on
//! an item (recording a count, scheduling a delivery) hold the item table's
//! read lock for their whole duration so the item cannot be deleted under them.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use stockcast_core::{DeliveryId, DomainError, Entity, ItemId, SnapshotId};
use stockcast_forecast::{ForecastError, IncomingUnits, LatestStock, RecordReader, SnapshotObservation};
use stockcast_inventory::{Delivery, Item, ItemDetails, StockSnapshot};

use crate::dataset::Dataset;
use crate::error::StoreError;
use crate::item_cache::ItemCache;

/// Default number of rows shown in the snapshot history view.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// One table of entities keyed by their id.
#[derive(Debug)]
struct RecordTable<E: Entity> {
    name: &'static str,
    rows: RwLock<BTreeMap<E::Id, E>>,
}

impl<E: Entity> RecordTable<E> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<E::Id, E>>, StoreError> {
        self.rows.read().map_err(|_| StoreError::Poisoned(self.name))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<E::Id, E>>, StoreError> {
        self.rows.write().map_err(|_| StoreError::Poisoned(self.name))
    }
}

fn insert<E: Entity>(rows: &mut BTreeMap<E::Id, E>, record: E) -> E::Id {
    let id = *record.id();
    rows.insert(id, record);
    id
}

/// Outcome of loading a [`Dataset`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub items: usize,
    pub snapshots: usize,
    pub deliveries: usize,
    /// Snapshots and deliveries whose item is not part of the store.
    pub orphans: usize,
}

/// Process-local record store.
///
/// Item reads go through an [`ItemCache`] that every item mutation clears
/// before releasing the item table's write lock.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    items: RecordTable<Item>,
    snapshots: RecordTable<StockSnapshot>,
    deliveries: RecordTable<Delivery>,
    item_cache: ItemCache,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            items: RecordTable::new("items"),
            snapshots: RecordTable::new("snapshots"),
            deliveries: RecordTable::new("deliveries"),
            item_cache: ItemCache::new(),
        }
    }

    pub fn item_cache(&self) -> &ItemCache {
        &self.item_cache
    }

    pub fn add_item(&self, details: ItemDetails) -> Result<ItemId, StoreError> {
        let item = Item::new(ItemId::new(), details)?;
        let mut items = self.items.write()?;
        let id = insert(&mut *items, item);
        self.item_cache.invalidate();
        debug!(item = %id, "item added");
        Ok(id)
    }

    /// Replace an item's master data. Existing snapshots and deliveries keep
    /// the totals computed when they were written.
    pub fn update_item(&self, id: ItemId, details: ItemDetails) -> Result<(), StoreError> {
        let mut items = self.items.write()?;
        let item = items.get_mut(&id).ok_or_else(DomainError::not_found)?;
        item.revise(details)?;
        self.item_cache.invalidate();
        debug!(item = %id, "item updated");
        Ok(())
    }

    /// Delete an item that no snapshot or delivery references.
    pub fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        let mut items = self.items.write()?;
        if !items.contains_key(&id) {
            return Err(DomainError::not_found().into());
        }

        let snapshot_refs = self.snapshots.read()?.values().filter(|s| s.item_id == id).count();
        let delivery_refs = self.deliveries.read()?.values().filter(|d| d.item_id == id).count();
        if snapshot_refs > 0 || delivery_refs > 0 {
            return Err(DomainError::conflict(format!(
                "item {id} is still referenced by {snapshot_refs} snapshot(s) and {delivery_refs} delivery record(s)"
            ))
            .into());
        }

        items.remove(&id);
        self.item_cache.invalidate();
        debug!(item = %id, "item deleted");
        Ok(())
    }

    pub fn item(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        Ok(self.items.read()?.get(&id).cloned())
    }

    /// All items, served from the cache when it is warm.
    pub fn list_items(&self) -> Result<Arc<Vec<Item>>, StoreError> {
        if let Some(items) = self.item_cache.get() {
            return Ok(items);
        }
        let items = self.items.read()?;
        Ok(self.item_cache.fill(items.values().cloned().collect()))
    }

    /// Record a stock count. `total_units` is fixed from the item's packaging now.
    pub fn record_snapshot(
        &self,
        item_id: ItemId,
        date: NaiveDate,
        qty_case: u32,
        qty_box: u32,
        note: impl Into<String>,
    ) -> Result<SnapshotId, StoreError> {
        let items = self.items.read()?;
        let item = items.get(&item_id).ok_or_else(DomainError::not_found)?;
        let snapshot = StockSnapshot::record(SnapshotId::new(), item, date, qty_case, qty_box, note)?;
        let total_units = snapshot.total_units;
        let id = insert(&mut *self.snapshots.write()?, snapshot);
        debug!(item = %item_id, snapshot = %id, %date, total_units, "stock counted");
        Ok(id)
    }

    pub fn delete_snapshot(&self, id: SnapshotId) -> Result<(), StoreError> {
        self.snapshots
            .write()?
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found().into())
    }

    /// Record an order and its expected arrival.
    pub fn schedule_delivery(
        &self,
        item_id: ItemId,
        order_date: NaiveDate,
        arrival_date: NaiveDate,
        qty_case: u32,
        qty_box: u32,
        note: impl Into<String>,
    ) -> Result<DeliveryId, StoreError> {
        let items = self.items.read()?;
        let item = items.get(&item_id).ok_or_else(DomainError::not_found)?;
        let delivery = Delivery::schedule(
            DeliveryId::new(),
            item,
            order_date,
            arrival_date,
            qty_case,
            qty_box,
            note,
        )?;
        let total_units = delivery.total_units;
        let id = insert(&mut *self.deliveries.write()?, delivery);
        debug!(item = %item_id, delivery = %id, %arrival_date, total_units, "delivery scheduled");
        Ok(id)
    }

    pub fn delete_delivery(&self, id: DeliveryId) -> Result<(), StoreError> {
        self.deliveries
            .write()?
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found().into())
    }

    /// Newest snapshots first; same-day counts newest-written first.
    pub fn recent_snapshots(&self, limit: usize) -> Result<Vec<StockSnapshot>, StoreError> {
        let snapshots = self.snapshots.read()?;
        let mut rows: Vec<StockSnapshot> = snapshots.values().cloned().collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        rows.truncate(limit);
        Ok(rows)
    }

    /// Every delivery, by arrival date and then order date.
    pub fn delivery_schedule(&self) -> Result<Vec<Delivery>, StoreError> {
        let deliveries = self.deliveries.read()?;
        let mut rows: Vec<Delivery> = deliveries.values().cloned().collect();
        rows.sort_by(|a, b| {
            a.arrival_date
                .cmp(&b.arrival_date)
                .then_with(|| a.order_date.cmp(&b.order_date))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    /// Load records as-is, keeping their ids and stored totals.
    ///
    /// Snapshots and deliveries for unknown items are kept; the forecast
    /// reports them as integrity warnings.
    pub fn import(&self, dataset: Dataset) -> Result<ImportSummary, StoreError> {
        for item in &dataset.items {
            item.details.validate()?;
        }

        let mut items = self.items.write()?;
        let mut snapshots = self.snapshots.write()?;
        let mut deliveries = self.deliveries.write()?;

        let mut summary = ImportSummary::default();
        for item in dataset.items {
            insert(&mut *items, item);
            summary.items += 1;
        }
        for snapshot in dataset.snapshots {
            if !items.contains_key(&snapshot.item_id) {
                summary.orphans += 1;
            }
            insert(&mut *snapshots, snapshot);
            summary.snapshots += 1;
        }
        for delivery in dataset.deliveries {
            if !items.contains_key(&delivery.item_id) {
                summary.orphans += 1;
            }
            insert(&mut *deliveries, delivery);
            summary.deliveries += 1;
        }
        self.item_cache.invalidate();

        if summary.orphans > 0 {
            warn!(orphans = summary.orphans, "imported records reference unknown items");
        }
        info!(
            items = summary.items,
            snapshots = summary.snapshots,
            deliveries = summary.deliveries,
            "dataset imported"
        );
        Ok(summary)
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordReader for InMemoryRecordStore {
    fn items(&self) -> Result<Vec<Item>, ForecastError> {
        Ok(self.list_items()?.as_ref().clone())
    }

    fn snapshots_since(&self, cutoff: NaiveDate) -> Result<Vec<SnapshotObservation>, ForecastError> {
        let snapshots = self.snapshots.read()?;
        let mut rows: Vec<SnapshotObservation> = snapshots
            .values()
            .filter(|s| s.date >= cutoff)
            .map(|s| SnapshotObservation {
                snapshot_id: s.id,
                item_id: s.item_id,
                date: s.date,
                total_units: s.total_units,
            })
            .collect();
        rows.sort_by_key(|s| (s.item_id, s.date, s.snapshot_id));
        Ok(rows)
    }

    fn deliveries_in_window(
        &self,
        start_exclusive: NaiveDate,
        end_inclusive: NaiveDate,
    ) -> Result<Vec<IncomingUnits>, ForecastError> {
        let deliveries = self.deliveries.read()?;
        let mut totals: BTreeMap<ItemId, i64> = BTreeMap::new();
        for delivery in deliveries
            .values()
            .filter(|d| d.arrival_date > start_exclusive && d.arrival_date <= end_inclusive)
        {
            *totals.entry(delivery.item_id).or_default() += delivery.total_units;
        }
        Ok(totals
            .into_iter()
            .map(|(item_id, total_units)| IncomingUnits { item_id, total_units })
            .collect())
    }

    fn latest_stock(&self) -> Result<Vec<LatestStock>, ForecastError> {
        let snapshots = self.snapshots.read()?;
        let mut latest: BTreeMap<ItemId, &StockSnapshot> = BTreeMap::new();
        for snapshot in snapshots.values() {
            latest
                .entry(snapshot.item_id)
                .and_modify(|current| {
                    if (snapshot.date, snapshot.id) > (current.date, current.id) {
                        *current = snapshot;
                    }
                })
                .or_insert(snapshot);
        }
        Ok(latest
            .into_values()
            .map(|s| LatestStock {
                item_id: s.item_id,
                current_stock: s.total_units,
                last_date: s.date,
            })
            .collect())
    }
}

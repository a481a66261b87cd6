use std::sync::Arc;

use chrono::NaiveDate;

use stockcast_core::ItemId;
use stockcast_forecast::{
    ForecastConfig, ForecastEngine, IntegrityWarning, Occupancy, RateSource, RecordKind,
};
use stockcast_infra::{Dataset, ForecastService, InMemoryRecordStore};
use stockcast_inventory::Area;

const SHAMPOO: &str = "01900000-0000-7000-8000-000000000001";
const KITS: &str = "01900000-0000-7000-8000-000000000002";
const GHOST: &str = "01900000-0000-7000-8000-0000000000ff";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 31).unwrap()
}

fn id(raw: &str) -> ItemId {
    raw.parse().unwrap()
}

fn dataset() -> Dataset {
    let json = format!(
        r#"{{
        "items": [
            {{ "id": "{SHAMPOO}", "name": "Shampoo", "area": "STD", "unit": "本",
               "case_size": 24, "units_per_box": 6, "boxes_per_case": 4, "safety_stock": 12 }},
            {{ "id": "{KITS}", "name": "Amenity kit", "area": "HAK", "unit": "set",
               "per_room_rate": 2.0, "safety_stock": 0 }}
        ],
        "snapshots": [
            {{ "id": "01900000-0000-7000-8000-000000000101", "item_id": "{SHAMPOO}",
               "date": "2025-05-01", "qty_case": 40, "qty_box": 0, "total_units": 960 }},
            {{ "id": "01900000-0000-7000-8000-000000000102", "item_id": "{SHAMPOO}",
               "date": "2025-08-01", "qty_case": 10, "qty_box": 0, "total_units": 240 }},
            {{ "id": "01900000-0000-7000-8000-000000000103", "item_id": "{SHAMPOO}",
               "date": "2025-08-21", "qty_case": 5, "qty_box": 0, "total_units": 120 }},
            {{ "id": "01900000-0000-7000-8000-000000000104", "item_id": "{GHOST}",
               "date": "2025-08-21", "qty_case": 1, "qty_box": 0, "total_units": 10 }}
        ],
        "deliveries": [
            {{ "id": "01900000-0000-7000-8000-000000000201", "item_id": "{SHAMPOO}",
               "order_date": "2025-08-25", "arrival_date": "2025-09-05",
               "qty_case": 2, "qty_box": 0, "total_units": 48 }},
            {{ "id": "01900000-0000-7000-8000-000000000202", "item_id": "{SHAMPOO}",
               "order_date": "2025-08-25", "arrival_date": "2025-08-31",
               "qty_case": 9, "qty_box": 0, "total_units": 216, "note": "arrived today" }}
        ]
    }}"#
    );
    Dataset::from_json(&json).unwrap()
}

fn service() -> (Arc<InMemoryRecordStore>, ForecastService<InMemoryRecordStore>) {
    let store = Arc::new(InMemoryRecordStore::new());
    let summary = store.import(dataset()).unwrap();
    assert_eq!(summary.items, 2);
    assert_eq!(summary.snapshots, 4);
    assert_eq!(summary.deliveries, 2);
    assert_eq!(summary.orphans, 1);
    let service = ForecastService::new(Arc::clone(&store), ForecastEngine::default());
    (store, service)
}

#[test]
fn imported_records_drive_the_forecast() {
    let (_store, service) = service();
    let report = service.forecast(today(), &ForecastConfig::default()).unwrap();

    // The May count is outside the 60-day lookback: 240 → 120 over 20 days.
    let shampoo = report.row(id(SHAMPOO)).unwrap();
    assert_eq!(shampoo.empirical_rate, Some(6.0));
    assert_eq!(shampoo.rate_source, RateSource::Empirical);
    assert_eq!(shampoo.current_stock, 120);
    // The delivery arriving today is not counted as incoming.
    assert_eq!(shampoo.incoming_units, 48);
    // 180 + 12 - 120 - 48
    assert_eq!(shampoo.order_qty, 24.0);
    assert_eq!(shampoo.order_qty_display, "1.0 CS equivalent");

    // 13 rooms × 0.70 × 2.0
    let kits = report.row(id(KITS)).unwrap();
    assert_eq!(kits.rate_source, RateSource::Theoretical);
    assert!((kits.daily_rate - 18.2).abs() < 1e-9);
    assert_eq!(kits.order_qty_display, "546 set");

    assert_eq!(
        report.warnings,
        vec![IntegrityWarning::MissingMasterData {
            record: RecordKind::Snapshot,
            item_id: id(GHOST),
        }]
    );
}

#[test]
fn occupancy_override_scales_both_rates() {
    let (_store, service) = service();
    let config = ForecastConfig::default()
        .with_occupancy(Area::Standard, Occupancy::normalize(46.5).unwrap())
        .with_occupancy(Area::Hakata, Occupancy::normalize(0.35).unwrap());
    let report = service.forecast(today(), &config).unwrap();

    // 46.5 / 93 halves the observed rate.
    let shampoo = report.row(id(SHAMPOO)).unwrap();
    assert!((shampoo.occupancy_factor - 0.5).abs() < 1e-9);
    assert!((shampoo.daily_rate - 3.0).abs() < 1e-9);

    let kits = report.row(id(KITS)).unwrap();
    assert!((kits.daily_rate - 9.1).abs() < 1e-9);
}

#[test]
fn dashboard_and_ranking_views() {
    let (_store, service) = service();
    let dashboard = service.dashboard(today(), &ForecastConfig::default()).unwrap();

    assert_eq!(dashboard.summary.total_items, 2);
    assert_eq!(dashboard.summary.items_needing_order, 2);
    assert_eq!(dashboard.summary.scheduled_deliveries, 2);

    let ranked: Vec<ItemId> = dashboard.report.ranked().iter().map(|r| r.item_id).collect();
    assert_eq!(ranked, vec![id(KITS), id(SHAMPOO)]);
}

#[test]
fn new_counts_change_the_next_run_only() {
    let (store, service) = service();
    let before = service.forecast(today(), &ForecastConfig::default()).unwrap();

    store.record_snapshot(id(SHAMPOO), today(), 15, 0, "restocked").unwrap();
    let after = service.forecast(today(), &ForecastConfig::default()).unwrap();

    assert_eq!(before.row(id(SHAMPOO)).unwrap().current_stock, 120);
    let shampoo = after.row(id(SHAMPOO)).unwrap();
    assert_eq!(shampoo.current_stock, 360);
    assert_eq!(shampoo.last_count_date, Some(today()));
}

#[test]
fn referenced_items_survive_delete_attempts() {
    let (store, service) = service();
    assert!(store.delete_item(id(SHAMPOO)).is_err());

    let report = service.forecast(today(), &ForecastConfig::default()).unwrap();
    assert!(report.row(id(SHAMPOO)).is_some());
}

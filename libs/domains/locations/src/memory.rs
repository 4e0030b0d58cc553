//! In-process LocationRepository for tests and local runs without MongoDB.

use async_trait::async_trait;
use mongodb::bson::{self, Document};
use std::cmp::Ordering;
use tokio::sync::RwLock;

use crate::error::LocationResult;
use crate::geo::haversine_distance_meters;
use crate::models::{GeoPoint, NearestVendorsQuery, Role, Vendor, record_id};
use crate::repository::LocationRepository;

/// Holds raw records the way the `users` collection would.
///
/// Matches `$near`: records whose `location` is not a valid point are not
/// indexed and never returned by the proximity search. Equal distances are
/// ordered by `id`.
#[derive(Default)]
pub struct InMemoryLocationRepository {
    records: RwLock<Vec<Document>>,
}

impl InMemoryLocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = Document>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }

    pub async fn insert(&self, record: Document) {
        self.records.write().await.push(record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn indexed_point(record: &Document) -> Option<GeoPoint> {
    let point: GeoPoint = bson::from_bson(record.get("location")?.clone()).ok()?;
    point.ensure_valid().ok().map(|_| point)
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn find_nearest_vendors(&self, query: &NearestVendorsQuery) -> LocationResult<Vec<Vendor>> {
        let origin = query.origin();
        let max_distance = query.max_distance as f64;
        let vendor_role = Role::Vendor.to_string();
        let records = self.records.read().await;

        let mut matches: Vec<(f64, String, &Document)> = records
            .iter()
            .filter(|r| r.get_str("role").is_ok_and(|role| role == vendor_role))
            .filter(|r| r.get_str("category").is_ok_and(|c| c == query.category))
            .filter_map(|r| {
                let distance = haversine_distance_meters(&origin, &indexed_point(r)?);
                (distance <= max_distance).then(|| (distance, record_id(r), r))
            })
            .collect();

        matches.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(&b.1))
        });

        matches
            .into_iter()
            .map(|(_, _, record)| Vendor::from_document(record.clone()))
            .collect()
    }

    async fn find_client_location(&self, client_id: &str) -> LocationResult<Option<GeoPoint>> {
        let records = self.records.read().await;

        records
            .iter()
            .find(|r| r.get_str("id").is_ok_and(|id| id == client_id))
            .map(GeoPoint::from_record)
            .transpose()
    }
}

use async_trait::async_trait;

use crate::error::LocationResult;
use crate::models::{GeoPoint, NearestVendorsQuery, Vendor};

/// Spatial store holding vendor and client records.
///
/// Implementations own the proximity search: results come back filtered by
/// role and category, bounded by the radius and sorted nearest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Vendors of `query.category` within `query.max_distance` meters of the origin
    async fn find_nearest_vendors(&self, query: &NearestVendorsQuery) -> LocationResult<Vec<Vendor>>;

    /// Stored location of the record with this `id`, whatever its role
    async fn find_client_location(&self, client_id: &str) -> LocationResult<Option<GeoPoint>>;
}

//! Location Service - query validation and result checks around the spatial store

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{LocationError, LocationResult};
use crate::models::{ClientLocation, NearestVendorsQuery, Role, Vendor};
use crate::repository::LocationRepository;

/// Location service over a [`LocationRepository`].
///
/// Distance computation and ordering belong to the repository; the service
/// validates inputs and refuses results that break the search contract.
pub struct LocationService<R: LocationRepository> {
    repository: Arc<R>,
}

impl<R: LocationRepository> LocationService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Vendors of the requested category within `max_distance` meters, nearest first.
    ///
    /// An empty list is a normal result. Any returned record with the wrong
    /// role or category fails the whole call with [`LocationError::Mapping`].
    #[instrument(skip(self), fields(category = %query.category, max_distance = query.max_distance))]
    pub async fn find_nearest_vendors(
        &self,
        query: NearestVendorsQuery,
    ) -> LocationResult<Vec<Vendor>> {
        query.validate()?;

        let vendors = self.repository.find_nearest_vendors(&query).await?;

        for vendor in &vendors {
            if vendor.role != Role::Vendor {
                tracing::error!(vendor_id = %vendor.id, role = %vendor.role, "Store returned a non-vendor record");
                return Err(LocationError::mapping(
                    &vendor.id,
                    format!("expected role `vendor`, found `{}`", vendor.role),
                ));
            }
            if vendor.category != query.category {
                tracing::error!(vendor_id = %vendor.id, category = %vendor.category, "Store returned a vendor of another category");
                return Err(LocationError::mapping(
                    &vendor.id,
                    format!(
                        "expected category `{}`, found `{}`",
                        query.category, vendor.category
                    ),
                ));
            }
        }

        tracing::debug!(count = vendors.len(), "Nearest vendors resolved");
        Ok(vendors)
    }

    /// Stored location of a client. No role filter is applied.
    #[instrument(skip(self))]
    pub async fn get_client_location(&self, client_id: &str) -> LocationResult<ClientLocation> {
        match self.repository.find_client_location(client_id).await? {
            Some(location) => {
                tracing::debug!(client_id, "Client location found");
                Ok(ClientLocation { location })
            }
            None => {
                tracing::info!(client_id, "Client not found");
                Err(LocationError::ClientNotFound(client_id.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use crate::repository::MockLocationRepository;

    fn vendor(id: &str, category: &str, role: Role) -> Vendor {
        Vendor {
            id: id.to_string(),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            category: category.to_string(),
            location: GeoPoint::new(-122.42, 37.77),
            role,
        }
    }

    #[tokio::test]
    async fn test_find_nearest_vendors_passes_query_through() {
        let mut repo = MockLocationRepository::new();
        repo.expect_find_nearest_vendors()
            .withf(|q| q.category == "plumber" && q.max_distance == 2000 && q.lng == -122.42)
            .times(1)
            .returning(|_| {
                Ok(vec![
                    vendor("v1", "plumber", Role::Vendor),
                    vendor("v2", "plumber", Role::Vendor),
                ])
            });
        let service = LocationService::new(repo);

        let query = NearestVendorsQuery::new(37.77, -122.42, "plumber").with_max_distance(2000);
        let vendors = service.find_nearest_vendors(query).await.unwrap();

        let ids: Vec<_> = vendors.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v2"]);
    }

    #[tokio::test]
    async fn test_invalid_query_never_reaches_store() {
        let mut repo = MockLocationRepository::new();
        repo.expect_find_nearest_vendors().never();
        let service = LocationService::new(repo);

        let query = NearestVendorsQuery::new(120.0, 0.0, "plumber");
        let err = service.find_nearest_vendors(query).await.unwrap_err();

        assert!(matches!(err, LocationError::Validation(_)));
    }

    #[tokio::test]
    async fn test_wrong_role_from_store_is_mapping_error() {
        let mut repo = MockLocationRepository::new();
        repo.expect_find_nearest_vendors()
            .returning(|_| Ok(vec![vendor("c1", "plumber", Role::Client)]));
        let service = LocationService::new(repo);

        let err = service
            .find_nearest_vendors(NearestVendorsQuery::new(37.77, -122.42, "plumber"))
            .await
            .unwrap_err();

        assert!(matches!(err, LocationError::Mapping { ref id, .. } if id == "c1"));
    }

    #[tokio::test]
    async fn test_wrong_category_from_store_is_mapping_error() {
        let mut repo = MockLocationRepository::new();
        repo.expect_find_nearest_vendors()
            .returning(|_| Ok(vec![vendor("v3", "electrician", Role::Vendor)]));
        let service = LocationService::new(repo);

        let err = service
            .find_nearest_vendors(NearestVendorsQuery::new(37.77, -122.42, "plumber"))
            .await
            .unwrap_err();

        assert!(matches!(err, LocationError::Mapping { .. }));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repo = MockLocationRepository::new();
        repo.expect_find_nearest_vendors()
            .returning(|_| Err(LocationError::Upstream("connection refused".into())));
        let service = LocationService::new(repo);

        let err = service
            .find_nearest_vendors(NearestVendorsQuery::new(37.77, -122.42, "plumber"))
            .await
            .unwrap_err();

        assert!(matches!(err, LocationError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_get_client_location() {
        let mut repo = MockLocationRepository::new();
        repo.expect_find_client_location()
            .withf(|id| id == "c1")
            .returning(|_| Ok(Some(GeoPoint::new(-122.41, 37.76))));
        let service = LocationService::new(repo);

        let found = service.get_client_location("c1").await.unwrap();

        assert_eq!(found.location, GeoPoint::new(-122.41, 37.76));
    }

    #[tokio::test]
    async fn test_missing_client_is_not_found() {
        let mut repo = MockLocationRepository::new();
        repo.expect_find_client_location().returning(|_| Ok(None));
        let service = LocationService::new(repo);

        let err = service.get_client_location("c1").await.unwrap_err();

        assert!(matches!(err, LocationError::ClientNotFound(ref id) if id == "c1"));
    }
}

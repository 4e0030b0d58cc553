//! MongoDB implementation of LocationRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
};
use tracing::instrument;

use crate::error::LocationResult;
use crate::models::{GeoPoint, NearestVendorsQuery, Role, Vendor};
use crate::repository::LocationRepository;

/// Collection holding both vendor and client records
pub const DEFAULT_COLLECTION: &str = "users";

/// MongoDB spatial store backed by `$near` on a `2dsphere` index.
pub struct MongoLocationRepository {
    collection: Collection<Document>,
}

impl MongoLocationRepository {
    /// # Example
    /// ```ignore
    /// let client = database::mongodb::connect("mongodb://localhost:27017").await?;
    /// let repo = MongoLocationRepository::new(client.database("main"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<Document>(collection_name);
        Self { collection }
    }

    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }

    /// Create the `2dsphere` index `$near` requires. Idempotent.
    #[instrument(skip(self), fields(collection = %self.collection.name()))]
    pub async fn ensure_indexes(&self) -> LocationResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "location": "2dsphere" })
            .build();
        let result = self.collection.create_index(index).await?;

        tracing::info!(index = %result.index_name, "Geospatial index ready");
        Ok(())
    }

    /// `$near` filter: vendors of one category, nearest first, within the radius
    fn build_nearest_filter(query: &NearestVendorsQuery) -> Document {
        doc! {
            "role": Role::Vendor.to_string(),
            "category": query.category.as_str(),
            "location": {
                "$near": {
                    "$geometry": {
                        "type": "Point",
                        "coordinates": [query.lng, query.lat],
                    },
                    "$maxDistance": query.max_distance,
                }
            }
        }
    }
}

#[async_trait]
impl LocationRepository for MongoLocationRepository {
    #[instrument(skip(self), fields(category = %query.category))]
    async fn find_nearest_vendors(&self, query: &NearestVendorsQuery) -> LocationResult<Vec<Vendor>> {
        let filter = Self::build_nearest_filter(query);

        let cursor = self.collection.find(filter).await?;
        let records: Vec<Document> = cursor.try_collect().await?;

        records.into_iter().map(Vendor::from_document).collect()
    }

    #[instrument(skip(self))]
    async fn find_client_location(&self, client_id: &str) -> LocationResult<Option<GeoPoint>> {
        let record = self
            .collection
            .find_one(doc! { "id": client_id })
            .projection(doc! { "_id": 0, "id": 1, "location": 1 })
            .await?;

        record.as_ref().map(GeoPoint::from_record).transpose()
    }
}

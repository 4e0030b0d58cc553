//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that runs MongoDB in a container, plus
//! record builders shaped like the `users` collection.

use mongodb::bson::{Document, doc};
use mongodb::{Client, Database};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let db = mongo.database("main");
/// db.collection::<mongodb::bson::Document>("users")
///     .insert_one(mongodb::bson::doc! { "id": "c1" })
///     .await
///     .unwrap();
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    pub connection_string: String,
}

impl TestMongo {
    /// Start MongoDB 7 and connect to it.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to create MongoDB client");

        tracing::info!(port = host_port, "Test MongoDB ready (mongo:7)");

        Self {
            container,
            client,
            connection_string,
        }
    }

    pub fn client(&self) -> Client {
        self.client.clone()
    }

    pub fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }
}

/// A `users` record with role `vendor`.
pub fn vendor_record(id: &str, category: &str, lng: f64, lat: f64) -> Document {
    doc! {
        "id": id,
        "firstName": format!("First-{}", id),
        "lastName": format!("Last-{}", id),
        "email": format!("{}@example.com", id),
        "category": category,
        "role": "vendor",
        "location": { "type": "Point", "coordinates": [lng, lat] },
    }
}

/// A `users` record with role `client`.
pub fn client_record(id: &str, lng: f64, lat: f64) -> Document {
    doc! {
        "id": id,
        "firstName": format!("First-{}", id),
        "lastName": format!("Last-{}", id),
        "role": "client",
        "location": { "type": "Point", "coordinates": [lng, lat] },
    }
}

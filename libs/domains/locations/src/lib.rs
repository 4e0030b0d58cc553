//! Locations Domain
//!
//! Nearest-vendor search and client location lookup over a spatial store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← GET /vendors/nearest, GET /clients/{id}/location
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Query validation, result checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Spatial store (trait + MongoDB `$near` + in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← GeoPoint, Vendor, ClientLocation, queries
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_locations::{LocationService, MongoLocationRepository, handlers};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = database::mongodb::connect("mongodb://localhost:27017").await?;
//! let repository = MongoLocationRepository::with_collection(client.database("main"), "users");
//! let service = LocationService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod geo;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{LocationError, LocationResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryLocationRepository;
pub use models::{
    ClientLocation, DEFAULT_MAX_DISTANCE_METERS, GeoPoint, NearestVendorsParams,
    NearestVendorsQuery, PointType, Role, Vendor,
};
pub use self::mongodb::MongoLocationRepository;
pub use repository::LocationRepository;
pub use service::LocationService;

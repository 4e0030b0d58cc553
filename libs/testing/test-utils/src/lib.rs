//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `vendor_record` / `client_record`: raw `users` documents (feature: "mongo")
//! - `TestDataBuilder`: deterministic test data generation (always available)
//! - `assertions`: custom assertion helpers (always available)
//!
//! # Usage
//!
//! Add `features = ["mongo"]` to your dev-dependencies:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mongo"] }
//! ```
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo, vendor_record};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!     let users = mongo.database(&builder.name("db", "main")).collection("users");
//!
//!     users
//!         .insert_one(vendor_record(&builder.id("vendor", "v1"), "plumber", -122.42, 37.77))
//!         .await
//!         .unwrap();
//! }
//! ```

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::{TestMongo, client_record, vendor_record};

/// Builder for test data with deterministic randomization
///
/// Tests sharing one MongoDB container stay isolated by deriving database
/// names and record ids from the test name.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_nearest_vendors");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Record id unique to this builder, e.g. `vendor-1234-v1`
    pub fn id(&self, kind: &str, suffix: &str) -> String {
        format!("{}-{}-{}", kind, self.seed, suffix)
    }

    /// Generate a unique name for testing
    ///
    /// MongoDB database names are limited to 63 bytes; the result stays
    /// well below that for short prefixes.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("my_test");
    /// let name = builder.name("db", "main");
    /// assert!(name.starts_with("test-db-"));
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert the ids appear in exactly this order
    pub fn assert_ids_in_order<S: AsRef<str>>(actual: &[S], expected: &[&str], context: &str) {
        let actual: Vec<&str> = actual.iter().map(AsRef::as_ref).collect();
        assert_eq!(
            actual, expected,
            "{}: expected ids {:?}, got {:?}",
            context, expected, actual
        );
    }
}

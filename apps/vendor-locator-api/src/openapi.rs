//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Service-level metadata; paths come from the domain crates.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Vendor Locator API",
        version = "0.1.0",
        description = "Nearest-vendor search and client location lookup over MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    )
)]
struct ServiceDoc;

/// Combined OpenAPI documentation for all APIs
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = ServiceDoc::openapi();
        doc.merge(domain_locations::ApiDoc::openapi());
        doc
    }
}

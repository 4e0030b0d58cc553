use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use axum_helpers::{
    ValidatedQuery,
    errors::responses::{
        MappingErrorResponse, NotFoundResponse, ServiceUnavailableResponse,
        ValidationErrorResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::LocationResult;
use crate::models::{
    ClientLocation, GeoPoint, NearestVendorsParams, NearestVendorsQuery, PointType, Role, Vendor,
};
use crate::repository::LocationRepository;
use crate::service::LocationService;

/// OpenAPI documentation for the Locations API
#[derive(OpenApi)]
#[openapi(
    paths(nearest_vendors, client_location),
    components(
        schemas(Vendor, ClientLocation, GeoPoint, PointType, Role),
        responses(
            ValidationErrorResponse,
            NotFoundResponse,
            MappingErrorResponse,
            ServiceUnavailableResponse
        )
    ),
    tags(
        (name = "Vendors", description = "Proximity search over vendors"),
        (name = "Clients", description = "Client location lookup")
    )
)]
pub struct ApiDoc;

/// Create the locations router with all HTTP endpoints
pub fn router<R: LocationRepository + 'static>(service: LocationService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/vendors/nearest", get(nearest_vendors))
        .route("/clients/{client_id}/location", get(client_location))
        .with_state(shared_service)
}

/// Vendors of a category nearest to a point
///
/// Sorted by ascending distance; empty when nothing is within `maxDistance` meters.
#[utoipa::path(
    get,
    path = "/vendors/nearest",
    tag = "Vendors",
    params(NearestVendorsParams),
    responses(
        (status = 200, description = "Matching vendors, nearest first", body = Vec<Vendor>),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = MappingErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn nearest_vendors<R: LocationRepository>(
    State(service): State<Arc<LocationService<R>>>,
    ValidatedQuery(query): ValidatedQuery<NearestVendorsQuery>,
) -> LocationResult<Json<Vec<Vendor>>> {
    let vendors = service.find_nearest_vendors(query).await?;
    Ok(Json(vendors))
}

/// Stored location of a client
#[utoipa::path(
    get,
    path = "/clients/{client_id}/location",
    tag = "Clients",
    params(
        ("client_id" = String, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Client location", body = ClientLocation),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = MappingErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn client_location<R: LocationRepository>(
    State(service): State<Arc<LocationService<R>>>,
    Path(client_id): Path<String>,
) -> LocationResult<Json<ClientLocation>> {
    let location = service.get_client_location(&client_id).await?;
    Ok(Json(location))
}

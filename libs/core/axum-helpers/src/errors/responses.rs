//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Stored record does not match the expected shape",
    content_type = "application/json",
    example = json!({
        "code": 2010,
        "error": "MAPPING_ERROR",
        "message": "Record 'v9' cannot be mapped: location: missing field `coordinates`"
    })
)]
pub struct MappingErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "fields": ["lat"],
            "errors": {
                "lat": [{
                    "code": "number",
                    "message": "lat must be a number",
                    "params": {"value": "abc"}
                }]
            }
        }
    })
)]
pub struct ValidationErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Client not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({
        "code": 1011,
        "error": "SERVICE_UNAVAILABLE",
        "message": "Service is temporarily unavailable"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);

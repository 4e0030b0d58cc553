use axum_helpers::FromQueryParams;
use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{LocationError, LocationResult};

/// Search radius used when `maxDistance` is omitted.
pub const DEFAULT_MAX_DISTANCE_METERS: i64 = 5000;

/// GeoJSON geometry type. Only points are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum PointType {
    #[default]
    Point,
}

/// GeoJSON point, longitude first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: PointType,

    /// `[lng, lat]` in degrees
    #[schema(value_type = Vec<f64>, min_items = 2, max_items = 2)]
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self {
            kind: PointType::Point,
            coordinates: [lng, lat],
        }
    }

    pub fn lng(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }

    /// Reject coordinates outside the WGS84 ranges or not finite.
    pub fn ensure_valid(&self) -> Result<(), String> {
        let [lng, lat] = self.coordinates;
        if !lng.is_finite() || !lat.is_finite() {
            return Err("coordinates must be finite numbers".to_string());
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!("longitude {} is outside [-180, 180]", lng));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!("latitude {} is outside [-90, 90]", lat));
        }
        Ok(())
    }

    /// Read and check the `location` field of a stored record.
    pub fn from_record(record: &Document) -> LocationResult<Self> {
        let id = record_id(record);
        let raw = record
            .get("location")
            .cloned()
            .ok_or_else(|| LocationError::mapping(&id, "missing field `location`"))?;

        let point: GeoPoint = bson::from_bson(raw)
            .map_err(|e| LocationError::mapping(&id, format!("location: {}", e)))?;
        point
            .ensure_valid()
            .map_err(|reason| LocationError::mapping(&id, format!("location: {}", reason)))?;

        Ok(point)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Vendor,
    Client,
}

/// Service provider returned by the nearest-vendor search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[schema(example = "v1")]
    pub id: String,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "plumber")]
    pub category: String,
    pub location: GeoPoint,
    pub role: Role,
}

impl Vendor {
    /// Map a stored record to a Vendor.
    ///
    /// Unknown fields (`_id`, `email`, ...) are ignored; a missing field or a
    /// malformed `location` is a [`LocationError::Mapping`] naming the record.
    pub fn from_document(record: Document) -> LocationResult<Self> {
        let id = record_id(&record);

        let vendor: Vendor =
            bson::from_document(record).map_err(|e| LocationError::mapping(&id, e.to_string()))?;
        vendor
            .location
            .ensure_valid()
            .map_err(|reason| LocationError::mapping(&id, format!("location: {}", reason)))?;

        Ok(vendor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClientLocation {
    pub location: GeoPoint,
}

/// Best available identifier of a raw record, for error messages.
pub(crate) fn record_id(record: &Document) -> String {
    match record.get("id").or_else(|| record.get("_id")) {
        Some(Bson::String(id)) => id.clone(),
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(other) => other.to_string(),
        None => "<unknown>".to_string(),
    }
}

/// Raw query string of `GET /vendors/nearest`.
///
/// Values stay strings so a malformed number is reported against its field.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearestVendorsParams {
    /// Latitude in degrees, -90 to 90
    #[param(value_type = f64, required = true, example = 37.77)]
    pub lat: Option<String>,

    /// Longitude in degrees, -180 to 180
    #[param(value_type = f64, required = true, example = -122.42)]
    pub lng: Option<String>,

    /// Exact category to match
    #[param(value_type = String, required = true, example = "plumber")]
    pub category: Option<String>,

    /// Search radius in meters
    #[serde(rename = "maxDistance")]
    #[param(value_type = Option<i64>, minimum = 0, default = 5000)]
    pub max_distance: Option<String>,
}

/// Parsed and validated nearest-vendor query
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NearestVendorsQuery {
    #[validate(range(min = -90.0, max = 90.0, message = "lat must be between -90 and 90"))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "lng must be between -180 and 180"))]
    pub lng: f64,

    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,

    /// Meters
    #[serde(rename = "maxDistance")]
    #[validate(range(min = 0, message = "maxDistance must not be negative"))]
    pub max_distance: i64,
}

impl NearestVendorsQuery {
    pub fn new(lat: f64, lng: f64, category: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            category: category.into(),
            max_distance: DEFAULT_MAX_DISTANCE_METERS,
        }
    }

    pub fn with_max_distance(mut self, meters: i64) -> Self {
        self.max_distance = meters;
        self
    }

    /// Query origin as a GeoJSON point.
    pub fn origin(&self) -> GeoPoint {
        GeoPoint::new(self.lng, self.lat)
    }
}

impl FromQueryParams for NearestVendorsQuery {
    type Params = NearestVendorsParams;

    fn from_params(params: NearestVendorsParams) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let lat = parse_field(&mut errors, "lat", params.lat, parse_finite);
        let lng = parse_field(&mut errors, "lng", params.lng, parse_finite);
        let category = parse_field(&mut errors, "category", params.category, |raw| {
            Ok::<_, ValidationError>(raw.to_string())
        });
        let max_distance = match params.max_distance {
            None => Some(DEFAULT_MAX_DISTANCE_METERS),
            raw => parse_field(&mut errors, "maxDistance", raw, parse_integer),
        };

        // Stand-ins for unparsed fields are in range; only parsed values can fail here.
        let query = NearestVendorsQuery {
            lat: lat.unwrap_or_default(),
            lng: lng.unwrap_or_default(),
            category: category.unwrap_or_else(|| "unparsed".to_string()),
            max_distance: max_distance.unwrap_or(DEFAULT_MAX_DISTANCE_METERS),
        };
        if let Err(range_errors) = query.validate() {
            merge_field_errors(&mut errors, &range_errors);
        }

        if errors.errors().is_empty() {
            Ok(query)
        } else {
            Err(errors)
        }
    }
}

/// Validator field keys mapped onto the query string names.
const QUERY_FIELDS: [(&str, &str); 5] = [
    ("lat", "lat"),
    ("lng", "lng"),
    ("category", "category"),
    ("maxDistance", "maxDistance"),
    ("max_distance", "maxDistance"),
];

fn merge_field_errors(errors: &mut ValidationErrors, from: &ValidationErrors) {
    let field_errors = from.field_errors();
    for (key, field) in QUERY_FIELDS {
        if let Some(list) = field_errors.get(key) {
            for error in list.iter() {
                errors.add(field, error.clone());
            }
        }
    }
}

fn parse_field<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<String>,
    parse: impl FnOnce(&str) -> Result<T, ValidationError>,
) -> Option<T> {
    let Some(raw) = raw else {
        errors.add(
            field,
            ValidationError::new("required")
                .with_message(Cow::Owned(format!("{} is required", field))),
        );
        return None;
    };

    match parse(&raw) {
        Ok(value) => Some(value),
        Err(mut error) => {
            error.message = Some(Cow::Owned(format!(
                "{} {}",
                field,
                error.message.as_deref().unwrap_or("is invalid")
            )));
            error.add_param(Cow::Borrowed("value"), &raw);
            errors.add(field, error);
            None
        }
    }
}

fn parse_finite(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::new("number").with_message(Cow::Borrowed("must be a number")))
}

fn parse_integer(raw: &str) -> Result<i64, ValidationError> {
    raw.trim().parse::<i64>().map_err(|_| {
        ValidationError::new("integer").with_message(Cow::Borrowed("must be an integer"))
    })
}

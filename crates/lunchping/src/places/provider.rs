use async_trait::async_trait;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::geolocation::{GeoPoint, LocationFailure};

pub const DEFAULT_NEARBY_RADIUS_M: u32 = 1000;
pub const DEFAULT_KEYWORD_RADIUS_M: u32 = 2000;
pub const MAX_RADIUS_M: u32 = 20_000;
pub const MAX_PAGE: u32 = 45;
pub const PAGE_SIZE: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub point: GeoPoint,
    pub radius_m: u32,
    pub page: u32,
}

impl NearbyQuery {
    pub fn new(point: GeoPoint, radius_m: Option<u32>, page: Option<u32>) -> Result<Self, PlacesError> {
        let radius_m = validate_radius(radius_m.unwrap_or(DEFAULT_NEARBY_RADIUS_M))?;
        let page = page.unwrap_or(1);
        if !(1..=MAX_PAGE).contains(&page) {
            return Err(PlacesError::InvalidQuery(format!(
                "page must be between 1 and {MAX_PAGE}, got {page}"
            )));
        }
        Ok(Self {
            point,
            radius_m,
            page,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordQuery {
    pub keyword: String,
    pub point: GeoPoint,
    pub radius_m: u32,
}

impl KeywordQuery {
    pub fn new(keyword: &str, point: GeoPoint, radius_m: Option<u32>) -> Result<Self, PlacesError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(PlacesError::InvalidQuery("keyword must not be empty".to_string()));
        }
        Ok(Self {
            keyword: keyword.to_string(),
            point,
            radius_m: validate_radius(radius_m.unwrap_or(DEFAULT_KEYWORD_RADIUS_M))?,
        })
    }
}

fn validate_radius(radius_m: u32) -> Result<u32, PlacesError> {
    if (1..=MAX_RADIUS_M).contains(&radius_m) {
        Ok(radius_m)
    } else {
        Err(PlacesError::InvalidQuery(format!(
            "radius must be between 1 and {MAX_RADIUS_M} metres, got {radius_m}"
        )))
    }
}

/// A place as the provider reports it. Numeric fields arrive as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceDocument {
    pub id: String,
    pub place_name: String,
    pub category_name: String,
    pub category_group_code: String,
    pub category_group_name: String,
    pub phone: String,
    pub address_name: String,
    pub road_address_name: String,
    /// Longitude.
    pub x: String,
    /// Latitude.
    pub y: String,
    pub place_url: String,
    pub distance: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderPage {
    pub documents: Vec<PlaceDocument>,
    pub is_end: bool,
}

/// Seam between the HTTP proxy and the upstream search API.
#[async_trait]
pub trait PlaceSearchProvider: Send + Sync {
    async fn nearby(&self, query: &NearbyQuery) -> Result<ProviderPage, PlacesError>;
    async fn keyword(&self, query: &KeywordQuery) -> Result<ProviderPage, PlacesError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("invalid search query: {0}")]
    InvalidQuery(String),
    #[error(transparent)]
    Location(#[from] LocationFailure),
    #[error("place search credentials are not configured")]
    MissingCredentials,
    #[error("place search provider responded with status {status}")]
    Upstream { status: u16 },
    #[error("place search request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl PlacesError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlacesError::InvalidQuery(_) | PlacesError::Location(_) => StatusCode::BAD_REQUEST,
            PlacesError::MissingCredentials => StatusCode::SERVICE_UNAVAILABLE,
            PlacesError::Upstream { .. } | PlacesError::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

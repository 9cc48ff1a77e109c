use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{json, Value};

use super::provider::{KeywordQuery, NearbyQuery, PlaceSearchProvider};
use super::service::{AvailabilityView, PickOutcome, RestaurantService};
use crate::availability::{HolidaySet, WeeklySchedule};
use crate::catalog::{Category, Restaurant, SearchPage};
use crate::error::AppError;
use crate::geolocation::GeoPoint;
use crate::recommendation::{PoolEntry, SamplerState};

/// Router builder exposing the restaurant proxy and the stateless core endpoints.
pub fn restaurant_router<P>(service: Arc<RestaurantService<P>>) -> Router
where
    P: PlaceSearchProvider + 'static,
{
    Router::new()
        .route("/api/restaurants/nearby", get(nearby_handler::<P>))
        .route("/api/restaurants/search", get(search_handler::<P>))
        .route("/api/restaurants/image", get(image_handler::<P>))
        .route("/api/v1/availability", post(availability_handler::<P>))
        .route("/api/v1/recommendations/pick", post(pick_handler::<P>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearbyParams {
    lat: f64,
    lng: f64,
    radius: Option<u32>,
    page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    keyword: String,
    lat: f64,
    lng: f64,
    radius: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageParams {
    #[serde(default)]
    place_url: String,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AvailabilityRequest {
    #[serde(default)]
    business_hours: WeeklySchedule,
    #[serde(default)]
    holidays: HolidaySet,
    at: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PickRequest {
    candidates: Vec<PoolEntry>,
    #[serde(default)]
    seen_ids: SamplerState,
    flicker: Option<usize>,
}

pub(crate) async fn nearby_handler<P>(
    State(service): State<Arc<RestaurantService<P>>>,
    params: Result<Query<NearbyParams>, QueryRejection>,
) -> Result<Json<SearchPage>, AppError>
where
    P: PlaceSearchProvider + 'static,
{
    let Query(params) = params?;
    let point = GeoPoint::new(params.lat, params.lng)?;
    let query = NearbyQuery::new(point, params.radius, params.page)?;
    Ok(Json(service.nearby(query).await?))
}

pub(crate) async fn search_handler<P>(
    State(service): State<Arc<RestaurantService<P>>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Restaurant>>, AppError>
where
    P: PlaceSearchProvider + 'static,
{
    let Query(params) = params?;
    let point = GeoPoint::new(params.lat, params.lng)?;
    let query = KeywordQuery::new(&params.keyword, point, params.radius)?;
    Ok(Json(service.search(query).await?))
}

pub(crate) async fn image_handler<P>(
    State(service): State<Arc<RestaurantService<P>>>,
    params: Result<Query<ImageParams>, QueryRejection>,
) -> Result<Json<Value>, AppError>
where
    P: PlaceSearchProvider + 'static,
{
    let Query(params) = params?;
    let category = params.category.as_deref().and_then(Category::from_key);
    let image_url = service.place_image(&params.place_url, category);
    Ok(Json(json!({ "imageUrl": image_url })))
}

pub(crate) async fn availability_handler<P>(
    State(service): State<Arc<RestaurantService<P>>>,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> Result<Json<AvailabilityView>, AppError>
where
    P: PlaceSearchProvider + 'static,
{
    let Json(request) = payload?;
    Ok(Json(service.availability(
        &request.business_hours,
        &request.holidays,
        request.at,
    )))
}

pub(crate) async fn pick_handler<P>(
    State(service): State<Arc<RestaurantService<P>>>,
    payload: Result<Json<PickRequest>, JsonRejection>,
) -> Result<Json<PickOutcome<PoolEntry>>, AppError>
where
    P: PlaceSearchProvider + 'static,
{
    let Json(request) = payload?;
    let outcome = service.pick(&request.candidates, &request.seen_ids, request.flicker)?;
    Ok(Json(outcome))
}

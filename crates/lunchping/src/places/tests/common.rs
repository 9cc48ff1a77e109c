use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::FixedOffset;
use serde_json::Value;

use crate::config::ClockConfig;
use crate::places::{
    restaurant_router, KeywordQuery, NearbyQuery, PlaceDocument, PlaceSearchProvider, PlacesError,
    ProviderPage, RestaurantService,
};

/// Provider double that records queries and replays a canned outcome.
#[derive(Default)]
pub(super) struct FakeProvider {
    pub(super) page: ProviderPage,
    pub(super) upstream_status: Option<u16>,
    pub(super) nearby_calls: Mutex<Vec<NearbyQuery>>,
    pub(super) keyword_calls: Mutex<Vec<KeywordQuery>>,
}

impl FakeProvider {
    pub(super) fn with_documents(documents: Vec<PlaceDocument>, is_end: bool) -> Self {
        Self {
            page: ProviderPage { documents, is_end },
            ..Self::default()
        }
    }

    pub(super) fn failing(status: u16) -> Self {
        Self {
            upstream_status: Some(status),
            ..Self::default()
        }
    }

    fn outcome(&self) -> Result<ProviderPage, PlacesError> {
        match self.upstream_status {
            Some(status) => Err(PlacesError::Upstream { status }),
            None => Ok(self.page.clone()),
        }
    }
}

#[async_trait]
impl PlaceSearchProvider for FakeProvider {
    async fn nearby(&self, query: &NearbyQuery) -> Result<ProviderPage, PlacesError> {
        self.nearby_calls.lock().expect("lock").push(*query);
        self.outcome()
    }

    async fn keyword(&self, query: &KeywordQuery) -> Result<ProviderPage, PlacesError> {
        self.keyword_calls.lock().expect("lock").push(query.clone());
        self.outcome()
    }
}

pub(super) fn document(id: &str, category_name: &str) -> PlaceDocument {
    PlaceDocument {
        id: id.to_string(),
        place_name: format!("식당 {id}"),
        category_name: category_name.to_string(),
        address_name: "서울 중구 태평로1가 31".to_string(),
        road_address_name: "서울 중구 세종대로 110".to_string(),
        x: "126.978".to_string(),
        y: "37.5665".to_string(),
        place_url: format!("http://place.map.kakao.com/{id}"),
        distance: "120".to_string(),
        ..PlaceDocument::default()
    }
}

pub(super) fn seoul_clock() -> ClockConfig {
    ClockConfig {
        utc_offset: FixedOffset::east_opt(9 * 3600).expect("valid offset"),
    }
}

pub(super) fn service(provider: FakeProvider) -> (Arc<RestaurantService<FakeProvider>>, Arc<FakeProvider>) {
    let provider = Arc::new(provider);
    let service = RestaurantService::new(provider.clone(), seoul_clock(), 20);
    (Arc::new(service), provider)
}

pub(super) fn router(provider: FakeProvider) -> (axum::Router, Arc<FakeProvider>) {
    let (service, provider) = service(provider);
    (restaurant_router(service), provider)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

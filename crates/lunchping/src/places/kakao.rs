use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::provider::{
    KeywordQuery, NearbyQuery, PlaceDocument, PlaceSearchProvider, PlacesError, ProviderPage,
    PAGE_SIZE,
};
use crate::config::PlacesConfig;

const FOOD_CATEGORY_CODE: &str = "FD6";

/// Client for the Kakao Local search endpoints.
#[derive(Debug, Clone)]
pub struct KakaoLocalClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    documents: Vec<PlaceDocument>,
    meta: SearchMeta,
}

#[derive(Debug, Deserialize)]
struct SearchMeta {
    #[serde(default)]
    is_end: bool,
}

impl KakaoLocalClient {
    pub fn new(config: &PlacesConfig) -> Result<Self, PlacesError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn search(
        &self,
        endpoint: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<ProviderPage, PlacesError> {
        if self.api_key.trim().is_empty() {
            return Err(PlacesError::MissingCredentials);
        }

        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, "querying place search");
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("KakaoAK {}", self.api_key))
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "place search rejected the request");
            return Err(PlacesError::Upstream {
                status: status.as_u16(),
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(ProviderPage {
            documents: body.documents,
            is_end: body.meta.is_end,
        })
    }
}

#[async_trait]
impl PlaceSearchProvider for KakaoLocalClient {
    async fn nearby(&self, query: &NearbyQuery) -> Result<ProviderPage, PlacesError> {
        self.search("category.json", nearby_params(query)).await
    }

    async fn keyword(&self, query: &KeywordQuery) -> Result<ProviderPage, PlacesError> {
        self.search("keyword.json", keyword_params(query)).await
    }
}

fn nearby_params(query: &NearbyQuery) -> Vec<(&'static str, String)> {
    vec![
        ("category_group_code", FOOD_CATEGORY_CODE.to_string()),
        ("x", query.point.longitude().to_string()),
        ("y", query.point.latitude().to_string()),
        ("radius", query.radius_m.to_string()),
        ("sort", "distance".to_string()),
        ("page", query.page.to_string()),
        ("size", PAGE_SIZE.to_string()),
    ]
}

fn keyword_params(query: &KeywordQuery) -> Vec<(&'static str, String)> {
    vec![
        ("query", query.keyword.clone()),
        ("category_group_code", FOOD_CATEGORY_CODE.to_string()),
        ("x", query.point.longitude().to_string()),
        ("y", query.point.latitude().to_string()),
        ("radius", query.radius_m.to_string()),
        ("sort", "distance".to_string()),
        ("size", PAGE_SIZE.to_string()),
    ]
}

use std::sync::Arc;

use chrono::{Datelike, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::mapping::to_restaurant;
use super::provider::{KeywordQuery, NearbyQuery, PlaceSearchProvider, PlacesError};
use crate::availability::{
    classify, today_hours_label, AvailabilityStatus, HolidaySet, WeeklySchedule,
};
use crate::catalog::{category_image, Category, Restaurant, SearchPage};
use crate::config::ClockConfig;
use crate::recommendation::{flicker, pick_next, Candidate, SamplerError, SamplerState};

/// Upper bound on cosmetic picks a single request may ask for.
pub const MAX_FLICKER: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityView {
    pub status: AvailabilityStatus,
    pub label: &'static str,
    pub today_hours: String,
    pub at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickOutcome<C> {
    pub winner: C,
    pub seen_ids: SamplerState,
    pub flicker: Vec<C>,
}

/// Proxies place searches and answers the stateless availability and
/// recommendation questions the front end asks.
pub struct RestaurantService<P> {
    provider: Arc<P>,
    clock: ClockConfig,
    flicker_count: usize,
}

impl<P> RestaurantService<P>
where
    P: PlaceSearchProvider + 'static,
{
    pub fn new(provider: Arc<P>, clock: ClockConfig, flicker_count: usize) -> Self {
        Self {
            provider,
            clock,
            flicker_count: flicker_count.min(MAX_FLICKER),
        }
    }

    pub fn clock(&self) -> &ClockConfig {
        &self.clock
    }

    pub async fn nearby(&self, query: NearbyQuery) -> Result<SearchPage, PlacesError> {
        info!(
            lat = query.point.latitude(),
            lng = query.point.longitude(),
            radius = query.radius_m,
            page = query.page,
            "searching nearby restaurants"
        );
        let page = self.provider.nearby(&query).await.map_err(|err| {
            warn!(error = %err, "nearby search failed");
            err
        })?;

        let mut rng = StdRng::from_entropy();
        let restaurants: Vec<Restaurant> = page
            .documents
            .into_iter()
            .map(|doc| to_restaurant(doc, &mut rng))
            .collect();
        debug!(count = restaurants.len(), is_end = page.is_end, "nearby page mapped");

        Ok(SearchPage {
            restaurants,
            has_more: !page.is_end,
        })
    }

    pub async fn search(&self, query: KeywordQuery) -> Result<Vec<Restaurant>, PlacesError> {
        info!(keyword = %query.keyword, radius = query.radius_m, "searching restaurants by keyword");
        let page = self.provider.keyword(&query).await.map_err(|err| {
            warn!(error = %err, keyword = %query.keyword, "keyword search failed");
            err
        })?;

        let mut rng = StdRng::from_entropy();
        Ok(page
            .documents
            .into_iter()
            .map(|doc| to_restaurant(doc, &mut rng))
            .collect())
    }

    /// Representative picture for a place. The provider exposes no photos,
    /// so this is always a stock image for the category (korean when absent).
    pub fn place_image(&self, place_url: &str, category: Option<Category>) -> &'static str {
        debug!(%place_url, ?category, "resolving place image");
        let mut rng = StdRng::from_entropy();
        category_image(category.unwrap_or(Category::Korean), &mut rng)
    }

    pub fn availability(
        &self,
        schedule: &WeeklySchedule,
        holidays: &HolidaySet,
        at: Option<NaiveDateTime>,
    ) -> AvailabilityView {
        let at = at.unwrap_or_else(|| self.clock.now());
        let status = classify(schedule, holidays, at);
        AvailabilityView {
            status,
            label: status.label(),
            today_hours: today_hours_label(schedule, at.weekday()),
            at,
        }
    }

    /// One stateless draw: the caller carries `seen` between requests.
    pub fn pick<C>(
        &self,
        candidates: &[C],
        seen: &SamplerState,
        flicker_count: Option<usize>,
    ) -> Result<PickOutcome<C>, SamplerError>
    where
        C: Candidate + Clone,
    {
        let count = flicker_count.unwrap_or(self.flicker_count).min(MAX_FLICKER);
        let mut rng = StdRng::from_entropy();

        let shown: Vec<C> = flicker(candidates, count, &mut rng)?.cloned().collect();
        let (winner, seen_ids) = pick_next(candidates, seen, &mut rng)?;
        info!(
            winner = winner.candidate_id(),
            pool = candidates.len(),
            seen = seen_ids.len(),
            "recommendation settled"
        );

        Ok(PickOutcome {
            winner: winner.clone(),
            seen_ids,
            flicker: shown,
        })
    }
}

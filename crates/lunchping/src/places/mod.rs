//! Nearby-restaurant search backed by the Kakao Local API.
//!
//! The browser never talks to the provider directly: [`restaurant_router`]
//! proxies the calls so the REST key stays on the server, and maps provider
//! documents into [`Restaurant`](crate::catalog::Restaurant) cards.

mod kakao;
mod mapping;
mod provider;
pub mod router;
mod service;

#[cfg(test)]
mod tests;

pub use kakao::KakaoLocalClient;
pub use mapping::to_restaurant;
pub use provider::{
    KeywordQuery, NearbyQuery, PlaceDocument, PlaceSearchProvider, PlacesError, ProviderPage,
    DEFAULT_KEYWORD_RADIUS_M, DEFAULT_NEARBY_RADIUS_M, MAX_PAGE, MAX_RADIUS_M, PAGE_SIZE,
};
pub use router::restaurant_router;
pub use service::{AvailabilityView, PickOutcome, RestaurantService, MAX_FLICKER};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Category, Restaurant};

/// One page of search results as returned to the browser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub restaurants: Vec<Restaurant>,
    pub has_more: bool,
}

/// Accumulates paged search results for one location.
///
/// Pages are merged as an id-deduplicated union: a restaurant keeps the
/// position of its first appearance and later duplicates are dropped.
#[derive(Debug, Clone, Default)]
pub struct RestaurantFeed {
    restaurants: Vec<Restaurant>,
    known_ids: HashSet<String>,
    page: u32,
    has_more: bool,
}

impl RestaurantFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `result` fetched for `page`, returning how many restaurants were new.
    pub fn apply_page(&mut self, page: u32, result: SearchPage) -> usize {
        let before = self.restaurants.len();
        for restaurant in result.restaurants {
            if self.known_ids.insert(restaurant.id.clone()) {
                self.restaurants.push(restaurant);
            }
        }
        self.page = page;
        self.has_more = result.has_more;
        self.restaurants.len() - before
    }

    /// The page to request when the user asks for more, if any remain.
    pub fn next_page(&self) -> Option<u32> {
        self.has_more.then_some(self.page + 1)
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    /// Drops everything, e.g. on an explicit refresh.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Category chip plus the "open only" toggle from the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantFilter {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub open_only: bool,
}

impl RestaurantFilter {
    pub fn matches(&self, restaurant: &Restaurant, now: NaiveDateTime) -> bool {
        if let Some(category) = self.category {
            if restaurant.category != category {
                return false;
            }
        }
        !self.open_only || restaurant.status_at(now).is_operating()
    }

    pub fn apply<'a>(&self, restaurants: &'a [Restaurant], now: NaiveDateTime) -> Vec<&'a Restaurant> {
        restaurants
            .iter()
            .filter(|restaurant| self.matches(restaurant, now))
            .collect()
    }
}

use rand::Rng;

use super::PlaceDocument;
use crate::availability::{HolidaySet, WeeklySchedule};
use crate::catalog::{category_image, infer_category, PriceRange, Restaurant};

/// Turns a provider document into a restaurant card.
///
/// The provider knows nothing about trading hours, so the card comes back
/// closed all week with no holidays and no menus.
pub fn to_restaurant<R: Rng + ?Sized>(doc: PlaceDocument, rng: &mut R) -> Restaurant {
    let category = infer_category(&doc.category_name);
    let address = if doc.road_address_name.trim().is_empty() {
        doc.address_name
    } else {
        doc.road_address_name
    };

    Restaurant {
        id: doc.id,
        name: doc.place_name,
        category,
        price_range: PriceRange::estimate(&doc.category_name),
        description: doc.category_name,
        address,
        distance: doc.distance.trim().parse::<u32>().ok().filter(|meters| *meters > 0),
        rating: 0.0,
        review_count: 0,
        image_url: category_image(category, rng).to_string(),
        phone_number: non_empty(doc.phone),
        place_url: non_empty(doc.place_url),
        latitude: doc.y.trim().parse().ok(),
        longitude: doc.x.trim().parse().ok(),
        business_hours: WeeklySchedule::closed(),
        holidays: HolidaySet::new(),
        recommended_menus: Vec::new(),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

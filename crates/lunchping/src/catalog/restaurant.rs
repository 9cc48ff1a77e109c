use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Category, PriceRange};
use crate::availability::{classify, AvailabilityStatus, HolidaySet, WeeklySchedule};
use crate::recommendation::Candidate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub name: String,
    pub price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_popular: bool,
}

/// Restaurant card record shared by the list view, the map and the picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub address: String,
    /// Metres from the search origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    pub price_range: PriceRange,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub business_hours: WeeklySchedule,
    #[serde(default)]
    pub holidays: HolidaySet,
    #[serde(default)]
    pub recommended_menus: Vec<Menu>,
}

impl Restaurant {
    pub fn status_at(&self, now: NaiveDateTime) -> AvailabilityStatus {
        classify(&self.business_hours, &self.holidays, now)
    }

    pub fn distance_label(&self) -> Option<String> {
        self.distance.map(format_distance)
    }
}

impl Candidate for Restaurant {
    fn candidate_id(&self) -> &str {
        &self.id
    }
}

/// `850m` below a kilometre, `1.2km` above.
pub fn format_distance(meters: u32) -> String {
    if meters < 1000 {
        format!("{meters}m")
    } else {
        format!("{:.1}km", f64::from(meters) / 1000.0)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::OpeningHours;
    use chrono::{NaiveDate, Weekday};
    use serde_json::json;

    #[test]
    fn formats_distances() {
        assert_eq!(format_distance(0), "0m");
        assert_eq!(format_distance(999), "999m");
        assert_eq!(format_distance(1000), "1.0km");
        assert_eq!(format_distance(1240), "1.2km");
        assert_eq!(format_distance(1260), "1.3km");
    }

    #[test]
    fn serializes_camel_case_fields() {
        let restaurant = fixtures::restaurant("1", Category::Korean);
        let value = serde_json::to_value(&restaurant).expect("serializes");
        assert_eq!(value["priceRange"], json!(2));
        assert_eq!(value["reviewCount"], json!(0));
        assert_eq!(value["category"], json!("korean"));
        assert!(value.get("phoneNumber").is_none());
        assert_eq!(value["businessHours"]["monday"], serde_json::Value::Null);
    }

    #[test]
    fn status_uses_restaurant_hours() {
        let mut restaurant = fixtures::restaurant("1", Category::Korean);
        restaurant.business_hours = WeeklySchedule::builder()
            .day(Weekday::Mon, OpeningHours::parse("11:00", "21:00").expect("valid"))
            .build();
        let monday_noon = NaiveDate::from_ymd_opt(2026, 10, 19)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid timestamp");

        assert_eq!(restaurant.status_at(monday_noon), AvailabilityStatus::Open);
        restaurant.holidays.insert(monday_noon.date());
        assert_eq!(restaurant.status_at(monday_noon), AvailabilityStatus::Holiday);
    }
}

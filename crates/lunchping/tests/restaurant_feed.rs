use chrono::{NaiveDate, NaiveDateTime};
use lunchping::catalog::{Category, Restaurant, RestaurantFeed, RestaurantFilter, SearchPage};
use serde_json::json;

fn restaurant(id: &str, category: &str, open_monday: bool) -> Restaurant {
    let monday = if open_monday {
        json!({ "open": "11:00", "close": "21:00" })
    } else {
        serde_json::Value::Null
    };
    serde_json::from_value(json!({
        "id": id,
        "name": format!("식당 {id}"),
        "category": category,
        "description": "음식점",
        "address": "서울 중구 세종대로 110",
        "priceRange": 2,
        "imageUrl": "https://images.unsplash.com/photo-1498654896293-37aacf113fd9?w=400",
        "businessHours": { "monday": monday },
        "holidays": []
    }))
    .expect("restaurant deserializes")
}

fn monday_noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid timestamp")
}

#[test]
fn pages_merge_without_duplicates() {
    let mut feed = RestaurantFeed::new();

    let added = feed.apply_page(
        1,
        SearchPage {
            restaurants: vec![restaurant("1", "korean", true), restaurant("2", "cafe", true)],
            has_more: true,
        },
    );
    assert_eq!(added, 2);
    assert_eq!(feed.next_page(), Some(2));

    let added = feed.apply_page(
        2,
        SearchPage {
            restaurants: vec![restaurant("2", "cafe", true), restaurant("3", "japanese", false)],
            has_more: false,
        },
    );
    assert_eq!(added, 1);
    assert_eq!(feed.next_page(), None);

    let ids: Vec<&str> = feed.restaurants().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn filter_combines_category_and_open_now() {
    let restaurants = vec![
        restaurant("1", "korean", true),
        restaurant("2", "korean", false),
        restaurant("3", "cafe", true),
    ];

    let korean = RestaurantFilter {
        category: Some(Category::Korean),
        open_only: false,
    };
    assert_eq!(korean.apply(&restaurants, monday_noon()).len(), 2);

    let korean_open = RestaurantFilter {
        category: Some(Category::Korean),
        open_only: true,
    };
    let matched = korean_open.apply(&restaurants, monday_noon());
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "1");
}

#[test]
fn search_page_uses_camel_case_on_the_wire() {
    let page = SearchPage {
        restaurants: vec![restaurant("1", "korean", true)],
        has_more: true,
    };
    let value = serde_json::to_value(&page).expect("serializes");
    assert_eq!(value["hasMore"], json!(true));
    assert_eq!(value["restaurants"][0]["priceRange"], json!(2));
}

use chrono::NaiveDate;

use super::common::*;
use crate::availability::{AvailabilityStatus, HolidaySet, OpeningHours, WeeklySchedule};
use crate::catalog::{images_for, Category};
use crate::geolocation::GeoPoint;
use crate::places::{KeywordQuery, NearbyQuery, PlacesError};
use crate::recommendation::{PoolEntry, SamplerError, SamplerState};

fn point() -> GeoPoint {
    GeoPoint::new(37.5665, 126.978).expect("valid point")
}

#[tokio::test]
async fn nearby_maps_documents_and_paging() {
    let (service, provider) = service(FakeProvider::with_documents(
        vec![document("1", "음식점 > 일식 > 초밥"), document("2", "음식점 > 카페")],
        false,
    ));

    let query = NearbyQuery::new(point(), Some(800), Some(2)).expect("valid query");
    let page = service.nearby(query).await.expect("search succeeds");

    assert!(page.has_more);
    assert_eq!(page.restaurants.len(), 2);
    assert_eq!(page.restaurants[0].category, Category::Japanese);
    assert_eq!(page.restaurants[1].category, Category::Cafe);
    assert_eq!(provider.nearby_calls.lock().expect("lock")[0].page, 2);
}

#[tokio::test]
async fn keyword_search_propagates_upstream_failures() {
    let (service, _) = service(FakeProvider::failing(401));
    let query = KeywordQuery::new("국밥", point(), None).expect("valid query");

    let err = service.search(query).await.expect_err("upstream fails");
    assert!(matches!(err, PlacesError::Upstream { status: 401 }));
}

#[test]
fn place_image_defaults_to_korean() {
    let (service, _) = service(FakeProvider::default());
    let url = service.place_image("http://place.map.kakao.com/1", None);
    assert!(images_for(Category::Korean).contains(&url));

    let url = service.place_image("", Some(Category::Fastfood));
    assert!(images_for(Category::Fastfood).contains(&url));
}

#[test]
fn availability_reports_status_and_hours() {
    let (service, _) = service(FakeProvider::default());
    let schedule = WeeklySchedule::builder()
        .weekdays(OpeningHours::parse("09:00", "22:00").expect("valid"))
        .build();
    let monday = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
    let at = monday.and_hms_opt(21, 45, 0).expect("valid time");

    let view = service.availability(&schedule, &HolidaySet::new(), Some(at));
    assert_eq!(view.status, AvailabilityStatus::ClosingSoon);
    assert_eq!(view.label, "곧 마감");
    assert_eq!(view.today_hours, "09:00 - 22:00");

    let holidays: HolidaySet = [monday].into_iter().collect();
    let view = service.availability(&schedule, &holidays, Some(at));
    assert_eq!(view.status, AvailabilityStatus::Holiday);
}

#[test]
fn pick_excludes_seen_and_returns_new_state() {
    let (service, _) = service(FakeProvider::default());
    let pool = vec![PoolEntry::new("a"), PoolEntry::new("b"), PoolEntry::new("c")];
    let seen = SamplerState::from_seen(["a", "b"]);

    let outcome = service.pick(&pool, &seen, Some(5)).expect("pool not empty");
    assert_eq!(outcome.winner.id, "c");
    assert_eq!(outcome.seen_ids.len(), 3);
    assert_eq!(outcome.flicker.len(), 5);

    let empty: Vec<PoolEntry> = Vec::new();
    assert_eq!(
        service.pick(&empty, &seen, None).err(),
        Some(SamplerError::EmptyPool)
    );
}

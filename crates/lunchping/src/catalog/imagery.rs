use rand::seq::SliceRandom;
use rand::Rng;

use super::Category;

const KOREAN: &[&str] = &[
    "https://images.unsplash.com/photo-1498654896293-37aacf113fd9?w=400",
    "https://images.unsplash.com/photo-1590301157890-4810ed352733?w=400",
    "https://images.unsplash.com/photo-1580651315530-69c8e0026377?w=400",
];
const CHINESE: &[&str] = &[
    "https://images.unsplash.com/photo-1563245372-f21724e3856d?w=400",
    "https://images.unsplash.com/photo-1525755662778-989d0524087e?w=400",
];
const JAPANESE: &[&str] = &[
    "https://images.unsplash.com/photo-1579871494447-9811cf80d66c?w=400",
    "https://images.unsplash.com/photo-1553621042-f6e147245754?w=400",
];
const WESTERN: &[&str] = &[
    "https://images.unsplash.com/photo-1481931098730-318b6f776db0?w=400",
    "https://images.unsplash.com/photo-1565299624946-b28f40a0ae38?w=400",
];
const ASIAN: &[&str] = &[
    "https://images.unsplash.com/photo-1555126634-323283e090fa?w=400",
    "https://images.unsplash.com/photo-1569718212165-3a8278d5f624?w=400",
];
const SNACK: &[&str] = &[
    "https://images.unsplash.com/photo-1635363638580-c2809d049eee?w=400",
    "https://images.unsplash.com/photo-1590301157890-4810ed352733?w=400",
];
const CAFE: &[&str] = &[
    "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085?w=400",
    "https://images.unsplash.com/photo-1509042239860-f550ce710b93?w=400",
];
const FASTFOOD: &[&str] = &[
    "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=400",
    "https://images.unsplash.com/photo-1513104890138-7c749659a591?w=400",
];

/// Stock photos used when the search provider has no picture of a place.
pub fn images_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Korean => KOREAN,
        Category::Chinese => CHINESE,
        Category::Japanese => JAPANESE,
        Category::Western => WESTERN,
        Category::Asian => ASIAN,
        Category::Snack => SNACK,
        Category::Cafe => CAFE,
        Category::Fastfood => FASTFOOD,
    }
}

pub fn category_image<R: Rng + ?Sized>(category: Category, rng: &mut R) -> &'static str {
    images_for(category).choose(rng).copied().unwrap_or(KOREAN[0])
}

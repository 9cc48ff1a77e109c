mod category;
mod feed;
mod imagery;
mod restaurant;

pub use category::{infer_category, Category, PriceRange, CATEGORY_RULES};
pub use feed::{RestaurantFeed, RestaurantFilter, SearchPage};
pub use imagery::{category_image, images_for};
pub use restaurant::{format_distance, Menu, Restaurant};

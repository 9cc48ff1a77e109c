use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Korean,
    Chinese,
    Japanese,
    Western,
    Asian,
    Snack,
    Cafe,
    Fastfood,
}

impl Category {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Korean,
            Self::Chinese,
            Self::Japanese,
            Self::Western,
            Self::Asian,
            Self::Snack,
            Self::Cafe,
            Self::Fastfood,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Korean => "korean",
            Self::Chinese => "chinese",
            Self::Japanese => "japanese",
            Self::Western => "western",
            Self::Asian => "asian",
            Self::Snack => "snack",
            Self::Cafe => "cafe",
            Self::Fastfood => "fastfood",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Korean => "한식",
            Self::Chinese => "중식",
            Self::Japanese => "일식",
            Self::Western => "양식",
            Self::Asian => "아시안",
            Self::Snack => "분식",
            Self::Cafe => "카페",
            Self::Fastfood => "패스트푸드",
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Korean => "🍚",
            Self::Chinese => "🥟",
            Self::Japanese => "🍣",
            Self::Western => "🍝",
            Self::Asian => "🍜",
            Self::Snack => "🍢",
            Self::Cafe => "☕",
            Self::Fastfood => "🍔",
        }
    }

    /// Looks a category up by its wire key; unknown keys yield `None`.
    pub fn from_key(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(raw))
    }
}

/// Keyword rules evaluated top to bottom; the first rule with a keyword
/// contained in the provider's category text wins.
pub const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (&["한식", "백반", "국밥"], Category::Korean),
    (&["중식", "중국"], Category::Chinese),
    (&["일식", "초밥", "돈까스"], Category::Japanese),
    (&["양식", "이탈리", "파스타", "스테이크"], Category::Western),
    (&["베트남", "태국", "아시안"], Category::Asian),
    (&["분식", "떡볶이", "김밥"], Category::Snack),
    (&["카페", "커피", "디저트"], Category::Cafe),
    (&["패스트", "버거", "피자"], Category::Fastfood),
];

pub const DEFAULT_CATEGORY: Category = Category::Korean;

/// Maps free-text such as `음식점 > 한식 > 국밥` onto one of the eight tags.
pub fn infer_category(category_text: &str) -> Category {
    let text = category_text.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, category)| *category)
        .unwrap_or(DEFAULT_CATEGORY)
}

/// Rough price tier guessed from the category text, rendered as `₩`..`₩₩₩`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PriceRange {
    Budget = 1,
    Moderate = 2,
    Premium = 3,
}

impl PriceRange {
    pub fn estimate(category_text: &str) -> Self {
        let text = category_text.to_lowercase();
        let has = |keywords: &[&str]| keywords.iter().any(|keyword| text.contains(keyword));

        if has(&["분식", "패스트"]) {
            Self::Budget
        } else if has(&["오마카세", "스테이크", "파인"]) {
            Self::Premium
        } else {
            Self::Moderate
        }
    }

    pub fn symbol(self) -> String {
        "₩".repeat(u8::from(self) as usize)
    }
}

impl From<PriceRange> for u8 {
    fn from(range: PriceRange) -> Self {
        range as u8
    }
}

impl TryFrom<u8> for PriceRange {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Budget),
            2 => Ok(Self::Moderate),
            3 => Ok(Self::Premium),
            other => Err(format!("price range must be 1, 2 or 3, got {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rule_wins() {
        assert_eq!(infer_category("음식점 > 한식 > 국밥"), Category::Korean);
        assert_eq!(infer_category("음식점 > 중식 > 중국요리"), Category::Chinese);
        assert_eq!(infer_category("음식점 > 일식 > 돈까스,우동"), Category::Japanese);
        assert_eq!(infer_category("음식점 > 양식 > 이탈리안"), Category::Western);
        assert_eq!(infer_category("음식점 > 아시아음식 > 베트남음식"), Category::Asian);
        assert_eq!(infer_category("음식점 > 분식 > 떡볶이"), Category::Snack);
        assert_eq!(infer_category("음식점 > 카페 > 커피전문점"), Category::Cafe);
        assert_eq!(infer_category("음식점 > 패스트푸드 > 버거킹"), Category::Fastfood);
        // Both snack and fastfood keywords: the earlier rule decides.
        assert_eq!(infer_category("분식 피자"), Category::Snack);
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(infer_category("음식점 > 술집 > 호프"), DEFAULT_CATEGORY);
        assert_eq!(infer_category(""), DEFAULT_CATEGORY);
    }

    #[test]
    fn keys_round_trip_through_lookup() {
        for category in Category::ordered() {
            assert_eq!(Category::from_key(category.key()), Some(category));
        }
        assert_eq!(Category::from_key("FASTFOOD"), Some(Category::Fastfood));
        assert_eq!(Category::from_key("bbq"), None);
    }

    #[test]
    fn estimates_price_tiers() {
        assert_eq!(PriceRange::estimate("음식점 > 분식"), PriceRange::Budget);
        assert_eq!(PriceRange::estimate("음식점 > 일식 > 오마카세"), PriceRange::Premium);
        assert_eq!(PriceRange::estimate("음식점 > 한식"), PriceRange::Moderate);
        assert_eq!(PriceRange::Premium.symbol(), "₩₩₩");
    }

    #[test]
    fn price_range_serializes_as_number() {
        assert_eq!(
            serde_json::to_value(PriceRange::Moderate).expect("serializes"),
            serde_json::json!(2)
        );
        assert!(serde_json::from_value::<PriceRange>(serde_json::json!(4)).is_err());
    }
}

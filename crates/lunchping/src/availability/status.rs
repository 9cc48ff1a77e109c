use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityStatus {
    Open,
    Closed,
    Holiday,
    OpeningSoon,
    ClosingSoon,
}

impl AvailabilityStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Open,
            Self::Closed,
            Self::Holiday,
            Self::OpeningSoon,
            Self::ClosingSoon,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "영업 중",
            Self::Closed => "영업 종료",
            Self::Holiday => "휴무일",
            Self::OpeningSoon => "곧 오픈",
            Self::ClosingSoon => "곧 마감",
        }
    }

    /// Whether the "open only" filter keeps a restaurant in this state.
    pub const fn is_operating(self) -> bool {
        matches!(self, Self::Open | Self::OpeningSoon | Self::ClosingSoon)
    }
}

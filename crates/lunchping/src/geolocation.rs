//! Coordinates reported by the browser and the reasons a position can be missing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS84 position, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint", into = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationFailure> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(LocationFailure::PositionUnavailable);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Serialize, Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = LocationFailure;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl From<GeoPoint> for RawGeoPoint {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationFailure {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unknown,
    Unsupported,
}

impl LocationFailure {
    /// Maps the browser's `GeolocationPositionError.code`.
    pub const fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Unknown,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "위치 접근 권한이 거부되었습니다. 브라우저 설정에서 위치 권한을 허용해주세요."
            }
            Self::PositionUnavailable => "위치 정보를 가져올 수 없습니다.",
            Self::Timeout => "위치 정보 요청 시간이 초과되었습니다.",
            Self::Unknown => "위치 정보를 가져오는 중 오류가 발생했습니다.",
            Self::Unsupported => "이 브라우저에서는 위치 서비스를 지원하지 않습니다.",
        }
    }
}

impl fmt::Display for LocationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for LocationFailure {}

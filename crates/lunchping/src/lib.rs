pub mod availability;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geolocation;
pub mod places;
pub mod recommendation;
pub mod storage;
pub mod telemetry;

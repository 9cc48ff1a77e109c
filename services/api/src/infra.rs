use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use lunchping::availability::{OpeningHours, WeeklySchedule};
use lunchping::storage::{
    public_url, validate_key, ObjectStore, StorageError, StoredBlob, StoredObject,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) store: Arc<dyn ObjectStore>,
}

/// Bucket held in process memory; used by `serve --ephemeral-storage` and tests.
#[derive(Debug, Clone)]
pub(crate) struct InMemoryObjectStore {
    bucket: String,
    public_base_url: String,
    objects: Arc<Mutex<HashMap<String, StoredBlob>>>,
}

impl InMemoryObjectStore {
    pub(crate) fn new(bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            public_base_url: public_base_url.into(),
            objects: Arc::default(),
        }
    }

    fn objects(&self) -> std::sync::MutexGuard<'_, HashMap<String, StoredBlob>> {
        // A poisoned map still holds whole objects; keep serving them.
        self.objects
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        validate_key(key)?;
        if bytes.is_empty() {
            return Err(StorageError::EmptyUpload);
        }
        self.objects().insert(
            key.to_string(),
            StoredBlob {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );

        Ok(StoredObject {
            key: key.to_string(),
            url: public_url(&self.public_base_url, &self.bucket, key),
            content_type: content_type.to_string(),
            size: bytes.len(),
        })
    }

    async fn get(&self, key: &str) -> Result<Option<StoredBlob>, StorageError> {
        validate_key(key)?;
        Ok(self.objects().get(key).cloned())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DDTHH:MM ({err})"))
}

/// One `--hours` argument: `mon=09:00-22:00`, or `weekdays=`/`daily=` for
/// several days at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DayHours {
    pub(crate) days: Vec<Weekday>,
    pub(crate) hours: OpeningHours,
}

pub(crate) fn parse_day_hours(raw: &str) -> Result<DayHours, String> {
    let (day, range) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected DAY=HH:MM-HH:MM, got '{raw}'"))?;
    let (open, close) = range
        .split_once('-')
        .ok_or_else(|| format!("expected HH:MM-HH:MM after '=', got '{range}'"))?;
    let hours = OpeningHours::parse(open, close).map_err(|err| err.to_string())?;

    let days = match day.trim().to_ascii_lowercase().as_str() {
        "weekdays" => vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ],
        "daily" => vec![
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ],
        other => vec![other
            .parse::<Weekday>()
            .map_err(|_| format!("'{other}' is not a day of the week"))?],
    };

    Ok(DayHours { days, hours })
}

pub(crate) fn build_schedule(entries: &[DayHours]) -> WeeklySchedule {
    entries
        .iter()
        .fold(WeeklySchedule::builder(), |builder, entry| {
            entry
                .days
                .iter()
                .fold(builder, |builder, day| builder.day(*day, entry.hours))
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_hours_arguments() {
        let entry = parse_day_hours("mon=09:00-22:00").expect("valid");
        assert_eq!(entry.days, vec![Weekday::Mon]);
        assert_eq!(entry.hours.open(), 540);

        let entry = parse_day_hours("weekdays=11:00-21:00").expect("valid");
        assert_eq!(entry.days.len(), 5);

        assert!(parse_day_hours("funday=09:00-10:00").is_err());
        assert!(parse_day_hours("fri=22:00-02:00").is_err());
        assert!(parse_day_hours("09:00-10:00").is_err());
    }

    #[test]
    fn later_entries_override_earlier_days() {
        let schedule = build_schedule(&[
            parse_day_hours("daily=09:00-22:00").expect("valid"),
            parse_day_hours("sat=10:00-15:00").expect("valid"),
        ]);
        assert_eq!(schedule.hours_for(Weekday::Sat).map(|h| h.close()), Some(900));
        assert_eq!(schedule.hours_for(Weekday::Sun).map(|h| h.close()), Some(1320));
    }

    #[test]
    fn parses_timestamps() {
        assert!(parse_datetime("2026-10-19T12:00").is_ok());
        assert!(parse_datetime("2026-10-19T12:00:30").is_ok());
        assert!(parse_datetime("12:00").is_err());
        assert!(parse_date("2026-10-19").is_ok());
    }

    #[tokio::test]
    async fn memory_store_round_trips_objects() {
        let store = InMemoryObjectStore::new("lunchping", "http://localhost:3000/files");
        let stored = store
            .put("1-menu", b"png", "image/png")
            .await
            .expect("stored");
        assert_eq!(stored.url, "http://localhost:3000/files/lunchping/1-menu");
        assert_eq!(
            store.get("1-menu").await.expect("read"),
            Some(StoredBlob {
                bytes: b"png".to_vec(),
                content_type: "image/png".to_string(),
            })
        );
        assert_eq!(store.get("missing").await.expect("read"), None);
        assert!(store.put("../x", b"x", "text/plain").await.is_err());
    }
}

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike};

use super::{AvailabilityStatus, HolidaySet, WeeklySchedule};

/// Length of the "opening soon" and "closing soon" windows.
pub const SOON_WINDOW_MINUTES: i32 = 30;

/// Computes the status of a restaurant at `now`.
///
/// `now` must already be expressed in the schedule's civil time. Rules are
/// evaluated in order and the first match wins: holiday, regular closing day,
/// opening soon, closing soon, open, closed.
pub fn classify(
    schedule: &WeeklySchedule,
    holidays: &HolidaySet,
    now: NaiveDateTime,
) -> AvailabilityStatus {
    if holidays.contains(now.date()) {
        return AvailabilityStatus::Holiday;
    }

    let Some(hours) = schedule.hours_for(now.weekday()) else {
        return AvailabilityStatus::Closed;
    };

    let minute = (now.hour() * 60 + now.minute()) as i32;
    let open = i32::from(hours.open());
    let close = i32::from(hours.close());

    if open - SOON_WINDOW_MINUTES <= minute && minute < open {
        AvailabilityStatus::OpeningSoon
    } else if close - SOON_WINDOW_MINUTES <= minute && minute < close {
        AvailabilityStatus::ClosingSoon
    } else if open <= minute && minute < close {
        AvailabilityStatus::Open
    } else {
        AvailabilityStatus::Closed
    }
}

/// Same as [`classify`] for a zoned timestamp, using its local wall-clock time.
pub fn classify_in<Tz: TimeZone>(
    schedule: &WeeklySchedule,
    holidays: &HolidaySet,
    now: &DateTime<Tz>,
) -> AvailabilityStatus {
    classify(schedule, holidays, now.naive_local())
}

//! Opening-hours tables and the open/closed status shown on every restaurant card.
//!
//! Schedules are validated when they are built (or deserialized) so that
//! [`classify`] itself never fails: once a [`WeeklySchedule`] exists every
//! day's hours satisfy `open < close` inside a single civil day.

mod classifier;
mod holidays;
mod schedule;
mod status;

pub use classifier::{classify, classify_in, SOON_WINDOW_MINUTES};
pub use holidays::HolidaySet;
pub use schedule::{
    format_minute, parse_minute, today_hours_label, InvalidScheduleError, OpeningHours,
    WeeklySchedule, WeeklyScheduleBuilder, MINUTES_PER_DAY,
};
pub use status::AvailabilityStatus;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: u16 = 1440;

/// Validation failures raised while building schedules and holiday sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidScheduleError {
    #[error("'{0}' is not a valid HH:MM time")]
    MalformedTime(String),
    #[error("minute {0} is outside the 0..1440 day range")]
    MinuteOutOfRange(u16),
    #[error(
        "opening {} must be earlier than closing {}; hours spanning midnight are unsupported",
        format_minute(*.open),
        format_minute(*.close)
    )]
    OvernightUnsupported { open: u16, close: u16 },
    #[error("'{0}' is not a valid YYYY-MM-DD date")]
    MalformedDate(String),
    #[error("'{0}' is not a day of the week")]
    UnknownWeekday(String),
}

/// Parses `HH:MM` into minutes since midnight.
pub fn parse_minute(raw: &str) -> Result<u16, InvalidScheduleError> {
    let malformed = || InvalidScheduleError::MalformedTime(raw.to_string());
    let (hours, minutes) = raw.trim().split_once(':').ok_or_else(malformed)?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(malformed());
    }
    let hours: u16 = hours.parse().map_err(|_| malformed())?;
    let minutes: u16 = minutes.parse().map_err(|_| malformed())?;
    if minutes >= 60 {
        return Err(malformed());
    }

    let total = hours * 60 + minutes;
    if total >= MINUTES_PER_DAY {
        return Err(InvalidScheduleError::MinuteOutOfRange(total));
    }
    Ok(total)
}

pub fn format_minute(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// One day's trading window, `open` inclusive and `close` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOpeningHours", into = "RawOpeningHours")]
pub struct OpeningHours {
    open: u16,
    close: u16,
}

impl OpeningHours {
    pub fn new(open: u16, close: u16) -> Result<Self, InvalidScheduleError> {
        for minute in [open, close] {
            if minute >= MINUTES_PER_DAY {
                return Err(InvalidScheduleError::MinuteOutOfRange(minute));
            }
        }
        if open >= close {
            return Err(InvalidScheduleError::OvernightUnsupported { open, close });
        }
        Ok(Self { open, close })
    }

    pub fn parse(open: &str, close: &str) -> Result<Self, InvalidScheduleError> {
        Self::new(parse_minute(open)?, parse_minute(close)?)
    }

    pub const fn open(&self) -> u16 {
        self.open
    }

    pub const fn close(&self) -> u16 {
        self.close
    }

    pub fn label(&self) -> String {
        format!("{} - {}", format_minute(self.open), format_minute(self.close))
    }
}

#[derive(Serialize, Deserialize)]
struct RawOpeningHours {
    open: String,
    close: String,
}

impl TryFrom<RawOpeningHours> for OpeningHours {
    type Error = InvalidScheduleError;

    fn try_from(raw: RawOpeningHours) -> Result<Self, Self::Error> {
        Self::parse(&raw.open, &raw.close)
    }
}

impl From<OpeningHours> for RawOpeningHours {
    fn from(hours: OpeningHours) -> Self {
        Self {
            open: format_minute(hours.open),
            close: format_minute(hours.close),
        }
    }
}

/// Regular trading hours per weekday; a missing day is a regular closing day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWeeklySchedule", into = "RawWeeklySchedule")]
pub struct WeeklySchedule {
    days: [Option<OpeningHours>; 7],
}

impl WeeklySchedule {
    /// A schedule with every day closed, used for places the search provider
    /// returns without hours.
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn builder() -> WeeklyScheduleBuilder {
        WeeklyScheduleBuilder::default()
    }

    pub fn hours_for(&self, day: Weekday) -> Option<&OpeningHours> {
        self.days[day.num_days_from_monday() as usize].as_ref()
    }

    pub fn is_closed_all_week(&self) -> bool {
        self.days.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Option<&OpeningHours>)> + '_ {
        WEEK.iter().map(|day| (*day, self.hours_for(*day)))
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Default)]
pub struct WeeklyScheduleBuilder {
    days: [Option<OpeningHours>; 7],
}

impl WeeklyScheduleBuilder {
    pub fn day(mut self, day: Weekday, hours: OpeningHours) -> Self {
        self.days[day.num_days_from_monday() as usize] = Some(hours);
        self
    }

    pub fn weekdays(mut self, hours: OpeningHours) -> Self {
        for day in &WEEK[..5] {
            self.days[day.num_days_from_monday() as usize] = Some(hours);
        }
        self
    }

    pub fn every_day(mut self, hours: OpeningHours) -> Self {
        self.days = [Some(hours); 7];
        self
    }

    pub fn closed_on(mut self, day: Weekday) -> Self {
        self.days[day.num_days_from_monday() as usize] = None;
        self
    }

    pub fn build(self) -> WeeklySchedule {
        WeeklySchedule { days: self.days }
    }
}

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct RawWeeklySchedule {
    monday: Option<OpeningHours>,
    tuesday: Option<OpeningHours>,
    wednesday: Option<OpeningHours>,
    thursday: Option<OpeningHours>,
    friday: Option<OpeningHours>,
    saturday: Option<OpeningHours>,
    sunday: Option<OpeningHours>,
}

impl From<RawWeeklySchedule> for WeeklySchedule {
    fn from(raw: RawWeeklySchedule) -> Self {
        Self {
            days: [
                raw.monday,
                raw.tuesday,
                raw.wednesday,
                raw.thursday,
                raw.friday,
                raw.saturday,
                raw.sunday,
            ],
        }
    }
}

impl From<WeeklySchedule> for RawWeeklySchedule {
    fn from(schedule: WeeklySchedule) -> Self {
        let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = schedule.days;
        Self {
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
            sunday,
        }
    }
}

/// Card caption for a day's hours, e.g. `09:00 - 22:00`.
pub fn today_hours_label(schedule: &WeeklySchedule, day: Weekday) -> String {
    match schedule.hours_for(day) {
        Some(hours) => hours.label(),
        None => "정기 휴무".to_string(),
    }
}

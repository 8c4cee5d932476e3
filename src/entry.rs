use crate::reconcile::normalize::fold_name;
use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of the per-term schedule feed, exactly as published.
///
/// Every field is optional because the feed is hand-maintained; rows missing
/// the fields the grid needs are rejected by validation, not by parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawScheduleEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub room: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lecturer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,
}

/// Reads an explicit `null` as the field's default. Hand-edited feeds and
/// nullable store columns send `null` where a key could have been omitted.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawScheduleEntry {
    pub fn new(
        course_name: impl Into<String>,
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            course_name: Some(course_name.into()),
            day: Some(day.into()),
            start_time: Some(start_time.into()),
            end_time: Some(end_time.into()),
            ..Self::default()
        }
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    pub fn with_lecturer(mut self, lecturer: impl Into<String>) -> Self {
        self.lecturer = lecturer.into();
        self
    }

    pub fn with_semester(mut self, semester: u32) -> Self {
        self.semester = Some(semester);
        self
    }
}

/// The static schedule published for one term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermFeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default)]
    pub schedule: Vec<RawScheduleEntry>,
}

impl TermFeed {
    pub fn new(term: Option<String>, schedule: Vec<RawScheduleEntry>) -> Self {
        Self { term, schedule }
    }

    pub fn len(&self) -> usize {
        self.schedule.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }
}

/// A validated feed row: the day is a weekday and the time range a [`TimeSlot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub course_name: String,
    pub day: Weekday,
    pub slot: TimeSlot,
    pub room: String,
    pub lecturer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<u32>,
}

/// A `start-end` interval inside one day. Two slots are the same cell only
/// when both bounds are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    start: NaiveTime,
    end: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSlotError {
    Unparsable(String),
    EmptyRange { start: NaiveTime, end: NaiveTime },
}

impl fmt::Display for TimeSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSlotError::Unparsable(input) => write!(f, "invalid time '{input}' (expected HH:MM)"),
            TimeSlotError::EmptyRange { start, end } => write!(
                f,
                "slot end {} must be after start {}",
                end.format("%H:%M"),
                start.format("%H:%M")
            ),
        }
    }
}

impl std::error::Error for TimeSlotError {}

impl TimeSlot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, TimeSlotError> {
        if end <= start {
            return Err(TimeSlotError::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, TimeSlotError> {
        Self::new(parse_clock(start)?, parse_clock(end)?)
    }

    /// Hourly slots covering `[first_hour, last_hour)`.
    pub fn hourly(first_hour: u32, last_hour: u32) -> Vec<Self> {
        (first_hour..last_hour)
            .filter_map(|hour| {
                let start = NaiveTime::from_hms_opt(hour, 0, 0)?;
                let end = NaiveTime::from_hms_opt(hour + 1, 0, 0)?;
                Self::new(start, end).ok()
            })
            .collect()
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }
}

/// Parses `H:MM`, `HH:MM` or `HH:MM:SS`. Seconds are dropped so a slot's key
/// always agrees with its `HH:MM-HH:MM` label.
fn parse_clock(input: &str) -> Result<NaiveTime, TimeSlotError> {
    let trimmed = input.trim();
    let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| TimeSlotError::Unparsable(input.to_string()))?;
    NaiveTime::from_hms_opt(parsed.hour(), parsed.minute(), 0)
        .ok_or_else(|| TimeSlotError::Unparsable(input.to_string()))
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

impl FromStr for TimeSlot {
    type Err = TimeSlotError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (start, end) = value
            .split_once('-')
            .ok_or_else(|| TimeSlotError::Unparsable(value.to_string()))?;
        Self::parse(start, end)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = TimeSlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(value: TimeSlot) -> Self {
        value.to_string()
    }
}

const GREEK_DAY_NAMES: [(&str, Weekday); 7] = [
    ("Δευτέρα", Weekday::Mon),
    ("Τρίτη", Weekday::Tue),
    ("Τετάρτη", Weekday::Wed),
    ("Πέμπτη", Weekday::Thu),
    ("Παρασκευή", Weekday::Fri),
    ("Σάββατο", Weekday::Sat),
    ("Κυριακή", Weekday::Sun),
];

/// Parses a feed day label. Accepts the Greek day names the feed is published
/// with (any casing or accenting) and English names or abbreviations.
pub fn parse_weekday(label: &str) -> Option<Weekday> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(day) = trimmed.parse::<Weekday>() {
        return Some(day);
    }
    let key = fold_name(trimmed);
    GREEK_DAY_NAMES
        .iter()
        .find(|(name, _)| fold_name(name) == key)
        .map(|(_, day)| *day)
}

/// Greek label for a weekday, as used by the published feed.
pub fn weekday_label(day: Weekday) -> &'static str {
    GREEK_DAY_NAMES
        .iter()
        .find(|(_, candidate)| *candidate == day)
        .map(|(name, _)| *name)
        .unwrap_or("")
}

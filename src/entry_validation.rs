use crate::entry::{RawScheduleEntry, ScheduleEntry, TimeSlot, TimeSlotError, parse_weekday};
use std::fmt;

/// Why a feed row could not be placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryDefect {
    MissingCourseName,
    MissingDay,
    UnknownDay(String),
    MissingTime,
    InvalidTime(TimeSlotError),
}

impl fmt::Display for EntryDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryDefect::MissingCourseName => write!(f, "missing course name"),
            EntryDefect::MissingDay => write!(f, "missing day"),
            EntryDefect::UnknownDay(day) => write!(f, "unknown day '{day}'"),
            EntryDefect::MissingTime => write!(f, "missing start or end time"),
            EntryDefect::InvalidTime(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for EntryDefect {}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn validate_entry(raw: &RawScheduleEntry) -> Result<ScheduleEntry, EntryDefect> {
    let course_name = present(&raw.course_name).ok_or(EntryDefect::MissingCourseName)?;
    let day_label = present(&raw.day).ok_or(EntryDefect::MissingDay)?;
    let day =
        parse_weekday(day_label).ok_or_else(|| EntryDefect::UnknownDay(day_label.to_string()))?;
    let (start, end) = match (present(&raw.start_time), present(&raw.end_time)) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(EntryDefect::MissingTime),
    };
    let slot = TimeSlot::parse(start, end).map_err(EntryDefect::InvalidTime)?;
    Ok(ScheduleEntry {
        course_name: course_name.to_string(),
        day,
        slot,
        room: raw.room.trim().to_string(),
        lecturer: raw.lecturer.trim().to_string(),
        semester: raw.semester,
    })
}

impl TryFrom<&RawScheduleEntry> for ScheduleEntry {
    type Error = EntryDefect;

    fn try_from(raw: &RawScheduleEntry) -> Result<Self, Self::Error> {
        validate_entry(raw)
    }
}

/// Validates a whole feed, keeping the valid rows and reporting each
/// rejected row with its position in the feed.
pub fn validate_feed(feed: &[RawScheduleEntry]) -> (Vec<ScheduleEntry>, Vec<(usize, EntryDefect)>) {
    let mut valid = Vec::with_capacity(feed.len());
    let mut defects = Vec::new();
    for (index, raw) in feed.iter().enumerate() {
        match validate_entry(raw) {
            Ok(entry) => valid.push(entry),
            Err(defect) => defects.push((index, defect)),
        }
    }
    (valid, defects)
}

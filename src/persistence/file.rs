use super::{PersistenceError, PersistenceResult};
use crate::config::EngineConfig;
use crate::course::{CourseStatus, EnrolledCourse};
use crate::entry::{RawScheduleEntry, TermFeed};
use crate::timetable::TimetableEngine;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

pub fn load_feed_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<TermFeed> {
    let file = File::open(path)?;
    let feed: TermFeed = serde_json::from_reader(BufReader::new(file))?;
    Ok(feed)
}

pub fn save_feed_to_json<P: AsRef<Path>>(feed: &TermFeed, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, feed)?;
    Ok(())
}

#[derive(Default, Serialize, Deserialize)]
struct EntryCsvRecord {
    #[serde(default)]
    course_name: String,
    #[serde(default)]
    day: String,
    #[serde(default)]
    start_time: String,
    #[serde(default)]
    end_time: String,
    #[serde(default)]
    room: String,
    #[serde(default)]
    lecturer: String,
    #[serde(default)]
    semester: String,
}

impl EntryCsvRecord {
    /// Blank cells become absent fields; the engine reports those rows
    /// instead of the loader rejecting the whole file. An unreadable
    /// semester only loses the semester.
    fn into_entry(self, row: usize) -> RawScheduleEntry {
        let semester = parse_u32(&self.semester).unwrap_or_else(|msg| {
            warn!(row, %msg, "ignoring unreadable semester in schedule feed");
            None
        });
        RawScheduleEntry {
            course_name: parse_string_option(self.course_name),
            day: parse_string_option(self.day),
            start_time: parse_string_option(self.start_time),
            end_time: parse_string_option(self.end_time),
            room: self.room.trim().to_string(),
            lecturer: self.lecturer.trim().to_string(),
            semester,
        }
    }
}

/// Loads a feed from CSV with a `course_name,day,start_time,end_time,room,
/// lecturer,semester` header. CSV feeds carry no term label.
pub fn load_feed_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<TermFeed> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut schedule = Vec::new();
    for (row, record) in reader.deserialize::<EntryCsvRecord>().enumerate() {
        schedule.push(record?.into_entry(row));
    }
    Ok(TermFeed::new(None, schedule))
}

/// Loads the course store's listing: a JSON array of course records.
pub fn load_courses_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<EnrolledCourse>> {
    let file = File::open(path)?;
    let courses: Vec<EnrolledCourse> = serde_json::from_reader(BufReader::new(file))?;
    super::validate_courses(&courses)?;
    Ok(courses)
}

#[derive(Default, Serialize, Deserialize)]
struct CourseCsvRecord {
    id: i32,
    name: String,
    #[serde(default)]
    code: String,
    #[serde(default)]
    ects: String,
    #[serde(default)]
    semester: String,
    #[serde(default)]
    status: String,
}

impl CourseCsvRecord {
    fn into_course(self) -> PersistenceResult<EnrolledCourse> {
        let status = if self.status.trim().is_empty() {
            CourseStatus::default()
        } else {
            self.status.parse::<CourseStatus>().map_err(|_| {
                PersistenceError::InvalidData(format!(
                    "course {} has invalid status '{}'",
                    self.id, self.status
                ))
            })?
        };
        let id = self.id;
        let invalid = |msg: String| PersistenceError::InvalidData(format!("course {id}: {msg}"));
        Ok(EnrolledCourse {
            id,
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            ects: parse_u32(&self.ects).map_err(invalid)?.unwrap_or(0),
            semester: parse_u32(&self.semester).map_err(invalid)?.unwrap_or(0),
            status,
        })
    }
}

pub fn load_courses_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<EnrolledCourse>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut courses = Vec::new();
    for record in reader.deserialize::<CourseCsvRecord>() {
        courses.push(record?.into_course()?);
    }
    super::validate_courses(&courses)?;
    Ok(courses)
}

/// Loads and validates an engine configuration. Missing fields take their
/// defaults.
pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<EngineConfig> {
    let file = File::open(path)?;
    let config: EngineConfig = serde_json::from_reader(BufReader::new(file))?;
    TimetableEngine::from_config(&config)?;
    Ok(config)
}

pub fn save_config_to_json<P: AsRef<Path>>(config: &EngineConfig, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

fn parse_u32(input: &str) -> Result<Option<u32>, String> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    input
        .trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|e| format!("invalid integer '{input}': {e}"))
}

fn parse_string_option(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

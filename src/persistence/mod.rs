use crate::course::EnrolledCourse;
use crate::timetable::EngineConfigError;
use serde_json::Error as SerdeJsonError;
use std::collections::HashSet;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    Config(EngineConfigError),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::Config(err) => write!(f, "config error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<EngineConfigError> for PersistenceError {
    fn from(value: EngineConfigError) -> Self {
        Self::Config(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Course ids must be unique; the engine keys its results by them.
pub fn validate_courses(courses: &[EnrolledCourse]) -> PersistenceResult<()> {
    let mut seen_ids = HashSet::with_capacity(courses.len());
    for course in courses {
        if !seen_ids.insert(course.id) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate course id {}",
                course.id
            )));
        }
        if course.name.trim().is_empty() {
            return Err(PersistenceError::InvalidData(format!(
                "course {} has an empty name",
                course.id
            )));
        }
    }
    Ok(())
}

pub mod file;

pub use file::{
    load_config_from_json, load_courses_from_csv, load_courses_from_json, load_feed_from_csv,
    load_feed_from_json, save_config_to_json, save_feed_to_json,
};

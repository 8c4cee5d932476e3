use crate::entry::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Enrollment status as stored by the course store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseStatus {
    #[serde(rename = "Not Taken")]
    NotTaken,
    #[serde(rename = "Current Semester")]
    CurrentSemester,
    #[serde(rename = "Passed")]
    Passed,
    #[serde(rename = "Failed")]
    Failed,
    #[serde(rename = "Planned")]
    Planned,
}

impl Default for CourseStatus {
    fn default() -> Self {
        CourseStatus::NotTaken
    }
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::NotTaken => "Not Taken",
            CourseStatus::CurrentSemester => "Current Semester",
            CourseStatus::Passed => "Passed",
            CourseStatus::Failed => "Failed",
            CourseStatus::Planned => "Planned",
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "not taken" | "not_taken" => Ok(CourseStatus::NotTaken),
            "current semester" | "current_semester" => Ok(CourseStatus::CurrentSemester),
            "passed" => Ok(CourseStatus::Passed),
            "failed" => Ok(CourseStatus::Failed),
            "planned" => Ok(CourseStatus::Planned),
            _ => Err(()),
        }
    }
}

/// A course record owned by the course store. The engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledCourse {
    pub id: i32,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ects: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub semester: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: CourseStatus,
}

impl EnrolledCourse {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            code: String::new(),
            ects: 0,
            semester: 0,
            status: CourseStatus::NotTaken,
        }
    }

    /// Shorthand for a course the student is taking this term.
    pub fn current(id: i32, name: impl Into<String>) -> Self {
        let mut course = Self::new(id, name);
        course.status = CourseStatus::CurrentSemester;
        course
    }

    pub fn is_current(&self) -> bool {
        self.status == CourseStatus::CurrentSemester
    }
}

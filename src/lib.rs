pub mod config;
pub mod course;
pub mod entry;
pub(crate) mod entry_validation;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod layout;
pub mod persistence;
pub mod reconcile;
pub mod timetable;

pub use config::{EngineConfig, MatchThresholds};
pub use course::{CourseStatus, EnrolledCourse};
pub use entry::{RawScheduleEntry, ScheduleEntry, TermFeed, TimeSlot, TimeSlotError};
pub use entry_validation::{EntryDefect, validate_entry, validate_feed};
pub use layout::{LayoutError, TimetableLayout, TimetableLayoutConfig};
pub use persistence::{
    PersistenceError, load_config_from_json, load_courses_from_csv, load_courses_from_json,
    load_feed_from_csv, load_feed_from_json, save_config_to_json, save_feed_to_json,
    validate_courses,
};
pub use reconcile::{
    ConflictCell, ConflictReport, Grid, MatchedScheduleEntry, Matcher, Parity, display_name,
    is_applicable, match_entries, normalize,
};
pub use timetable::{
    EngineConfigError, EngineWarning, ScheduleComputation, StudentRequest, TimetableEngine,
    TimetableSummary, compute_schedule,
};

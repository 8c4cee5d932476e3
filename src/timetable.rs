use crate::config::{EngineConfig, MatchThresholds};
use crate::course::EnrolledCourse;
use crate::entry::{RawScheduleEntry, ScheduleEntry, TimeSlot};
use crate::entry_validation::{EntryDefect, validate_feed};
use crate::layout::{LayoutError, TimetableLayout};
use crate::reconcile::{
    Applicability, CandidateSet, ConflictReport, Grid, MatchedScheduleEntry, Matcher, Parity,
    applicability, report,
};
use chrono::Weekday;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace, warn};

/// Non-fatal conditions met while reconciling. The run always completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineWarning {
    /// A feed row was skipped.
    InvalidEntry {
        index: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        course_name: Option<String>,
        #[serde(serialize_with = "serialize_display")]
        reason: EntryDefect,
    },
    /// Group-marked rows were excluded because the student's parity is unknown.
    AmbiguousParity { excluded_entries: usize },
    /// A matched session falls outside the display layout.
    OutsideLayout {
        course_id: i32,
        day: Weekday,
        slot: TimeSlot,
    },
}

fn serialize_display<T: fmt::Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

impl fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineWarning::InvalidEntry {
                index,
                course_name,
                reason,
            } => match course_name {
                Some(name) => write!(f, "skipped feed row {index} ('{name}'): {reason}"),
                None => write!(f, "skipped feed row {index}: {reason}"),
            },
            EngineWarning::AmbiguousParity { excluded_entries } => write!(
                f,
                "student parity is unset; excluded {excluded_entries} group-specific entries"
            ),
            EngineWarning::OutsideLayout {
                course_id,
                day,
                slot,
            } => write!(
                f,
                "course {course_id} has a session on {day} {slot} outside the timetable layout"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimetableSummary {
    pub enrolled_courses: usize,
    pub weekly_sessions: usize,
    pub total_ects: u32,
    pub unscheduled_courses: usize,
    pub conflicting_cells: usize,
    pub skipped_entries: usize,
    pub parity: Option<Parity>,
}

impl TimetableSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("courses={}", self.enrolled_courses));
        parts.push(format!("sessions={}", self.weekly_sessions));
        parts.push(format!("ects={}", self.total_ects));
        parts.push(format!(
            "group={}",
            crate::reconcile::parity_label(self.parity)
        ));
        if self.unscheduled_courses > 0 {
            parts.push(format!("unscheduled={}", self.unscheduled_courses));
        }
        if self.conflicting_cells > 0 {
            parts.push(format!("conflicts={}", self.conflicting_cells));
        }
        if self.skipped_entries > 0 {
            parts.push(format!("skipped={}", self.skipped_entries));
        }
        parts.join(", ")
    }
}

/// Result of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleComputation {
    pub grid: Grid,
    /// One key per current-semester course; empty when unscheduled.
    pub matches_by_course_id: BTreeMap<i32, Vec<ScheduleEntry>>,
    pub conflicts: ConflictReport,
    /// Current-semester courses with no matching session, in input order.
    pub unscheduled: Vec<i32>,
    pub warnings: Vec<EngineWarning>,
    pub summary: TimetableSummary,
}

impl ScheduleComputation {
    pub fn entries_for(&self, course_id: i32) -> &[ScheduleEntry] {
        self.matches_by_course_id
            .get(&course_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_unscheduled(&self, course_id: i32) -> bool {
        self.unscheduled.contains(&course_id)
    }
}

/// One student's inputs for [`TimetableEngine::compute_many`].
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRequest {
    pub courses: Vec<EnrolledCourse>,
    pub parity: Option<Parity>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineConfigError {
    Layout(LayoutError),
    Thresholds(String),
}

impl fmt::Display for EngineConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineConfigError::Layout(err) => write!(f, "invalid layout: {err}"),
            EngineConfigError::Thresholds(msg) => write!(f, "invalid thresholds: {msg}"),
        }
    }
}

impl std::error::Error for EngineConfigError {}

impl From<LayoutError> for EngineConfigError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

/// Reconciles enrolled courses against a term's schedule feed.
///
/// Holds only configuration; every call rebuilds its grid from scratch, so
/// identical inputs always produce identical output.
#[derive(Debug, Clone, Default)]
pub struct TimetableEngine {
    layout: TimetableLayout,
    matcher: Matcher,
}

impl TimetableEngine {
    pub fn new(layout: TimetableLayout, thresholds: MatchThresholds) -> Self {
        Self {
            layout,
            matcher: Matcher::new(thresholds),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineConfigError> {
        config
            .thresholds
            .validate()
            .map_err(EngineConfigError::Thresholds)?;
        let layout = TimetableLayout::from_config(&config.layout)?;
        Ok(Self::new(layout, config.thresholds))
    }

    pub fn config(&self) -> EngineConfig {
        EngineConfig {
            layout: self.layout.to_config(),
            thresholds: *self.matcher.thresholds(),
        }
    }

    pub fn layout(&self) -> &TimetableLayout {
        &self.layout
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn compute(
        &self,
        courses: &[EnrolledCourse],
        feed: &[RawScheduleEntry],
        parity: Option<Parity>,
    ) -> ScheduleComputation {
        let mut warnings = Vec::new();

        let (entries, defects) = validate_feed(feed);
        let skipped_entries = defects.len();
        for (index, defect) in defects {
            let course_name = feed[index].course_name.clone();
            warn!(index, ?course_name, %defect, "skipping malformed schedule entry");
            warnings.push(EngineWarning::InvalidEntry {
                index,
                course_name,
                reason: defect,
            });
        }

        let mut unknown_parity_exclusions = 0usize;
        let applicable: Vec<&ScheduleEntry> = entries
            .iter()
            .filter(|entry| match applicability(&entry.course_name, parity) {
                Applicability::AllGroups | Applicability::OwnGroup => true,
                Applicability::OtherGroup => {
                    trace!(entry = %entry.course_name, "excluded: other parity group");
                    false
                }
                Applicability::UnknownParity => {
                    unknown_parity_exclusions += 1;
                    false
                }
            })
            .collect();
        if unknown_parity_exclusions > 0 {
            debug!(
                excluded = unknown_parity_exclusions,
                "parity unset, dropping group-specific entries"
            );
            warnings.push(EngineWarning::AmbiguousParity {
                excluded_entries: unknown_parity_exclusions,
            });
        }

        let candidates = CandidateSet::new(applicable.iter().copied(), self.matcher.thresholds());
        debug!(
            candidates = candidates.len(),
            feed_rows = feed.len(),
            parity = crate::reconcile::parity_label(parity),
            "reconciling enrolled courses"
        );

        let current: Vec<&EnrolledCourse> = courses.iter().filter(|c| c.is_current()).collect();
        let mut matches_by_course_id: BTreeMap<i32, Vec<ScheduleEntry>> = BTreeMap::new();
        let mut matched: Vec<MatchedScheduleEntry> = Vec::new();
        let mut unscheduled = Vec::new();

        for course in &current {
            let key = self.matcher.key(&course.name);
            let hits = self.matcher.match_prepared(&key, &candidates);
            debug!(course_id = course.id, course = %course.name, matches = hits.len(), "matched course");
            if hits.is_empty() && !unscheduled.contains(&course.id) {
                unscheduled.push(course.id);
            }
            let owned = matches_by_course_id.entry(course.id).or_default();
            for (entry, rule) in hits {
                trace!(course_id = course.id, entry = %entry.course_name, ?rule, "accepted match");
                owned.push(entry.clone());
                if !self.layout.contains(entry.day, &entry.slot) {
                    warnings.push(EngineWarning::OutsideLayout {
                        course_id: course.id,
                        day: entry.day,
                        slot: entry.slot,
                    });
                }
                matched.push(MatchedScheduleEntry {
                    course_id: course.id,
                    course_code: course.code.clone(),
                    course_ects: course.ects,
                    enrolled_name: course.name.clone(),
                    entry: entry.clone(),
                });
            }
        }
        // A course listed twice may have matched on its second listing.
        unscheduled.retain(|id| {
            matches_by_course_id
                .get(id)
                .is_none_or(|entries| entries.is_empty())
        });

        let grid = Grid::assemble(matched);
        let conflicts = report(&grid, &self.layout);

        let summary = TimetableSummary {
            enrolled_courses: current.len(),
            weekly_sessions: grid.entry_count(),
            total_ects: current
                .iter()
                .fold(0u32, |total, c| total.saturating_add(c.ects)),
            unscheduled_courses: unscheduled.len(),
            conflicting_cells: conflicts.cells.len(),
            skipped_entries,
            parity,
        };

        ScheduleComputation {
            grid,
            matches_by_course_id,
            conflicts,
            unscheduled,
            warnings,
            summary,
        }
    }

    /// Runs independent students against the same feed in parallel. Results
    /// are returned in request order.
    pub fn compute_many(
        &self,
        feed: &[RawScheduleEntry],
        requests: &[StudentRequest],
    ) -> Vec<ScheduleComputation> {
        requests
            .par_iter()
            .map(|request| self.compute(&request.courses, feed, request.parity))
            .collect()
    }
}

/// Reconciles with the default layout and thresholds.
pub fn compute_schedule(
    courses: &[EnrolledCourse],
    feed: &[RawScheduleEntry],
    parity: Option<Parity>,
) -> ScheduleComputation {
    TimetableEngine::default().compute(courses, feed, parity)
}

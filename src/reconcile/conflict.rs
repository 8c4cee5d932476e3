use super::grid::{CellKey, Grid, MatchedScheduleEntry};
use crate::entry::TimeSlot;
use crate::layout::TimetableLayout;
use chrono::Weekday;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A cell held by more than one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictCell {
    pub day: Weekday,
    pub slot: TimeSlot,
    /// Owning course ids in occupant order, each listed once.
    pub course_ids: Vec<i32>,
    pub occupant_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub cells: Vec<ConflictCell>,
    pub course_has_conflict: BTreeMap<i32, bool>,
}

impl ConflictReport {
    pub fn has_conflicts(&self) -> bool {
        !self.cells.is_empty()
    }

    /// False for courses that never reached the grid.
    pub fn course_has_conflict(&self, course_id: i32) -> bool {
        self.course_has_conflict
            .get(&course_id)
            .copied()
            .unwrap_or(false)
    }

    pub fn conflicting_course_ids(&self) -> Vec<i32> {
        self.course_has_conflict
            .iter()
            .filter_map(|(id, flagged)| flagged.then_some(*id))
            .collect()
    }

    pub fn cell(&self, day: Weekday, slot: &TimeSlot) -> Option<&ConflictCell> {
        self.cells
            .iter()
            .find(|cell| cell.day == day && cell.slot == *slot)
    }
}

fn conflict_cell(key: &CellKey, occupants: &[MatchedScheduleEntry]) -> ConflictCell {
    let mut course_ids: Vec<i32> = Vec::with_capacity(occupants.len());
    for occupant in occupants {
        if !course_ids.contains(&occupant.course_id) {
            course_ids.push(occupant.course_id);
        }
    }
    ConflictCell {
        day: key.day,
        slot: key.slot,
        course_ids,
        occupant_count: occupants.len(),
    }
}

/// Scans every layout cell in layout order, then any occupied cell outside
/// the layout, and returns all cells with more than one occupant.
pub fn report(grid: &Grid, layout: &TimetableLayout) -> ConflictReport {
    let mut cells = Vec::new();
    let mut visited: BTreeSet<CellKey> = BTreeSet::new();

    for (day, slot) in layout.cells() {
        let key = CellKey::new(day, slot);
        visited.insert(key);
        let occupants = grid.occupants(day, &slot);
        if occupants.len() > 1 {
            cells.push(conflict_cell(&key, occupants));
        }
    }
    for (key, occupants) in grid.cells() {
        if !visited.contains(key) && occupants.len() > 1 {
            cells.push(conflict_cell(key, occupants));
        }
    }

    let mut course_has_conflict: BTreeMap<i32, bool> = BTreeMap::new();
    for (_, occupants) in grid.cells() {
        for occupant in occupants {
            course_has_conflict.entry(occupant.course_id).or_insert(false);
        }
    }
    for cell in &cells {
        for id in &cell.course_ids {
            course_has_conflict.insert(*id, true);
        }
    }

    ConflictReport {
        cells,
        course_has_conflict,
    }
}

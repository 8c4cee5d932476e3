use crate::entry::{ScheduleEntry, TimeSlot};
use chrono::Weekday;
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A schedule entry attributed to the enrolled course it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedScheduleEntry {
    pub course_id: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub course_code: String,
    pub course_ects: u32,
    pub enrolled_name: String,
    pub entry: ScheduleEntry,
}

impl MatchedScheduleEntry {
    pub fn cell(&self) -> CellKey {
        CellKey::new(self.entry.day, self.entry.slot)
    }
}

/// Grid address. Ordered Monday first, then by slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub day: Weekday,
    pub slot: TimeSlot,
}

impl CellKey {
    pub fn new(day: Weekday, slot: TimeSlot) -> Self {
        Self { day, slot }
    }
}

impl Ord for CellKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.day
            .num_days_from_monday()
            .cmp(&other.day.num_days_from_monday())
            .then_with(|| self.slot.cmp(&other.slot))
    }
}

impl PartialOrd for CellKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Occupants of every `(day, slot)` cell. Built once per run and never
/// edited afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: BTreeMap<CellKey, Vec<MatchedScheduleEntry>>,
}

impl Grid {
    /// Places matches on the grid in input order. Identical rows are kept
    /// as separate occupants.
    pub fn assemble<I>(matches: I) -> Self
    where
        I: IntoIterator<Item = MatchedScheduleEntry>,
    {
        let mut cells: BTreeMap<CellKey, Vec<MatchedScheduleEntry>> = BTreeMap::new();
        for matched in matches {
            cells.entry(matched.cell()).or_default().push(matched);
        }
        Self { cells }
    }

    pub fn occupants(&self, day: Weekday, slot: &TimeSlot) -> &[MatchedScheduleEntry] {
        self.cells
            .get(&CellKey::new(day, *slot))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Occupied cells in key order.
    pub fn cells(&self) -> impl Iterator<Item = (&CellKey, &[MatchedScheduleEntry])> {
        self.cells.iter().map(|(key, entries)| (key, entries.as_slice()))
    }

    pub fn occupied_cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn entry_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Convenience wrapper over [`Grid::assemble`].
pub fn assemble(matches: Vec<MatchedScheduleEntry>) -> Grid {
    Grid::assemble(matches)
}

struct CellView<'a> {
    key: &'a CellKey,
    entries: &'a [MatchedScheduleEntry],
}

impl Serialize for CellView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Cell", 3)?;
        state.serialize_field("day", &self.key.day)?;
        state.serialize_field("slot", &self.key.slot)?;
        state.serialize_field("entries", self.entries)?;
        state.end()
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.cells
                .iter()
                .map(|(key, entries)| CellView { key, entries }),
        )
    }
}

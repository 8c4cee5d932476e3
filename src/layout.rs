use crate::entry::TimeSlot;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The fixed day list and slot list the timetable is displayed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableLayout {
    days: Vec<Weekday>,
    slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableLayoutConfig {
    days: Vec<Weekday>,
    slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    NoDays,
    NoSlots,
    DuplicateDay(Weekday),
    DuplicateSlot(TimeSlot),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NoDays => write!(f, "timetable layout requires at least one day"),
            LayoutError::NoSlots => write!(f, "timetable layout requires at least one time slot"),
            LayoutError::DuplicateDay(day) => write!(f, "day {day} listed more than once"),
            LayoutError::DuplicateSlot(slot) => write!(f, "slot {slot} listed more than once"),
        }
    }
}

impl std::error::Error for LayoutError {}

impl Default for TimetableLayout {
    fn default() -> Self {
        Self {
            days: Self::WEEKDAYS.to_vec(),
            slots: TimeSlot::hourly(Self::FIRST_HOUR, Self::LAST_HOUR),
        }
    }
}

impl TimetableLayout {
    const WEEKDAYS: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];
    const FIRST_HOUR: u32 = 9;
    const LAST_HOUR: u32 = 20;

    pub fn custom<I, J>(days: I, slots: J) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = TimeSlot>,
    {
        let config = TimetableLayoutConfig::new(days, slots);
        Self::from_config(&config)
    }

    pub fn from_config(config: &TimetableLayoutConfig) -> Result<Self, LayoutError> {
        if config.days.is_empty() {
            return Err(LayoutError::NoDays);
        }
        if config.slots.is_empty() {
            return Err(LayoutError::NoSlots);
        }
        let mut seen_days = HashSet::with_capacity(config.days.len());
        for day in &config.days {
            if !seen_days.insert(*day) {
                return Err(LayoutError::DuplicateDay(*day));
            }
        }
        let mut seen_slots = HashSet::with_capacity(config.slots.len());
        for slot in &config.slots {
            if !seen_slots.insert(*slot) {
                return Err(LayoutError::DuplicateSlot(*slot));
            }
        }
        Ok(Self {
            days: config.days.clone(),
            slots: config.slots.clone(),
        })
    }

    pub fn to_config(&self) -> TimetableLayoutConfig {
        TimetableLayoutConfig::from(self)
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn contains(&self, day: Weekday, slot: &TimeSlot) -> bool {
        self.days.contains(&day) && self.slots.contains(slot)
    }

    /// Every `(day, slot)` cell, day-major, in layout order.
    pub fn cells(&self) -> impl Iterator<Item = (Weekday, TimeSlot)> + '_ {
        self.days
            .iter()
            .flat_map(move |day| self.slots.iter().map(move |slot| (*day, *slot)))
    }
}

impl TimetableLayoutConfig {
    pub fn new<I, J>(days: I, slots: J) -> Self
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = TimeSlot>,
    {
        Self {
            days: days.into_iter().collect(),
            slots: slots.into_iter().collect(),
        }
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }
}

impl Default for TimetableLayoutConfig {
    fn default() -> Self {
        TimetableLayout::default().to_config()
    }
}

impl From<&TimetableLayout> for TimetableLayoutConfig {
    fn from(layout: &TimetableLayout) -> Self {
        Self {
            days: layout.days.clone(),
            slots: layout.slots.clone(),
        }
    }
}

use super::normalize::{GroupMarker, markers_in};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Even/odd classification of the student identifier, selecting which of
/// two group variants of a course the student attends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn from_identifier(identifier: i64) -> Self {
        if identifier.rem_euclid(2) == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    /// Parity for an identifier that may not be set yet.
    pub fn from_optional_identifier(identifier: Option<i64>) -> Option<Self> {
        identifier.map(Self::from_identifier)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Parity::Even => "even",
            Parity::Odd => "odd",
        }
    }

    fn marker(&self) -> GroupMarker {
        match self {
            Parity::Even => GroupMarker::Even,
            Parity::Odd => GroupMarker::Odd,
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for an optional parity, `unset` when the identifier is unknown.
pub fn parity_label(parity: Option<Parity>) -> &'static str {
    parity.map(|p| p.as_str()).unwrap_or("unset")
}

/// Outcome of the group check, distinguishing exclusions caused by an
/// unknown parity from ordinary wrong-group exclusions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// The entry carries no group marker.
    AllGroups,
    /// The entry is marked for the student's group.
    OwnGroup,
    /// The entry is marked for the other group only.
    OtherGroup,
    /// The entry carries a marker but the student's parity is unknown.
    UnknownParity,
}

impl Applicability {
    pub fn is_applicable(&self) -> bool {
        matches!(self, Applicability::AllGroups | Applicability::OwnGroup)
    }
}

/// Classifies a raw (unnormalized) entry name against the student's parity.
///
/// With no parity every marker-bearing entry is excluded; picking a default
/// group would show sessions the student may not belong to.
pub fn applicability(entry_name: &str, parity: Option<Parity>) -> Applicability {
    let markers = markers_in(entry_name);
    if markers.is_empty() {
        return Applicability::AllGroups;
    }
    match parity {
        None => Applicability::UnknownParity,
        Some(parity) if markers.contains(parity.marker()) => Applicability::OwnGroup,
        Some(_) => Applicability::OtherGroup,
    }
}

pub fn is_applicable(entry_name: &str, parity: Option<Parity>) -> bool {
    applicability(entry_name, parity).is_applicable()
}

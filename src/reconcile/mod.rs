pub mod conflict;
pub mod grid;
pub mod matcher;
pub mod normalize;
pub mod parity;

pub use conflict::{ConflictCell, ConflictReport, report};
pub use grid::{CellKey, Grid, MatchedScheduleEntry, assemble};
pub use matcher::{CandidateSet, MatchRule, Matcher, NameKey, match_entries};
pub use normalize::{GroupMarker, display_name, markers_in, normalize};
pub use parity::{Applicability, Parity, applicability, is_applicable, parity_label};

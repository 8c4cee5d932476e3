//! Course-name canonicalization.
//!
//! The schedule feed and the course store spell the same course differently:
//! accented or unaccented Greek, Latin letters typed in place of Greek
//! capitals (`K16` vs `Κ16`), group markers such as `(Άρτιοι)`, stray
//! whitespace. [`normalize`] maps all of these onto one comparable form.

use once_cell::sync::Lazy;

/// Why a character is folded. Kept on every table row so the table can be
/// audited per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldKind {
    /// Greek vowel carrying tonos or dialytika.
    Accent,
    /// Greek letter drawn like a Latin capital.
    Homoglyph,
    /// Word-final sigma.
    FinalSigma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldRule {
    pub from: char,
    pub to: char,
    pub kind: FoldKind,
}

const fn rule(from: char, to: char, kind: FoldKind) -> FoldRule {
    FoldRule { from, to, kind }
}

/// Substitutions applied after lowercasing. Every row maps straight to its
/// final character, so a single pass never needs a second lookup.
pub const FOLD_TABLE: &[FoldRule] = &[
    rule('ά', 'a', FoldKind::Accent),
    rule('έ', 'e', FoldKind::Accent),
    rule('ή', 'h', FoldKind::Accent),
    rule('ί', 'i', FoldKind::Accent),
    rule('ϊ', 'i', FoldKind::Accent),
    rule('ΐ', 'i', FoldKind::Accent),
    rule('ό', 'o', FoldKind::Accent),
    rule('ύ', 'y', FoldKind::Accent),
    rule('ϋ', 'y', FoldKind::Accent),
    rule('ΰ', 'y', FoldKind::Accent),
    rule('ώ', 'ω', FoldKind::Accent),
    rule('α', 'a', FoldKind::Homoglyph),
    rule('β', 'b', FoldKind::Homoglyph),
    rule('ε', 'e', FoldKind::Homoglyph),
    rule('ζ', 'z', FoldKind::Homoglyph),
    rule('η', 'h', FoldKind::Homoglyph),
    rule('ι', 'i', FoldKind::Homoglyph),
    rule('κ', 'k', FoldKind::Homoglyph),
    rule('μ', 'm', FoldKind::Homoglyph),
    rule('ν', 'n', FoldKind::Homoglyph),
    rule('ο', 'o', FoldKind::Homoglyph),
    rule('ρ', 'p', FoldKind::Homoglyph),
    rule('τ', 't', FoldKind::Homoglyph),
    rule('υ', 'y', FoldKind::Homoglyph),
    rule('χ', 'x', FoldKind::Homoglyph),
    rule('ς', 'σ', FoldKind::FinalSigma),
];

/// Parity group a schedule entry is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupMarker {
    Even,
    Odd,
}

const MARKER_SPELLINGS: &[(&str, GroupMarker)] = &[
    ("άρτιοι", GroupMarker::Even),
    ("αρτιοι", GroupMarker::Even),
    ("even", GroupMarker::Even),
    ("περιττοί", GroupMarker::Odd),
    ("περιττοι", GroupMarker::Odd),
    ("odd", GroupMarker::Odd),
];

static FOLDED_MARKERS: Lazy<Vec<(String, GroupMarker)>> = Lazy::new(|| {
    MARKER_SPELLINGS
        .iter()
        .map(|(spelling, marker)| (fold_name(spelling), *marker))
        .collect()
});

/// Which markers a name carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerSet {
    pub even: bool,
    pub odd: bool,
}

impl MarkerSet {
    pub fn is_empty(&self) -> bool {
        !self.even && !self.odd
    }

    pub fn contains(&self, marker: GroupMarker) -> bool {
        match marker {
            GroupMarker::Even => self.even,
            GroupMarker::Odd => self.odd,
        }
    }

    fn insert(&mut self, marker: GroupMarker) {
        match marker {
            GroupMarker::Even => self.even = true,
            GroupMarker::Odd => self.odd = true,
        }
    }
}

fn fold_char(c: char) -> Option<char> {
    if is_combining_mark(c) {
        return None;
    }
    let folded = FOLD_TABLE
        .iter()
        .find(|rule| rule.from == c)
        .map(|rule| rule.to)
        .unwrap_or(c);
    Some(folded)
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Lowercases and applies [`FOLD_TABLE`]. Whitespace and markers are left
/// untouched.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase().chars().filter_map(fold_char).collect()
}

/// Separates parentheses from the words they wrap so `X(Άρτιοι)` and
/// `X (Άρτιοι)` tokenize the same way.
fn pad_parentheses(name: &str) -> String {
    let mut padded = String::with_capacity(name.len() + 8);
    for c in name.chars() {
        match c {
            '(' => padded.push_str(" ("),
            ')' => padded.push_str(") "),
            other => padded.push(other),
        }
    }
    padded
}

fn token_core(token: &str) -> &str {
    token.trim_matches(|c| c == '(' || c == ')')
}

fn marker_for_folded(core: &str) -> Option<GroupMarker> {
    FOLDED_MARKERS
        .iter()
        .find(|(spelling, _)| spelling == core)
        .map(|(_, marker)| *marker)
}

/// True when the token is a group marker (bare or parenthesized) or nothing
/// but parentheses.
fn is_droppable(folded_token: &str) -> bool {
    let core = token_core(folded_token);
    core.is_empty() || marker_for_folded(core).is_some()
}

/// Group markers present in a raw, unnormalized name.
pub fn markers_in(name: &str) -> MarkerSet {
    let folded = pad_parentheses(&fold_name(name));
    let mut set = MarkerSet::default();
    for token in folded.split_whitespace() {
        if let Some(marker) = marker_for_folded(token_core(token)) {
            set.insert(marker);
        }
    }
    set
}

/// Canonical comparison form of a course name: lowercased, folded, group
/// markers removed, single-spaced and trimmed. Idempotent.
pub fn normalize(name: &str) -> String {
    let folded = pad_parentheses(&fold_name(name));
    folded
        .split_whitespace()
        .filter(|token| !is_droppable(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The name with group markers removed, keeping its original script and
/// casing. Used when rendering grid cells.
pub fn display_name(name: &str) -> String {
    pad_parentheses(name)
        .split_whitespace()
        .filter(|token| !is_droppable(&fold_name(token)))
        .collect::<Vec<_>>()
        .join(" ")
}

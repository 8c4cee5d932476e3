use super::normalize::normalize;
use crate::config::MatchThresholds;
use crate::entry::ScheduleEntry;

/// Which rule accepted a candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchRule {
    Exact,
    Containment,
    TokenOverlap { common: usize, ratio: f64 },
}

/// A normalized name with its significant words precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameKey {
    normalized: String,
    tokens: Vec<String>,
}

impl NameKey {
    pub fn new(name: &str, thresholds: &MatchThresholds) -> Self {
        Self::from_normalized(normalize(name), thresholds)
    }

    fn from_normalized(normalized: String, thresholds: &MatchThresholds) -> Self {
        let mut tokens: Vec<String> = Vec::new();
        for word in normalized.split_whitespace() {
            if word.chars().count() > thresholds.min_token_chars
                && !tokens.iter().any(|seen| seen == word)
            {
                tokens.push(word.to_string());
            }
        }
        Self { normalized, tokens }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Candidate entries with their names normalized once, so matching many
/// courses against one feed does not re-normalize the feed per course.
#[derive(Debug, Clone)]
pub struct CandidateSet<'e> {
    candidates: Vec<(&'e ScheduleEntry, NameKey)>,
}

impl<'e> CandidateSet<'e> {
    pub fn new<I>(entries: I, thresholds: &MatchThresholds) -> Self
    where
        I: IntoIterator<Item = &'e ScheduleEntry>,
    {
        let candidates = entries
            .into_iter()
            .map(|entry| (entry, NameKey::new(&entry.course_name, thresholds)))
            .collect();
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    thresholds: MatchThresholds,
}

impl Matcher {
    pub fn new(thresholds: MatchThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &MatchThresholds {
        &self.thresholds
    }

    pub fn key(&self, name: &str) -> NameKey {
        NameKey::new(name, &self.thresholds)
    }

    /// Decides whether two prepared names denote the same course.
    pub fn compare(&self, course: &NameKey, candidate: &NameKey) -> Option<MatchRule> {
        let a = course.normalized();
        let b = candidate.normalized();
        if a.is_empty() || b.is_empty() {
            return None;
        }
        if a == b {
            return Some(MatchRule::Exact);
        }
        if a.contains(b) || b.contains(a) {
            return Some(MatchRule::Containment);
        }
        self.token_overlap(course.tokens(), candidate.tokens())
    }

    fn token_overlap(&self, course: &[String], candidate: &[String]) -> Option<MatchRule> {
        if course.is_empty() || candidate.is_empty() {
            return None;
        }
        let partial = self.thresholds.min_partial_token_chars;
        let common = course
            .iter()
            .filter(|word| {
                let word_len = word.chars().count();
                candidate.iter().any(|other| {
                    other == *word
                        || (word_len > partial && other.contains(word.as_str()))
                        || (other.chars().count() > partial && word.contains(other.as_str()))
                })
            })
            .count();
        let ratio = common as f64 / course.len().min(candidate.len()) as f64;
        if ratio >= self.thresholds.min_overlap_ratio && common >= self.thresholds.min_common_tokens
        {
            Some(MatchRule::TokenOverlap { common, ratio })
        } else {
            None
        }
    }

    /// Every prepared candidate matching the course, in feed order, with the
    /// rule that accepted it.
    pub fn match_prepared<'e>(
        &self,
        course: &NameKey,
        candidates: &CandidateSet<'e>,
    ) -> Vec<(&'e ScheduleEntry, MatchRule)> {
        candidates
            .candidates
            .iter()
            .filter_map(|(entry, key)| self.compare(course, key).map(|rule| (*entry, rule)))
            .collect()
    }

    /// Every candidate denoting the same course as `course_name`, in input
    /// order. One course may own several sessions (lecture, lab, tutorial).
    pub fn match_entries<'e>(
        &self,
        course_name: &str,
        candidates: &'e [ScheduleEntry],
    ) -> Vec<&'e ScheduleEntry> {
        let course = self.key(course_name);
        let prepared = CandidateSet::new(candidates, &self.thresholds);
        self.match_prepared(&course, &prepared)
            .into_iter()
            .map(|(entry, _)| entry)
            .collect()
    }
}

/// [`Matcher::match_entries`] with the default thresholds.
pub fn match_entries<'e>(course_name: &str, candidates: &'e [ScheduleEntry]) -> Vec<&'e ScheduleEntry> {
    Matcher::default().match_entries(course_name, candidates)
}

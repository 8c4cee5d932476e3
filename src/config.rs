use crate::layout::TimetableLayoutConfig;
use serde::{Deserialize, Serialize};

/// Words of this many characters or fewer are ignored by token overlap.
pub const MIN_TOKEN_CHARS: usize = 3;
/// A word must be longer than this to count as a partial (substring) match.
pub const MIN_PARTIAL_TOKEN_CHARS: usize = 4;
/// Share of the shorter name's words that must be common.
pub const MIN_OVERLAP_RATIO: f64 = 0.7;
/// Absolute number of common words required.
pub const MIN_COMMON_TOKENS: usize = 2;

/// Policy constants for the token-overlap rule of the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    pub min_token_chars: usize,
    pub min_partial_token_chars: usize,
    pub min_overlap_ratio: f64,
    pub min_common_tokens: usize,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            min_token_chars: MIN_TOKEN_CHARS,
            min_partial_token_chars: MIN_PARTIAL_TOKEN_CHARS,
            min_overlap_ratio: MIN_OVERLAP_RATIO,
            min_common_tokens: MIN_COMMON_TOKENS,
        }
    }
}

impl MatchThresholds {
    pub fn validate(&self) -> Result<(), String> {
        if !self.min_overlap_ratio.is_finite()
            || self.min_overlap_ratio < 0.0
            || self.min_overlap_ratio > 1.0
        {
            return Err(format!(
                "min_overlap_ratio must be between 0 and 1 (got {})",
                self.min_overlap_ratio
            ));
        }
        if self.min_common_tokens == 0 {
            return Err("min_common_tokens must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Everything tunable about a reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: TimetableLayoutConfig,
    pub thresholds: MatchThresholds,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"thresholds": {"min_overlap_ratio": 0.8}}"#).unwrap();
        assert_eq!(config.thresholds.min_overlap_ratio, 0.8);
        assert_eq!(config.thresholds.min_common_tokens, MIN_COMMON_TOKENS);
        assert_eq!(config.layout, TimetableLayoutConfig::default());
    }

    #[test]
    fn thresholds_reject_out_of_range_ratio() {
        let thresholds = MatchThresholds {
            min_overlap_ratio: 1.5,
            ..MatchThresholds::default()
        };
        assert!(thresholds.validate().is_err());
        assert!(MatchThresholds::default().validate().is_ok());
    }
}

use crate::error::{Result, ScoringError};
use serde::Deserialize;

pub(crate) const DEFAULT_SIMILARITY_THRESHOLD: f64 = 100.0;

const DEFAULT_COLOR_WEIGHT: f64 = 0.7;
const DEFAULT_STYLE_WEIGHT: f64 = 0.3;
const DEFAULT_NEUTRAL_STYLE_SCORE: f64 = 50.0;
const DEFAULT_TOP_N: usize = 12;
const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Knobs for the ranking pipeline.
///
/// Defaults reproduce the storefront behavior: color dominates at 70/30,
/// similarity cuts off at RGB distance 100, and twelve matches come back.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    pub color: f64,
    pub style: f64,
    pub similarity_threshold: f64,
    pub neutral_style_score: f64,
    pub top_n: usize,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR_WEIGHT,
            style: DEFAULT_STYLE_WEIGHT,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            neutral_style_score: DEFAULT_NEUTRAL_STYLE_SCORE,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ScoreWeights {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let weights: Self = serde_json::from_slice(bytes)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Blended scores stay in [0, 100] as long as the two weights are
    /// non-negative and sum to 1.
    pub fn validate(&self) -> Result<()> {
        if self.color < 0.0 || self.style < 0.0 {
            return Err(ScoringError::InvalidWeights(
                "color and style weights must be non-negative".to_string(),
            ));
        }
        if (self.color + self.style - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(ScoringError::InvalidWeights(format!(
                "color ({}) and style ({}) weights must sum to 1.0",
                self.color, self.style
            )));
        }
        if self.similarity_threshold <= 0.0 {
            return Err(ScoringError::InvalidWeights(
                "similarity_threshold must be positive".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.neutral_style_score) {
            return Err(ScoringError::InvalidWeights(
                "neutral_style_score must be in [0, 100]".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(ScoringError::InvalidWeights(
                "top_n must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

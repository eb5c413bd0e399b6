mod color;
mod error;
mod rank;
mod weights;

pub use color::{colors_similar, Rgb};
pub use error::{Result, ScoringError};
pub use rank::{color_match, rank_candidates, style_match, Candidate, ScoredCandidate};
pub use weights::ScoreWeights;

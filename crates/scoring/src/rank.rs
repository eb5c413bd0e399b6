use crate::color::similar_within;
use crate::weights::ScoreWeights;
use std::cmp::Ordering;

/// A product being scored against a reference color/style profile.
/// Read-only input to a scoring run.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub id: String,
    /// Union of the product's variant colors, as hex strings.
    pub colors: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ScoredCandidate {
    /// Position of this candidate in the input sequence, so callers can
    /// reach whatever record the candidate was built from without a second
    /// lookup.
    pub idx: usize,
    pub candidate: Candidate,
    pub color_score: f64,
    pub style_score: f64,
    pub match_score: f64,
}

/// Fraction of reference colors with at least one similar candidate color,
/// as a percentage in [0, 100].
///
/// A candidate with no variant colors scores 0. An empty reference also
/// scores 0 rather than dividing by zero: a palette that extracted nothing
/// expresses no color preference a candidate could satisfy.
pub fn color_match(
    reference: &[String],
    candidate_colors: &[String],
    weights: &ScoreWeights,
) -> f64 {
    if reference.is_empty() || candidate_colors.is_empty() {
        return 0.0;
    }

    let matched = reference
        .iter()
        .filter(|wanted| {
            candidate_colors
                .iter()
                .any(|have| similar_within(wanted, have, weights.similarity_threshold))
        })
        .count();

    matched as f64 / reference.len() as f64 * 100.0
}

/// Fraction of user styles contained case-insensitively in any candidate
/// tag, as a percentage in [0, 100].
///
/// No expressed preferences yields the neutral score, so untagged requests
/// neither reward nor penalize any candidate.
pub fn style_match(
    user_styles: &[String],
    candidate_tags: &[String],
    weights: &ScoreWeights,
) -> f64 {
    if user_styles.is_empty() {
        return weights.neutral_style_score;
    }

    let tags: Vec<String> = candidate_tags.iter().map(|t| t.to_lowercase()).collect();
    let matched = user_styles
        .iter()
        .filter(|style| {
            let style = style.to_lowercase();
            tags.iter().any(|tag| tag.contains(&style))
        })
        .count();

    matched as f64 / user_styles.len() as f64 * 100.0
}

/// Scores every candidate and returns the best `top_n`, highest blended
/// score first.
///
/// Pure and synchronous: no I/O, no hidden state, identical inputs yield
/// identical output. The sort is stable, so candidates with equal scores
/// keep their input order and results are reproducible.
pub fn rank_candidates(
    weights: &ScoreWeights,
    reference: &[String],
    user_styles: &[String],
    candidates: Vec<Candidate>,
) -> Vec<ScoredCandidate> {
    let total = candidates.len();
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .enumerate()
        .map(|(idx, candidate)| {
            let color_score = color_match(reference, &candidate.colors, weights);
            let style_score = style_match(user_styles, &candidate.tags, weights);
            let match_score = weights.color * color_score + weights.style * style_score;
            ScoredCandidate {
                idx,
                candidate,
                color_score,
                style_score,
                match_score,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(weights.top_n);

    log::debug!("Ranked {} candidates, kept {}", total, scored.len());
    scored
}

//! Score normalization
//!
//! The evaluator has produced scores on both a 0-5 and a 0-10 scale over
//! time, and the payload does not say which. Anything above 5 is taken to be
//! on the 0-10 scale and halved; everything else is already canonical.
//!
//! The threshold is strictly `> 5`: a raw `5.0` stays `5.0` while `5.1`
//! becomes `2.55`. Callers rely on this exact cut-over.

use serde::Serialize;

use crate::domain::evaluation::Evaluation;

/// Upper bound of the canonical scale
pub const CANONICAL_MAX: f64 = 5.0;

/// Map a raw score of unknown scale onto the canonical 0-5 scale
///
/// A missing score maps to `0.0`; callers that need to tell "no score yet"
/// apart from a real zero must check for `None` before calling this.
pub fn normalize(raw: Option<f64>) -> f64 {
    match raw {
        None => 0.0,
        Some(value) if value > CANONICAL_MAX => (value / 2.0).min(CANONICAL_MAX),
        Some(value) => value,
    }
}

/// Evaluation scores on the canonical scale
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    /// `None` until the backend has produced an overall score
    pub overall: Option<f64>,
    pub technical_depth: f64,
    pub system_design: f64,
    pub tradeoff: f64,
    pub ownership: f64,
    pub feedback: Option<String>,
}

impl Scorecard {
    /// Build a scorecard from an evaluation payload
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        Self {
            overall: evaluation.overallscore.map(|raw| normalize(Some(raw))),
            technical_depth: normalize(evaluation.technical_depth),
            system_design: normalize(evaluation.system_design),
            tradeoff: normalize(evaluation.tradeoff),
            ownership: normalize(evaluation.ownership),
            feedback: evaluation.feedback_summary.clone(),
        }
    }

    /// Sub-scores with their display labels, in display order
    pub fn breakdown(&self) -> [(&'static str, f64); 4] {
        [
            ("Technical depth", self.technical_depth),
            ("System design", self.system_design),
            ("Trade-offs", self.tradeoff),
            ("Ownership", self.ownership),
        ]
    }
}

use serde::Serialize;

/// One score per registry index, produced by a single centrality run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CentralityResult {
    scores: Vec<f64>,
}

impl CentralityResult {
    #[must_use]
    pub const fn new(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    #[must_use]
    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary::from_scores(&self.scores)
    }
}

/// Distribution summary of one centrality vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Nodes that reach nothing under the chosen mode.
    pub zero_count: usize,
}

impl ScoreSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self {
                count: 0,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                zero_count: 0,
            };
        }

        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        let zero_count = scores.iter().filter(|&&s| s == 0.0).count();

        Self {
            count: scores.len(),
            min,
            max,
            mean,
            zero_count,
        }
    }
}

//! AI analysis result

use serde::{Deserialize, Serialize};

/// Server-side AI assessment of a submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiAnalysis {
    /// Lowercase verdict suggested by the model (`true`, `false`, `misleading`, ...)
    pub suggested_verdict: String,
    /// Confidence in `0.0..=1.0`
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub evidence_sources: Vec<String>,
    #[serde(default)]
    pub similar_claims: Vec<String>,
    #[serde(default)]
    pub ai_model_used: Option<String>,
    /// Seconds spent on the analysis
    #[serde(default)]
    pub processing_time: Option<f64>,
}

impl AiAnalysis {
    /// Verdict with its first letter capitalised
    pub fn verdict_label(&self) -> String {
        let mut chars = self.suggested_verdict.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Confidence as a percentage with one decimal, e.g. `"87.5%"`
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence_score * 100.0)
    }

    pub fn footer(&self) -> String {
        format!(
            "Analyzed with {} in {:.2}s",
            self.ai_model_used.as_deref().unwrap_or("unknown model"),
            self.processing_time.unwrap_or(0.0)
        )
    }
}

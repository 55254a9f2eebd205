//! Fact-check records
//!
//! Published, admin-authored verdicts on claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forms::ValidationError;

/// Fixed verdict scale, serialized with its display strings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Verdict {
    #[serde(rename = "True")]
    True,
    #[serde(rename = "Mostly True")]
    MostlyTrue,
    #[serde(rename = "Mixture")]
    Mixture,
    #[serde(rename = "Mostly False")]
    MostlyFalse,
    #[serde(rename = "False")]
    False,
    #[serde(rename = "Unverifiable")]
    Unverifiable,
}

impl Verdict {
    pub fn all() -> &'static [Verdict] {
        &[
            Verdict::True,
            Verdict::MostlyTrue,
            Verdict::Mixture,
            Verdict::MostlyFalse,
            Verdict::False,
            Verdict::Unverifiable,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "True",
            Verdict::MostlyTrue => "Mostly True",
            Verdict::Mixture => "Mixture",
            Verdict::MostlyFalse => "Mostly False",
            Verdict::False => "False",
            Verdict::Unverifiable => "Unverifiable",
        }
    }

    /// Coarse tone used for badge colouring
    pub fn tone(&self) -> Tone {
        match self {
            Verdict::True | Verdict::MostlyTrue => Tone::Positive,
            Verdict::Mixture => Tone::Mixed,
            Verdict::MostlyFalse | Verdict::False => Tone::Negative,
            Verdict::Unverifiable => Tone::Neutral,
        }
    }
}

/// Badge tone for a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Mixed,
    Negative,
    Neutral,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verdict::all()
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown verdict '{}'", s))
    }
}

/// A published fact-check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactCheck {
    pub id: i64,
    pub title: String,
    pub verdict: Verdict,
    #[serde(default)]
    pub verdict_display: Option<String>,
    #[serde(default)]
    pub summary: String,
    /// Source URL of the claim
    #[serde(default)]
    pub url_submitted: Option<String>,
    pub date_created: DateTime<Utc>,
    #[serde(default)]
    pub date_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_recent: bool,
}

impl FactCheck {
    pub fn verdict_label(&self) -> &str {
        self.verdict_display
            .as_deref()
            .unwrap_or_else(|| self.verdict.as_str())
    }

    /// Editable copy of this record
    pub fn to_draft(&self) -> FactCheckDraft {
        FactCheckDraft {
            title: self.title.clone(),
            url_submitted: self.url_submitted.clone().unwrap_or_default(),
            verdict: self.verdict,
            summary: self.summary.clone(),
        }
    }
}

/// Minimal fact-check reference embedded in submissions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactCheckRef {
    pub id: i64,
    pub title: String,
    pub verdict: Verdict,
}

/// Body for creating or replacing a fact-check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactCheckDraft {
    pub title: String,
    #[serde(default)]
    pub url_submitted: String,
    pub verdict: Verdict,
    pub summary: String,
}

impl Default for FactCheckDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            url_submitted: String::new(),
            verdict: Verdict::True,
            summary: String::new(),
        }
    }
}

impl FactCheckDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Required("Title"));
        }
        if self.summary.trim().is_empty() {
            return Err(ValidationError::Required("Summary"));
        }
        Ok(())
    }
}

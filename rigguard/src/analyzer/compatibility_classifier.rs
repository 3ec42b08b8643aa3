//! Compatibility Classifier
//!
//! Classifies a single candidate part against a partial build. The candidate is
//! overlaid on a copy of the build, the full rule set runs on that derived
//! build, and only the issues relevant to the candidate decide the verdict.
//!
//! Relevance is decided in one of two ways:
//!
//! - [`RelevanceMode::Heuristic`] (default): an issue is relevant when its
//!   message mentions the category name or the candidate's display name,
//!   ignoring case. Issues that only mention a different part are not
//!   attributed to the candidate, and a candidate whose name shares a word
//!   with another part's message may pick up that issue.
//! - [`RelevanceMode::Structured`]: an issue is relevant when the candidate's
//!   category is listed in [`Issue::categories`]. This attributes power-supply
//!   shortfalls to every part that draws power.

use crate::analyzer::rules::{Issue, RulesEngine, Severity};
use crate::core::RigGuardError;
use crate::schema::{Build, Category, Component};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityLevel {
    Perfect,
    Good,
    Warning,
    Incompatible,
}

impl CompatibilityLevel {
    pub fn summary(&self) -> &'static str {
        match self {
            CompatibilityLevel::Perfect => "Fully compatible",
            CompatibilityLevel::Good => "Compatible",
            CompatibilityLevel::Warning => "Potential issues",
            CompatibilityLevel::Incompatible => "Not compatible",
        }
    }
}

/// Verdict for one (category, candidate) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub level: CompatibilityLevel,
    pub issues: Vec<Issue>,
    pub summary: String,
}

impl CompatibilityReport {
    fn new(level: CompatibilityLevel, issues: Vec<Issue>) -> Self {
        Self {
            level,
            issues,
            summary: level.summary().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelevanceMode {
    #[default]
    Heuristic,
    Structured,
}

#[derive(Debug, Clone, Default)]
pub struct ClassifyOptions {
    pub relevance: RelevanceMode,
}

pub struct CompatibilityClassifier {
    engine: RulesEngine,
    options: ClassifyOptions,
}

impl CompatibilityClassifier {
    pub fn new(options: ClassifyOptions) -> Self {
        Self::with_engine(RulesEngine::with_default_rules(), options)
    }

    pub fn with_engine(engine: RulesEngine, options: ClassifyOptions) -> Self {
        Self { engine, options }
    }

    /// Classify `candidate` as the selection for `category` in `build`.
    ///
    /// A candidate with a blank display name is rejected: under heuristic
    /// relevance it could never match an issue and would always come back
    /// as perfect.
    pub fn classify(
        &self,
        category: Category,
        candidate: &Component,
        build: &Build,
    ) -> Result<CompatibilityReport, RigGuardError> {
        if candidate.name.trim().is_empty() {
            tracing::warn!("Rejecting {} candidate '{}' without a display name", category, candidate.id);
            return Err(RigGuardError::InvalidCandidate(format!(
                "{} candidate '{}' has no display name",
                category, candidate.id
            )));
        }

        let derived = build.overlay(category, candidate);
        let relevant: Vec<Issue> = self
            .engine
            .analyze(&derived)
            .into_iter()
            .filter(|issue| self.is_relevant(issue, category, candidate))
            .collect();

        let report = if relevant.is_empty() {
            CompatibilityReport::new(CompatibilityLevel::Perfect, Vec::new())
        } else if relevant.iter().any(|i| i.severity == Severity::Error) {
            CompatibilityReport::new(CompatibilityLevel::Incompatible, relevant)
        } else if relevant.iter().any(|i| i.severity == Severity::Warning) {
            CompatibilityReport::new(CompatibilityLevel::Warning, relevant)
        } else {
            CompatibilityReport::new(CompatibilityLevel::Good, Vec::new())
        };

        tracing::debug!(
            "Classified {} candidate {} as {:?} ({} relevant issue(s))",
            category,
            candidate.id,
            report.level,
            report.issues.len()
        );
        Ok(report)
    }

    /// Classify every candidate independently, in parallel. Results keep the
    /// order of `candidates`.
    pub fn classify_all(
        &self,
        category: Category,
        candidates: &[Component],
        build: &Build,
    ) -> Vec<Result<CompatibilityReport, RigGuardError>> {
        candidates
            .par_iter()
            .map(|candidate| self.classify(category, candidate, build))
            .collect()
    }

    fn is_relevant(&self, issue: &Issue, category: Category, candidate: &Component) -> bool {
        match self.options.relevance {
            RelevanceMode::Heuristic => {
                let message = issue.message.to_lowercase();
                message.contains(&category.display_name().to_lowercase())
                    || message.contains(&candidate.name.trim().to_lowercase())
            }
            RelevanceMode::Structured => issue.categories.contains(&category),
        }
    }
}

impl Default for CompatibilityClassifier {
    fn default() -> Self {
        Self::new(ClassifyOptions::default())
    }
}

/// Classify with the default rule set and heuristic relevance.
pub fn classify(
    category: Category,
    candidate: &Component,
    build: &Build,
) -> Result<CompatibilityReport, RigGuardError> {
    CompatibilityClassifier::default().classify(category, candidate, build)
}

/// Parallel [`classify`] over a candidate list.
pub fn classify_all(
    category: Category,
    candidates: &[Component],
    build: &Build,
    options: ClassifyOptions,
) -> Vec<Result<CompatibilityReport, RigGuardError>> {
    CompatibilityClassifier::new(options).classify_all(category, candidates, build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summaries_match_levels() {
        assert_eq!(CompatibilityLevel::Perfect.summary(), "Fully compatible");
        assert_eq!(CompatibilityLevel::Good.summary(), "Compatible");
        assert_eq!(CompatibilityLevel::Warning.summary(), "Potential issues");
        assert_eq!(CompatibilityLevel::Incompatible.summary(), "Not compatible");
    }

    #[test]
    fn blank_name_is_rejected() {
        let candidate = Component::new("cpu-x", "   ");
        let result = classify(Category::Processor, &candidate, &Build::new());
        assert!(matches!(result, Err(RigGuardError::InvalidCandidate(_))));
    }

    #[test]
    fn heuristic_matches_candidate_name() {
        let classifier = CompatibilityClassifier::default();
        let issue = Issue {
            rule_id: "custom".to_string(),
            severity: Severity::Warning,
            message: "The Noctua NH-D15 blocks the first RAM slot".to_string(),
            categories: vec![],
            suggestion: None,
        };
        let candidate = Component::new("fan-1", "noctua nh-d15");
        assert!(classifier.is_relevant(&issue, Category::Headset, &candidate));
    }

    #[test]
    fn heuristic_ignores_surrounding_whitespace_in_name() {
        let classifier = CompatibilityClassifier::default();
        let issue = Issue {
            rule_id: "custom".to_string(),
            severity: Severity::Error,
            message: "The Noctua NH-D15 blocks the first RAM slot".to_string(),
            categories: vec![],
            suggestion: None,
        };
        let candidate = Component::new("fan-1", "  Noctua NH-D15 ");
        assert!(classifier.is_relevant(&issue, Category::Headset, &candidate));
    }
}

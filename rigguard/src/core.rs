//! Build-level checks and build-file loading shared by library users and the CLI.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analyzer::power::{estimate_wattage, recommended_psu_wattage};
use crate::analyzer::rules::{Issue, RulesEngine, Severity};
use crate::schema::{Build, Component};

#[derive(Debug, thiserror::Error)]
pub enum RigGuardError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid candidate: {0}")]
    InvalidCandidate(String),
}

impl From<serde_json::Error> for RigGuardError {
    fn from(e: serde_json::Error) -> Self {
        RigGuardError::Parse(e.to_string())
    }
}

/// Full evaluation of a build: issues, power budget and counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub issues: Vec<Issue>,
    pub estimated_wattage: u32,
    pub recommended_psu_wattage: u32,
    pub stats: BuildStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    pub errors: usize,
    pub warnings: usize,
}

impl BuildReport {
    pub fn has_errors(&self) -> bool {
        self.stats.errors > 0
    }

    pub fn total_issues(&self) -> usize {
        self.stats.errors + self.stats.warnings
    }
}

fn issues_to_stats(issues: &[Issue]) -> BuildStats {
    let mut stats = BuildStats::default();
    for i in issues {
        match i.severity {
            Severity::Error => stats.errors += 1,
            Severity::Warning => stats.warnings += 1,
        }
    }
    stats
}

pub struct RigGuardCore;

impl RigGuardCore {
    /// Evaluate every rule and the power budget for `build`.
    pub fn check_build(build: &Build) -> BuildReport {
        let issues = RulesEngine::with_default_rules().analyze(build);
        let stats = issues_to_stats(&issues);
        BuildReport {
            issues,
            estimated_wattage: estimate_wattage(build),
            recommended_psu_wattage: recommended_psu_wattage(build),
            stats,
        }
    }

    /// Read a JSON build file: an object keyed by category (`"graphics-card"`, ...).
    pub fn load_build(path: &Path) -> Result<Build, RigGuardError> {
        let contents = std::fs::read_to_string(path)?;
        let build: Build = serde_json::from_str(&contents)?;
        tracing::info!("Loaded build with {} parts from {}", build.len(), path.display());
        Ok(build)
    }

    /// Read a single JSON component record.
    pub fn load_component(path: &Path) -> Result<Component, RigGuardError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

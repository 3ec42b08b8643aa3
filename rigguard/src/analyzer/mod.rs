//! Compatibility and power-budget analysis over a [`Build`](crate::schema::Build).

pub mod compatibility_classifier;
pub mod power;
pub mod rules;

pub use compatibility_classifier::{
    classify, classify_all, ClassifyOptions, CompatibilityClassifier, CompatibilityLevel,
    CompatibilityReport, RelevanceMode,
};
pub use power::{estimate_wattage, recommended_psu_wattage};
pub use rules::{evaluate, Issue, Rule, RulesEngine, Severity};

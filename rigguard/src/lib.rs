//! RigGuard - compatibility and power-budget checks for custom PC builds
//!
//! Given the parts a shopper has picked so far, RigGuard reports physical and
//! electrical incompatibilities, estimates the total power draw, and grades a
//! single candidate part against the partial build so selection lists can flag
//! parts that would not fit.
//!
//! Every entry point is a pure function over an immutable [`Build`]: nothing is
//! persisted or fetched, and identical input always yields identical output.
//!
//! # Quick Start
//!
//! ```
//! use rigguard::{evaluate, estimate_wattage, Build, Category, Component, Severity};
//!
//! let build = Build::new()
//!     .with(Category::Processor, Component::new("cpu-1", "Ryzen 5 5600X").with_socket("AM4"))
//!     .with(Category::Motherboard, Component::new("mb-1", "Z790 Board").with_socket("LGA1700"));
//!
//! let issues = evaluate(&build);
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].severity, Severity::Error);
//! assert_eq!(estimate_wattage(&build), 60);
//! ```
//!
//! # Features
//!
//! - **Rule evaluation**: socket, memory type, form factor, GPU and cooler clearance, PSU margin
//! - **Power estimation**: TDP-based load with 20% headroom
//! - **Incremental classification**: perfect / good / warning / incompatible per candidate

pub mod analyzer;
pub mod core;
pub mod schema;

// Re-export main types
pub use analyzer::compatibility_classifier::{
    classify, classify_all, ClassifyOptions, CompatibilityClassifier, CompatibilityLevel,
    CompatibilityReport, RelevanceMode,
};
pub use analyzer::power::{estimate_wattage, recommended_psu_wattage};
pub use analyzer::rules::{evaluate, Issue, Rule, RulesEngine, Severity};
pub use crate::core::{BuildReport, BuildStats, RigGuardCore, RigGuardError};
pub use schema::{Build, Category, Component, UnknownCategory};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        classify, estimate_wattage, evaluate, Build, BuildReport, Category, ClassifyOptions,
        CompatibilityLevel, CompatibilityReport, Component, Issue, RigGuardCore, RigGuardError,
        Severity,
    };
}

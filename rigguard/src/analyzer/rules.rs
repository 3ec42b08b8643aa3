use crate::analyzer::power::{estimate_wattage, load_contributors, with_headroom};
use crate::schema::{Build, Category, Component};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    /// Categories whose selections take part in the violated constraint.
    pub categories: Vec<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Issue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

pub trait Rule: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn check(&self, build: &Build) -> Vec<Issue>;
}

/// Ordered list of independent rules. Every rule runs on every call; issues
/// are concatenated in rule order.
pub struct RulesEngine {
    rules: Vec<Arc<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Arc::new(SocketMatchRule));
        engine.add_rule(Arc::new(MemoryTypeRule));
        engine.add_rule(Arc::new(FormFactorRule));
        engine.add_rule(Arc::new(GpuClearanceRule));
        engine.add_rule(Arc::new(PowerSupplyMarginRule));
        engine.add_rule(Arc::new(CoolerClearanceRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Arc<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn analyze(&self, build: &Build) -> Vec<Issue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            let found = rule.check(build);
            if !found.is_empty() {
                tracing::trace!("Rule {} raised {} issue(s)", rule.id(), found.len());
            }
            issues.extend(found);
        }
        tracing::debug!(
            "Evaluated {} rules over {} selected parts: {} issue(s)",
            self.rules.len(),
            build.len(),
            issues.len()
        );
        issues
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

/// Run the default rule set over `build`.
pub fn evaluate(build: &Build) -> Vec<Issue> {
    RulesEngine::with_default_rules().analyze(build)
}

/// Motherboard form factor → case form factors that can hold it. A case fits
/// when its form-factor string contains any of the listed entries.
pub const FORM_FACTOR_FIT: &[(&str, &[&str])] = &[
    ("mini-itx", &["mini-itx", "micro-atx", "atx", "mid-tower", "full-tower"]),
    ("micro-atx", &["micro-atx", "atx", "mid-tower", "full-tower"]),
    ("atx", &["atx", "mid-tower", "full-tower"]),
    ("e-atx", &["full-tower", "e-atx"]),
];

pub fn case_fits_board(board_form_factor: &str, case_form_factor: &str) -> bool {
    let board = board_form_factor.to_lowercase();
    let case = case_form_factor.to_lowercase();
    FORM_FACTOR_FIT
        .iter()
        .find(|(key, _)| *key == board)
        .map(|(_, fits)| fits.iter().any(|f| case.contains(f)))
        .unwrap_or(false)
}

// Helper functions

/// Declared, non-blank string attribute.
fn declared(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn same_ignoring_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Strictly greater; NaN on either side never exceeds.
fn exceeds(measured: f64, limit: f64) -> bool {
    measured > limit
}

fn pair(build: &Build, a: Category, b: Category) -> Option<(&Component, &Component)> {
    Some((build.get(a)?, build.get(b)?))
}

// Rule implementations

pub struct SocketMatchRule;

impl Rule for SocketMatchRule {
    fn id(&self) -> &str {
        "socket_match"
    }

    fn name(&self) -> &str {
        "CPU Socket Check"
    }

    fn description(&self) -> &str {
        "Processor socket must match the motherboard socket"
    }

    fn check(&self, build: &Build) -> Vec<Issue> {
        let Some((cpu, board)) = pair(build, Category::Processor, Category::Motherboard) else {
            return Vec::new();
        };
        let (Some(cpu_socket), Some(board_socket)) = (declared(&cpu.socket), declared(&board.socket))
        else {
            return Vec::new();
        };
        if same_ignoring_case(cpu_socket, board_socket) {
            return Vec::new();
        }

        vec![Issue {
            rule_id: self.id().to_string(),
            severity: Severity::Error,
            message: format!(
                "Processor socket {} does not match Motherboard socket {}",
                cpu_socket, board_socket
            ),
            categories: vec![Category::Processor, Category::Motherboard],
            suggestion: Some(format!("Choose a {} processor or motherboard", board_socket)),
        }]
    }
}

pub struct MemoryTypeRule;

impl Rule for MemoryTypeRule {
    fn id(&self) -> &str {
        "memory_type"
    }

    fn name(&self) -> &str {
        "Memory Type Check"
    }

    fn description(&self) -> &str {
        "Memory generation must be supported by the motherboard"
    }

    fn check(&self, build: &Build) -> Vec<Issue> {
        let Some((memory, board)) = pair(build, Category::Memory, Category::Motherboard) else {
            return Vec::new();
        };
        let (Some(memory_type), Some(board_type)) =
            (declared(&memory.memory_type), declared(&board.memory_type))
        else {
            return Vec::new();
        };
        if same_ignoring_case(memory_type, board_type) {
            return Vec::new();
        }

        vec![Issue {
            rule_id: self.id().to_string(),
            severity: Severity::Error,
            message: format!(
                "Memory type {} is not supported by Motherboard ({})",
                memory_type, board_type
            ),
            categories: vec![Category::Memory, Category::Motherboard],
            suggestion: Some(format!("Use {} memory modules", board_type)),
        }]
    }
}

pub struct FormFactorRule;

impl Rule for FormFactorRule {
    fn id(&self) -> &str {
        "form_factor"
    }

    fn name(&self) -> &str {
        "Form Factor Check"
    }

    fn description(&self) -> &str {
        "Motherboard form factor must fit inside the case"
    }

    fn check(&self, build: &Build) -> Vec<Issue> {
        let Some((board, case)) = pair(build, Category::Motherboard, Category::Case) else {
            return Vec::new();
        };
        let (Some(board_ff), Some(case_ff)) =
            (declared(&board.form_factor), declared(&case.form_factor))
        else {
            return Vec::new();
        };
        if case_fits_board(board_ff, case_ff) {
            return Vec::new();
        }

        vec![Issue {
            rule_id: self.id().to_string(),
            severity: Severity::Error,
            message: format!(
                "Motherboard form factor {} does not fit in Case form factor {}",
                board_ff, case_ff
            ),
            categories: vec![Category::Motherboard, Category::Case],
            suggestion: Some("Choose a larger case or a smaller motherboard".to_string()),
        }]
    }
}

pub struct GpuClearanceRule;

impl Rule for GpuClearanceRule {
    fn id(&self) -> &str {
        "gpu_clearance"
    }

    fn name(&self) -> &str {
        "Graphics Card Clearance Check"
    }

    fn description(&self) -> &str {
        "Graphics card length must not exceed the case clearance"
    }

    fn check(&self, build: &Build) -> Vec<Issue> {
        let Some((gpu, case)) = pair(build, Category::GraphicsCard, Category::Case) else {
            return Vec::new();
        };
        let (Some(length), Some(max_length)) = (gpu.length_mm, case.max_gpu_length_mm) else {
            return Vec::new();
        };
        if !exceeds(length, max_length) {
            return Vec::new();
        }

        vec![Issue {
            rule_id: self.id().to_string(),
            severity: Severity::Error,
            message: format!(
                "Graphics Card length {}mm exceeds Case maximum of {}mm",
                length, max_length
            ),
            categories: vec![Category::GraphicsCard, Category::Case],
            suggestion: Some(format!(
                "Choose a graphics card no longer than {}mm or a larger case",
                max_length
            )),
        }]
    }
}

pub struct PowerSupplyMarginRule;

impl Rule for PowerSupplyMarginRule {
    fn id(&self) -> &str {
        "psu_margin"
    }

    fn name(&self) -> &str {
        "Power Supply Margin Check"
    }

    fn description(&self) -> &str {
        "Power supply rating must cover the estimated load with 20% headroom"
    }

    fn check(&self, build: &Build) -> Vec<Issue> {
        let Some(rated) = build.get(Category::PowerSupply).and_then(|p| p.wattage) else {
            return Vec::new();
        };
        let estimated = estimate_wattage(build);
        let recommended = with_headroom(estimated);

        let mut categories = vec![Category::PowerSupply];
        categories.extend(load_contributors(build));

        if rated < estimated {
            vec![Issue {
                rule_id: self.id().to_string(),
                severity: Severity::Error,
                message: format!(
                    "Power Supply {}W may be insufficient for the estimated {}W load",
                    rated, estimated
                ),
                categories,
                suggestion: Some(format!("Use a power supply rated {}W or higher", recommended)),
            }]
        } else if rated < recommended {
            vec![Issue {
                rule_id: self.id().to_string(),
                severity: Severity::Warning,
                message: format!(
                    "Power Supply {}W leaves little headroom over the estimated {}W load; {}W recommended",
                    rated, estimated, recommended
                ),
                categories,
                suggestion: Some(format!("Consider a {}W or higher power supply", recommended)),
            }]
        } else {
            Vec::new()
        }
    }
}

pub struct CoolerClearanceRule;

impl Rule for CoolerClearanceRule {
    fn id(&self) -> &str {
        "cooler_clearance"
    }

    fn name(&self) -> &str {
        "Cooler Clearance Check"
    }

    fn description(&self) -> &str {
        "Cooler height must not exceed the case clearance"
    }

    fn check(&self, build: &Build) -> Vec<Issue> {
        let Some((cooler, case)) = pair(build, Category::Cooler, Category::Case) else {
            return Vec::new();
        };
        let (Some(height), Some(max_height)) = (cooler.height_mm, case.max_cooler_height_mm) else {
            return Vec::new();
        };
        if !exceeds(height, max_height) {
            return Vec::new();
        }

        vec![Issue {
            rule_id: self.id().to_string(),
            severity: Severity::Error,
            message: format!(
                "Cooler height {}mm exceeds Case maximum cooler height of {}mm",
                height, max_height
            ),
            categories: vec![Category::Cooler, Category::Case],
            suggestion: Some(format!("Choose a cooler no taller than {}mm", max_height)),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_factor_table_uses_substring_match() {
        assert!(case_fits_board("Micro-ATX", "ATX Mid Tower"));
        assert!(case_fits_board("ATX", "Full-Tower"));
        assert!(case_fits_board("E-ATX", "E-ATX Full-Tower"));
        assert!(!case_fits_board("ATX", "Mini Tower"));
        assert!(!case_fits_board("E-ATX", "ATX Mid Tower"));
    }

    #[test]
    fn unknown_board_form_factor_never_fits() {
        assert!(!case_fits_board("XL-ATX", "ATX Full-Tower"));
    }

    #[test]
    fn blank_attributes_are_undeclared() {
        assert_eq!(declared(&Some("  ".to_string())), None);
        assert_eq!(declared(&Some(" AM5 ".to_string())), Some("AM5"));
        assert_eq!(declared(&None), None);
    }
}

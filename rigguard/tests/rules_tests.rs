//! Rules Engine Tests
//!
//! Covers every default compatibility rule:
//! - Socket match
//! - Memory type match
//! - Form factor fit
//! - Graphics card clearance
//! - Power supply margin
//! - Cooler clearance
//! - Rule ordering, independence and determinism

use std::sync::Arc;

use rigguard::analyzer::rules::{
    CoolerClearanceRule, FormFactorRule, GpuClearanceRule, MemoryTypeRule,
    PowerSupplyMarginRule, SocketMatchRule,
};
use rigguard::{evaluate, Build, Category, Component, Issue, Rule, RulesEngine, Severity};

// =============================================================================
// Test Helpers
// =============================================================================

fn part(id: &str) -> Component {
    Component::new(id, id.to_uppercase())
}

fn issues_for<'a>(issues: &'a [Issue], rule_id: &str) -> Vec<&'a Issue> {
    issues.iter().filter(|i| i.rule_id == rule_id).collect()
}

/// 65W processor + 220W graphics card + memory: (50 + 65 + 220 + 10) * 1.2 = 414W.
fn loaded_build() -> Build {
    Build::new()
        .with(Category::Processor, part("cpu").with_tdp(65))
        .with(Category::GraphicsCard, part("gpu").with_tdp(220))
        .with(Category::Memory, part("ram"))
}

// =============================================================================
// Empty build
// =============================================================================

#[test]
fn test_empty_build_has_no_issues() {
    assert!(evaluate(&Build::new()).is_empty());
}

// =============================================================================
// Socket Rule Tests
// =============================================================================

mod socket_tests {
    use super::*;

    #[test]
    fn test_socket_mismatch() {
        let build = Build::new()
            .with(Category::Processor, part("cpu").with_socket("AM4"))
            .with(Category::Motherboard, part("mb").with_socket("LGA1700"));

        let issues = SocketMatchRule.check(&build);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("AM4"));
        assert!(issues[0].message.contains("LGA1700"));
    }

    #[test]
    fn test_socket_match_ignores_case() {
        let build = Build::new()
            .with(Category::Processor, part("cpu").with_socket("am5"))
            .with(Category::Motherboard, part("mb").with_socket("AM5"));

        assert!(SocketMatchRule.check(&build).is_empty());
    }

    #[test]
    fn test_socket_skipped_when_undeclared() {
        let build = Build::new()
            .with(Category::Processor, part("cpu").with_socket("AM4"))
            .with(Category::Motherboard, part("mb"));

        assert!(SocketMatchRule.check(&build).is_empty());
    }

    #[test]
    fn test_socket_skipped_without_motherboard() {
        let build = Build::new().with(Category::Processor, part("cpu").with_socket("AM4"));
        assert!(SocketMatchRule.check(&build).is_empty());
    }
}

// =============================================================================
// Memory Type Rule Tests
// =============================================================================

mod memory_type_tests {
    use super::*;

    #[test]
    fn test_memory_type_mismatch() {
        let build = Build::new()
            .with(Category::Memory, part("ram").with_memory_type("DDR5"))
            .with(Category::Motherboard, part("mb").with_memory_type("DDR4"));

        let issues = MemoryTypeRule.check(&build);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("DDR5"));
        assert!(issues[0].message.contains("DDR4"));
    }

    #[test]
    fn test_memory_type_match() {
        let build = Build::new()
            .with(Category::Memory, part("ram").with_memory_type("DDR4"))
            .with(Category::Motherboard, part("mb").with_memory_type("ddr4"));

        assert!(MemoryTypeRule.check(&build).is_empty());
    }

    #[test]
    fn test_blank_memory_type_is_undeclared() {
        let build = Build::new()
            .with(Category::Memory, part("ram").with_memory_type(""))
            .with(Category::Motherboard, part("mb").with_memory_type("DDR4"));

        assert!(MemoryTypeRule.check(&build).is_empty());
    }
}

// =============================================================================
// Form Factor Rule Tests
// =============================================================================

mod form_factor_tests {
    use super::*;

    fn board_in_case(board: &str, case: &str) -> Vec<Issue> {
        let build = Build::new()
            .with(Category::Motherboard, part("mb").with_form_factor(board))
            .with(Category::Case, part("case").with_form_factor(case));
        FormFactorRule.check(&build)
    }

    #[test]
    fn test_atx_board_in_mini_tower() {
        let issues = board_in_case("ATX", "Mini Tower");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("ATX"));
        assert!(issues[0].message.contains("Mini Tower"));
    }

    #[test]
    fn test_micro_atx_board_in_atx_mid_tower() {
        assert!(board_in_case("Micro-ATX", "ATX Mid Tower").is_empty());
    }

    #[test]
    fn test_mini_itx_fits_everywhere_listed() {
        for case in ["Mini-ITX", "Micro-ATX Tower", "ATX", "Mid-Tower", "Full-Tower"] {
            assert!(board_in_case("Mini-ITX", case).is_empty(), "should fit in {}", case);
        }
    }

    #[test]
    fn test_e_atx_needs_full_tower() {
        assert_eq!(board_in_case("E-ATX", "ATX Mid Tower").len(), 1);
        assert!(board_in_case("E-ATX", "Full-Tower").is_empty());
    }

    #[test]
    fn test_unknown_board_form_factor_is_error() {
        let issues = board_in_case("SSI-EEB", "Full-Tower");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_form_factor_skipped_when_case_undeclared() {
        let build = Build::new()
            .with(Category::Motherboard, part("mb").with_form_factor("ATX"))
            .with(Category::Case, part("case"));
        assert!(FormFactorRule.check(&build).is_empty());
    }
}

// =============================================================================
// Clearance Rule Tests
// =============================================================================

mod clearance_tests {
    use super::*;

    #[test]
    fn test_gpu_too_long() {
        let build = Build::new()
            .with(Category::GraphicsCard, part("gpu").with_length_mm(336.0))
            .with(Category::Case, part("case").with_max_gpu_length_mm(300.0));

        let issues = GpuClearanceRule.check(&build);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("336mm"));
        assert!(issues[0].message.contains("300mm"));
    }

    #[test]
    fn test_gpu_exact_fit() {
        let build = Build::new()
            .with(Category::GraphicsCard, part("gpu").with_length_mm(300.0))
            .with(Category::Case, part("case").with_max_gpu_length_mm(300.0));

        assert!(GpuClearanceRule.check(&build).is_empty());
    }

    #[test]
    fn test_cooler_too_tall() {
        let build = Build::new()
            .with(Category::Cooler, part("cooler").with_height_mm(165.0))
            .with(Category::Case, part("case").with_max_cooler_height_mm(157.5));

        let issues = CoolerClearanceRule.check(&build);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("165mm"));
        assert!(issues[0].message.contains("157.5mm"));
    }

    #[test]
    fn test_cooler_skipped_without_case_limit() {
        let build = Build::new()
            .with(Category::Cooler, part("cooler").with_height_mm(165.0))
            .with(Category::Case, part("case").with_max_gpu_length_mm(300.0));

        assert!(CoolerClearanceRule.check(&build).is_empty());
    }
}

// =============================================================================
// Power Supply Rule Tests
// =============================================================================

mod power_supply_tests {
    use super::*;

    fn with_psu(watts: u32) -> Build {
        loaded_build().with(Category::PowerSupply, part("psu").with_wattage(watts))
    }

    #[test]
    fn test_psu_insufficient() {
        let issues = PowerSupplyMarginRule.check(&with_psu(400));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains("insufficient"));
        assert!(issues[0].message.contains("414W"));
    }

    #[test]
    fn test_psu_low_headroom() {
        let issues = PowerSupplyMarginRule.check(&with_psu(420));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].message.contains("497W"));
    }

    #[test]
    fn test_psu_boundaries() {
        assert_eq!(PowerSupplyMarginRule.check(&with_psu(414))[0].severity, Severity::Warning);
        assert_eq!(PowerSupplyMarginRule.check(&with_psu(496))[0].severity, Severity::Warning);
        assert!(PowerSupplyMarginRule.check(&with_psu(497)).is_empty());
    }

    #[test]
    fn test_psu_sufficient() {
        assert!(PowerSupplyMarginRule.check(&with_psu(550)).is_empty());
    }

    #[test]
    fn test_psu_without_rating_is_skipped() {
        let build = loaded_build().with(Category::PowerSupply, part("psu"));
        assert!(PowerSupplyMarginRule.check(&build).is_empty());
    }

    #[test]
    fn test_psu_issue_lists_load_contributors() {
        let issues = PowerSupplyMarginRule.check(&with_psu(400));
        assert_eq!(
            issues[0].categories,
            vec![
                Category::PowerSupply,
                Category::Processor,
                Category::GraphicsCard,
                Category::Memory
            ]
        );
    }
}

// =============================================================================
// Engine Tests
// =============================================================================

mod engine_tests {
    use super::*;

    fn broken_build() -> Build {
        Build::new()
            .with(Category::Processor, part("cpu").with_socket("AM4").with_tdp(65))
            .with(
                Category::Motherboard,
                part("mb")
                    .with_socket("LGA1700")
                    .with_memory_type("DDR4")
                    .with_form_factor("ATX"),
            )
            .with(Category::Memory, part("ram").with_memory_type("DDR5"))
            .with(
                Category::Case,
                part("case")
                    .with_form_factor("Mini Tower")
                    .with_max_gpu_length_mm(300.0)
                    .with_max_cooler_height_mm(150.0),
            )
            .with(Category::GraphicsCard, part("gpu").with_length_mm(340.0).with_tdp(220))
            .with(Category::PowerSupply, part("psu").with_wattage(420))
            .with(Category::Cooler, part("cooler").with_height_mm(160.0))
    }

    #[test]
    fn test_issues_follow_rule_order() {
        let issues = evaluate(&broken_build());
        let order: Vec<&str> = issues.iter().map(|i| i.rule_id.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "socket_match",
                "memory_type",
                "form_factor",
                "gpu_clearance",
                "psu_margin",
                "cooler_clearance"
            ]
        );
        assert_eq!(issues_for(&issues, "psu_margin")[0].severity, Severity::Warning);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let build = broken_build();
        assert_eq!(evaluate(&build), evaluate(&build));
    }

    #[test]
    fn test_evaluate_does_not_mutate_build() {
        let build = broken_build();
        let before = build.clone();
        let _ = evaluate(&build);
        assert_eq!(build, before);
    }

    #[test]
    fn test_removing_cooler_keeps_gpu_error() {
        let mut build = broken_build();
        let with_cooler = issues_for(&evaluate(&build), "gpu_clearance").len();
        build.remove(Category::Cooler);
        let issues = evaluate(&build);

        assert_eq!(with_cooler, 1);
        assert_eq!(issues_for(&issues, "gpu_clearance").len(), 1);
        assert!(issues_for(&issues, "cooler_clearance").is_empty());
    }

    #[test]
    fn test_default_rule_catalogue() {
        let engine = RulesEngine::default();
        let ids: Vec<&str> = engine.rules().map(|r| r.id()).collect();
        assert_eq!(ids.len(), 6);
        assert!(engine.rules().all(|r| !r.name().is_empty() && !r.description().is_empty()));
    }

    struct NoMonitorRule;

    impl Rule for NoMonitorRule {
        fn id(&self) -> &str {
            "no_monitor"
        }

        fn name(&self) -> &str {
            "Monitor Check"
        }

        fn description(&self) -> &str {
            "Warn when no monitor is selected"
        }

        fn check(&self, build: &Build) -> Vec<Issue> {
            if build.contains(Category::Monitor) {
                return Vec::new();
            }
            vec![Issue {
                rule_id: self.id().to_string(),
                severity: Severity::Warning,
                message: "No Monitor selected".to_string(),
                categories: vec![Category::Monitor],
                suggestion: None,
            }]
        }
    }

    #[test]
    fn test_custom_rule_runs_after_defaults() {
        let mut engine = RulesEngine::with_default_rules();
        engine.add_rule(Arc::new(NoMonitorRule));

        let issues = engine.analyze(&broken_build());
        assert_eq!(issues.last().map(|i| i.rule_id.as_str()), Some("no_monitor"));
    }
}

//! Example: extending the default rule set with a store-specific rule.
//! Run with: cargo run --example custom_rules [path/to/build.json]

use rigguard::{Build, Category, Issue, RigGuardCore, Rule, RulesEngine, Severity};
use std::path::Path;
use std::sync::Arc;

/// Flags builds that have a graphics card but no dedicated cooler.
struct StockCoolerRule;

impl Rule for StockCoolerRule {
    fn id(&self) -> &str {
        "stock_cooler"
    }

    fn name(&self) -> &str {
        "Stock Cooler Check"
    }

    fn description(&self) -> &str {
        "Gaming builds should not rely on a stock cooler"
    }

    fn check(&self, build: &Build) -> Vec<Issue> {
        if !build.contains(Category::GraphicsCard) || build.contains(Category::Cooler) {
            return Vec::new();
        }
        vec![Issue {
            rule_id: self.id().to_string(),
            severity: Severity::Warning,
            message: "No Cooler selected for a build with a Graphics Card".to_string(),
            categories: vec![Category::Cooler, Category::GraphicsCard],
            suggestion: Some("Add an aftermarket cooler".to_string()),
        }]
    }
}

fn main() -> Result<(), rigguard::RigGuardError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/compatible_build.json".to_string());
    let build = RigGuardCore::load_build(Path::new(&path))?;

    let mut engine = RulesEngine::with_default_rules();
    engine.add_rule(Arc::new(StockCoolerRule));
    let issues = engine.analyze(&build);

    println!("Custom check found {} issues for {}", issues.len(), path);
    for issue in &issues {
        println!("  [{:?}] {}", issue.severity, issue.message);
    }

    if issues.iter().any(|i| i.is_error()) {
        std::process::exit(1);
    }
    Ok(())
}

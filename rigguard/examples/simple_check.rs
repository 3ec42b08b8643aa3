//! Example: check a build file and print its issues and power budget.
//! Run with: cargo run --example simple_check [path/to/build.json]

use rigguard::{RigGuardCore, RigGuardError};
use std::path::Path;

fn main() -> Result<(), RigGuardError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/compatible_build.json".to_string());

    let build = RigGuardCore::load_build(Path::new(&path))?;
    let report = RigGuardCore::check_build(&build);

    println!("Build: {} ({} parts)", path, build.len());
    println!("Estimated load: {}W", report.estimated_wattage);
    println!("Recommended PSU: {}W", report.recommended_psu_wattage);

    if report.issues.is_empty() {
        println!("No compatibility issues found");
    }
    for issue in &report.issues {
        println!("  [{:?}] {}", issue.severity, issue.message);
        if let Some(ref suggestion) = issue.suggestion {
            println!("    Suggestion: {}", suggestion);
        }
    }

    Ok(())
}

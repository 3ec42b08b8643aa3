//! RigGuard CLI - PC build compatibility checks from the command line.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rigguard::{
    Build, BuildReport, Category, ClassifyOptions, CompatibilityClassifier, CompatibilityLevel,
    CompatibilityReport, Issue, RelevanceMode, RigGuardCore, RulesEngine, Severity,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "rigguard")]
#[command(about = "PC build compatibility and power budget checker", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr (-dd for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    debug: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every compatibility rule for a build file
    Check {
        /// Path to a JSON build file
        #[arg(value_name = "BUILD")]
        build: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if issues found at this severity or higher
        #[arg(long, value_enum)]
        fail_on: Option<FailOnSeverity>,
    },

    /// Print the estimated power draw of a build
    Wattage {
        /// Path to a JSON build file
        #[arg(value_name = "BUILD")]
        build: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Grade a candidate part against a build
    Classify {
        /// Path to a JSON build file
        #[arg(value_name = "BUILD")]
        build: PathBuf,

        /// Category the candidate would fill (e.g. processor, graphics-card)
        #[arg(short, long)]
        category: Category,

        /// Path to a JSON component file
        #[arg(long, value_name = "FILE")]
        candidate: PathBuf,

        /// How issues are attributed to the candidate
        #[arg(long, value_enum, default_value = "heuristic")]
        relevance: Relevance,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if the candidate is not fully compatible
        #[arg(long)]
        strict: bool,
    },

    /// List available compatibility rules
    Rules {
        /// Show detailed rule descriptions
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// GitHub Actions format
    Github,
}

#[derive(Clone, ValueEnum)]
enum FailOnSeverity {
    Error,
    Warning,
}

#[derive(Clone, ValueEnum)]
enum Relevance {
    /// Match issue messages against the category and part name
    Heuristic,
    /// Match the categories each issue involves
    Structured,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Check {
            build,
            format,
            fail_on,
        } => handle_check(&build, format, fail_on),
        Commands::Wattage { build, format } => handle_wattage(&build, format),
        Commands::Classify {
            build,
            category,
            candidate,
            relevance,
            format,
            strict,
        } => handle_classify(&build, category, &candidate, relevance, format, strict),
        Commands::Rules { verbose } => {
            handle_rules(verbose);
            Ok(0)
        }
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    process::exit(exit_code);
}

fn init_tracing(debug: u8) {
    let level = match debug {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_build(path: &Path) -> anyhow::Result<Build> {
    RigGuardCore::load_build(path)
        .with_context(|| format!("failed to load build from {}", path.display()))
}

fn handle_check(
    path: &Path,
    format: OutputFormat,
    fail_on: Option<FailOnSeverity>,
) -> anyhow::Result<i32> {
    let build = load_build(path)?;
    let report = RigGuardCore::check_build(&build);

    match format {
        OutputFormat::Human => output_human(path, &report),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "build": path.display().to_string(),
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Github => output_github(path, &report.issues),
    }

    Ok(match fail_on {
        Some(severity) if should_fail(&report, &severity) => 1,
        _ => 0,
    })
}

fn should_fail(report: &BuildReport, severity: &FailOnSeverity) -> bool {
    match severity {
        FailOnSeverity::Error => report.has_errors(),
        FailOnSeverity::Warning => report.total_issues() > 0,
    }
}

fn output_human(path: &Path, report: &BuildReport) {
    println!("\nBuild: {}", path.display());
    println!("{}", "─".repeat(60));
    println!(
        "  Estimated load: {}W (recommended PSU: {}W)",
        report.estimated_wattage, report.recommended_psu_wattage
    );

    if report.total_issues() == 0 {
        println!("  No compatibility issues found");
        return;
    }

    let errors: Vec<_> = report.issues.iter().filter(|i| i.is_error()).collect();
    let warnings: Vec<_> = report.issues.iter().filter(|i| !i.is_error()).collect();

    if !errors.is_empty() {
        println!("\n  ERRORS:");
        print_issues(&errors);
    }
    if !warnings.is_empty() {
        println!("\n  WARNINGS:");
        print_issues(&warnings);
    }

    println!("\n  Summary:");
    println!("    Errors:   {}", report.stats.errors);
    println!("    Warnings: {}", report.stats.warnings);
}

fn print_issues(issues: &[&Issue]) {
    for issue in issues {
        println!("    - {}", issue.message);
        if let Some(ref suggestion) = issue.suggestion {
            println!("      Suggestion: {}", suggestion);
        }
    }
}

fn severity_to_github(issue: &Issue) -> &'static str {
    match issue.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

fn output_github(path: &Path, issues: &[Issue]) {
    for issue in issues {
        println!(
            "::{} file={}::{}",
            severity_to_github(issue),
            path.display(),
            issue.message.replace('\n', " ")
        );
    }
}

fn handle_wattage(path: &Path, format: OutputFormat) -> anyhow::Result<i32> {
    let build = load_build(path)?;
    let estimated = rigguard::estimate_wattage(&build);
    let recommended = rigguard::recommended_psu_wattage(&build);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "estimated_wattage": estimated,
                "recommended_psu_wattage": recommended,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human | OutputFormat::Github => {
            println!("Estimated load:  {}W", estimated);
            println!("Recommended PSU: {}W", recommended);
        }
    }
    Ok(0)
}

fn handle_classify(
    build_path: &Path,
    category: Category,
    candidate_path: &Path,
    relevance: Relevance,
    format: OutputFormat,
    strict: bool,
) -> anyhow::Result<i32> {
    let build = load_build(build_path)?;
    let candidate = RigGuardCore::load_component(candidate_path)
        .with_context(|| format!("failed to load candidate from {}", candidate_path.display()))?;

    let options = ClassifyOptions {
        relevance: match relevance {
            Relevance::Heuristic => RelevanceMode::Heuristic,
            Relevance::Structured => RelevanceMode::Structured,
        },
    };
    let report = CompatibilityClassifier::new(options).classify(category, &candidate, &build)?;

    match format {
        OutputFormat::Human => output_classification(category, &candidate.name, &report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Github => output_github(build_path, &report.issues),
    }

    Ok(if strict && report.level != CompatibilityLevel::Perfect {
        1
    } else {
        0
    })
}

fn output_classification(category: Category, name: &str, report: &CompatibilityReport) {
    println!("{} as {}: {:?} - {}", name, category, report.level, report.summary);
    for issue in &report.issues {
        println!("  - [{}] {}", severity_to_github(issue), issue.message);
    }
}

fn handle_rules(verbose: bool) {
    println!("Available compatibility rules:\n");

    let engine = RulesEngine::with_default_rules();
    for rule in engine.rules() {
        println!("  {}", rule.id());
        println!("    {}", rule.name());
        if verbose {
            println!("    {}", rule.description());
        }
        println!();
    }
}

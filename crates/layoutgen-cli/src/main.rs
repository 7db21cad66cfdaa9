//! layoutgen recipe harness
//!
//! Loads a generator config, generates the batch, validates every recipe and
//! writes one JSON document per instance.
//!
//! Usage:
//!   cargo run -p layoutgen-cli
//!   cargo run -p layoutgen-cli -- config.json --out /tmp/recipes --verbose

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use layoutgen_core::config::GeneratorConfig;
use layoutgen_core::persistence::write_recipe;
use layoutgen_core::recipe::generate_batch;
use layoutgen_core::validation::{validate_recipe, Severity};

// ── Arguments ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    verbose: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--verbose" | "-v" => args.verbose = true,
            "--out" | "-o" => {
                let dir = it.next().context("--out needs a directory")?;
                args.out = Some(PathBuf::from(dir));
            }
            flag if flag.starts_with('-') => bail!("unknown flag `{flag}`"),
            path => {
                if args.config.is_some() {
                    bail!("only one config file may be given, got `{path}`");
                }
                args.config = Some(PathBuf::from(path));
            }
        }
    }
    Ok(args)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ── Main ────────────────────────────────────────────────────────────────

fn run(args: Args) -> anyhow::Result<bool> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            tracing::info!("no config given, using defaults");
            GeneratorConfig::default()
        }
    };
    if let Some(out) = args.out {
        config.recipe_dir = out;
    }

    let recipes = generate_batch(&config).context("recipe generation failed")?;

    println!("=== layoutgen: {} {} recipes ===\n", recipes.len(), config.env_type);

    let mut clean = true;
    for recipe in &recipes {
        let issues = validate_recipe(recipe);
        let errors = issues.iter().filter(|e| e.severity == Severity::Error).count();
        for issue in &issues {
            match issue.severity {
                Severity::Error => {
                    tracing::error!("{} [{}] {}", recipe.name(), issue.category, issue.message)
                }
                Severity::Warning => {
                    tracing::warn!("{} [{}] {}", recipe.name(), issue.category, issue.message)
                }
            }
        }
        if errors > 0 {
            clean = false;
            println!("  ✗ {:<20} {} validation errors, not written", recipe.name(), errors);
            continue;
        }

        let path = write_recipe(&config.recipe_dir, recipe)
            .with_context(|| format!("failed to write {}", recipe.name()))?;
        println!(
            "  ✓ {:<20} {:>4} entities ({} interior, {} walls) → {}",
            recipe.name(),
            recipe.entity_count(),
            recipe.interior.len(),
            recipe.isaac_walls.len(),
            path.display()
        );
    }

    println!();
    Ok(clean)
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e:#}");
            eprintln!("usage: layoutgen [CONFIG] [--out DIR] [--verbose]");
            return ExitCode::from(2);
        }
    };
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("validation failed for one or more recipes");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

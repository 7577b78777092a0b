//! menu-index - VistA menu autocomplete index builder
//!
//! A CLI tool that aggregates per-option JSON descriptor files into a
//! single JSON index used to populate an autocomplete menu.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (bad arguments, unreadable directory, invalid descriptor, write failure)

mod cli;
mod config;
mod error;
mod index;
mod models;
mod report;
mod scanner;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use index::IndexOptions;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration before logging so a config-level `verbose` applies
    let (config, config_note) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&args, &config);

    info!("menu-index v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match config_note {
        ConfigNote::Loaded(path) => info!("Loaded config from {}", path),
        ConfigNote::Invalid(reason) => warn!("Failed to load config: {}", reason),
        ConfigNote::Defaults => debug!("No config file found, using defaults"),
    }

    match run_index(&args, &config) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Index build failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .menuindex.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the menu layout, sort order, and output.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Build and write the index for the requested category.
fn run_index(args: &Args, config: &Config) -> Result<()> {
    let start_time = Instant::now();
    let category = args.category();
    let options = IndexOptions::from(&config.index);

    // Handle --dry-run: list descriptors and exit
    if args.dry_run {
        return handle_dry_run(&args.base_dir, category, &options);
    }

    let output_name = &config.general.output_name;
    let result = if options == IndexOptions::default() {
        index::run(category, output_name, &args.base_dir)
    } else {
        index::run_with(category, output_name, &args.base_dir, &options)
    };

    let output = result.with_context(|| format!("Failed to build index for category '{}'", category))?;

    debug!("Finished in {:.3}s", start_time.elapsed().as_secs_f64());
    println!("✅ Updated {}", output.display());

    Ok(())
}

/// Handle --dry-run: scan descriptors, print what would be aggregated, exit.
fn handle_dry_run(base_dir: &Path, category: &str, options: &IndexOptions) -> Result<()> {
    let descriptor_scanner =
        scanner::DescriptorScanner::new(base_dir.to_path_buf(), options.scan.clone());
    println!("🔍 Dry run: {}\n", descriptor_scanner.pattern(category));

    let files = descriptor_scanner.scan(category)?;

    if files.is_empty() {
        println!("   No matching descriptor files found.");
    } else {
        for file in &files {
            match file.size {
                Some(size) => println!("     📄 {} ({} bytes)", file.path.display(), size),
                None => println!("     📄 {}", file.path.display()),
            }
        }
        println!("\n   Total: {} files", files.len());
    }

    println!("\n✅ Dry run complete. No index was written.");
    Ok(())
}

/// Where the effective configuration came from, reported once logging is up.
enum ConfigNote {
    Loaded(String),
    Invalid(String),
    Defaults,
}

/// Load configuration from file or use defaults, then apply CLI overrides.
fn load_config(args: &Args) -> Result<(Config, ConfigNote)> {
    // Explicit config path must load
    let (mut config, note) = if let Some(ref config_path) = args.config {
        (
            Config::load(config_path)?,
            ConfigNote::Loaded(config_path.display().to_string()),
        )
    } else {
        match Config::load_default() {
            Ok(Some(config)) => (config, ConfigNote::Loaded(CONFIG_FILE_NAME.to_string())),
            Ok(None) => (Config::default(), ConfigNote::Defaults),
            Err(e) => (Config::default(), ConfigNote::Invalid(format!("{:#}", e))),
        }
    };

    config.merge_with_args(args);
    Ok((config, note))
}

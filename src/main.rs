//! Main CLI application for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_of_life::{
    config::{CliOverrides, Settings, DEFAULT_CONFIG_FILE},
    game_of_life::{
        pattern::{write_builtin_patterns, SHORT_BLOCK_PATTERNS},
        PatternLoader,
    },
    simulation::{FixedPattern, PatternPrompt, Runner, StdinPrompt, TerminalSink},
    utils::{ColorOutput, GridFormatter},
};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "game_of_life")]
#[command(about = "Conway's Game of Life in the terminal")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file path (defaults to config.yaml next to the executable)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pattern to run (skips the interactive prompt)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Number of generations (overrides config)
        #[arg(short, long)]
        evolutions: Option<usize>,

        /// Seconds between generations (overrides config)
        #[arg(short, long)]
        delay: Option<f64>,

        /// Trim short-block patterns to this width (overrides config)
        #[arg(short, long)]
        trim_size: Option<usize>,

        /// Directory holding pattern files (overrides config)
        #[arg(long)]
        pattern_directory: Option<PathBuf>,

        /// Dead cells placed around the pattern
        #[arg(long, default_value_t = Runner::DEFAULT_PADDING)]
        padding: usize,

        /// Print generations one after another instead of redrawing
        #[arg(long)]
        no_clear: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create a default configuration and the built-in pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// List the configured patterns
    List {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print a single pattern
    Show {
        /// Pattern name
        name: String,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    init_tracing(verbose);

    if let Err(err) = dispatch(cli.command) {
        eprintln!("{}", ColorOutput::error(&format!("Error: {:#}", err)));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            config,
            pattern,
            evolutions,
            delay,
            trim_size,
            pattern_directory,
            padding,
            no_clear,
            verbose,
        } => {
            let overrides = CliOverrides {
                evolutions,
                delay_interval: delay,
                trim_size,
                pattern_directory,
            };
            run_command(config, pattern, overrides, padding, !no_clear, verbose)
        }
        Commands::Setup { directory, force } => setup_command(&directory, force),
        Commands::List { config } => list_command(config),
        Commands::Show { name, config } => show_command(&name, config),
    }
}

/// Load settings from the given path, the default location, or fall back to defaults
fn load_settings(config_path: Option<PathBuf>) -> Result<Settings> {
    let path = match config_path {
        Some(path) => {
            return Settings::from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()));
        }
        None => Settings::default_path()?,
    };

    if path.exists() {
        Settings::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    } else {
        warn!(config = %path.display(), "config file not found, using defaults");
        Ok(Settings::default())
    }
}

fn run_command(
    config_path: Option<PathBuf>,
    pattern: Option<String>,
    overrides: CliOverrides,
    padding: usize,
    clear: bool,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(config_path)?;
    settings.merge_with_cli(&overrides);
    settings
        .validate()
        .context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Evolutions: {}", settings.evolutions);
        println!("  Delay interval: {}s", settings.delay_interval);
        match settings.trim_size {
            Some(size) => println!("  Trim size: {}", size),
            None => println!("  Trim size: disabled"),
        }
        println!("  Pattern directory: {}", settings.pattern_directory.display());
        println!();
    }

    let runner = Runner::new(settings).with_padding(padding);
    let stdout = std::io::stdout();
    let mut sink = TerminalSink::new(stdout.lock(), clear);

    let mut prompt: Box<dyn PatternPrompt> = match pattern {
        Some(name) => Box::new(FixedPattern(name)),
        None => Box::new(StdinPrompt::new(std::io::stdin().lock(), std::io::stdout())),
    };

    let summary = runner.run(prompt.as_mut(), &mut sink)?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Finished '{}' after {} generations with {} living cells",
            summary.pattern, summary.generations, summary.final_population
        ))
    );
    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up configuration and patterns..."));

    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create directory {}", directory.display()))?;

    let settings = Settings::default();
    let config_path = directory.join(DEFAULT_CONFIG_FILE);
    if !config_path.exists() || force {
        settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let pattern_dir = directory.join(&settings.pattern_directory);
    let written =
        write_builtin_patterns(&pattern_dir, force).context("Failed to create pattern files")?;
    println!("Created {} patterns in: {}", written.len(), pattern_dir.display());
    let kept = SHORT_BLOCK_PATTERNS.len() - written.len();
    if kept > 0 {
        println!("Skipped: {} existing pattern file(s)", kept);
    }

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Copy {} next to the executable or pass --config", config_path.display());
    println!("2. Add your own patterns to {}", pattern_dir.display());
    println!("3. Run: game_of_life run --config {}", config_path.display());

    Ok(())
}

fn list_command(config_path: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(config_path)?;
    let loader = PatternLoader::from_settings(&settings);

    for (i, name) in settings.patterns.iter().enumerate() {
        let path = loader.resolve(name);
        let marker = if path.exists() {
            ColorOutput::success("ok")
        } else {
            ColorOutput::warning("missing")
        };
        println!("{:2}. {:<12} {}", i + 1, name, marker);
    }

    Ok(())
}

fn show_command(name: &str, config_path: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(config_path)?;
    let pattern = PatternLoader::from_settings(&settings)
        .load(name)
        .with_context(|| format!("Failed to load pattern '{}'", name))?;

    print!("{}", GridFormatter::format_pattern(&pattern));
    Ok(())
}

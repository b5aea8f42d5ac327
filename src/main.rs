use clap::{Parser, Subcommand};

use lanecheck::compute::{detect_supported_widths, detect_widest_register, width_description};
use lanecheck::defaults::VERBOSITY;
use lanecheck::harness::{Harness, HarnessConfig, parse_seed};
use lanecheck::suite;
use lanecheck::vector::RegisterWidth;

#[derive(Parser)]
#[command(name = "lanecheck")]
#[command(about = "LaneCheck - differential tests for SIMD intrinsics against portable references", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in sample checks
    Run {
        /// Generator seed, decimal or 0x hex (default: LANECHECK_SEED or built-in)
        #[arg(short = 's', long, value_name = "SEED", value_parser = parse_seed_arg)]
        seed: Option<u64>,

        /// Trials per check (default: LANECHECK_TRIALS or 1000)
        #[arg(short = 'n', long, value_name = "INT")]
        trials: Option<usize>,

        /// Only run checks at this register width in bits (128, 256 or 512)
        #[arg(short = 'w', long, value_name = "BITS")]
        width: Option<u32>,

        /// Only run checks whose name contains STR
        #[arg(short = 'f', long, value_name = "STR")]
        filter: Option<String>,

        /// Don't print a report block for each mismatch
        #[arg(short = 'q', long)]
        quiet: bool,

        /// Verbose level: 1=error, 2=warning, 3=message, 4+=debugging
        #[arg(short = 'v', long, value_name = "INT", default_value_t = VERBOSITY)]
        verbosity: u8,
    },

    /// Print the register widths this CPU supports
    Widths,
}

fn init_logger(verbosity: u8) {
    let log_level = match verbosity {
        v if v <= 1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Parse a seed given on the command line
fn parse_seed_arg(s: &str) -> Result<u64, String> {
    parse_seed(s).ok_or_else(|| format!("invalid seed {:?}: expected decimal or 0x hex", s))
}

fn build_config(seed: Option<u64>, trials: Option<usize>, quiet: bool) -> anyhow::Result<HarnessConfig> {
    let mut config = HarnessConfig::from_env()?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(trials) = trials {
        config = config.with_trials(trials);
    }
    if quiet {
        config = config.quiet();
    }
    Ok(config)
}

fn run(
    seed: Option<u64>,
    trials: Option<usize>,
    width: Option<u32>,
    filter: Option<String>,
    quiet: bool,
) -> anyhow::Result<bool> {
    let config = build_config(seed, trials, quiet)?;
    let width = match width {
        Some(bits) => {
            let w = RegisterWidth::from_bits(bits)?;
            if !w.is_vector() {
                return Err(lanecheck::ConfigFault::NotAVector(bits).into());
            }
            Some(w)
        }
        None => None,
    };

    let widest = detect_widest_register();
    log::info!("Widest register: {} ({})", widest, width_description(widest));
    log::info!("Seed: {:#x}, trials per check: {}", config.seed, config.trials);

    let checks: Vec<_> = suite::catalog()
        .into_iter()
        .filter(|c| width.map_or(true, |w| c.width == w))
        .collect();
    if checks.is_empty() {
        log::warn!("No checks selected");
    }

    let mut harness = Harness::new(config);
    let summaries = suite::run_checks(&mut harness, &checks, filter.as_deref());

    let failed = summaries.iter().filter(|s| !s.passed()).count();
    for summary in &summaries {
        println!("{}", summary);
    }
    log::info!(
        "{} checks run, {} passed, {} failed",
        summaries.len(),
        summaries.len() - failed,
        failed
    );
    Ok(failed == 0)
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            seed,
            trials,
            width,
            filter,
            quiet,
            verbosity,
        } => {
            init_logger(verbosity);

            match run(seed, trials, width, filter, quiet) {
                Ok(true) => {}
                Ok(false) => std::process::exit(1),
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(2);
                }
            }
        }

        Commands::Widths => {
            init_logger(VERBOSITY);

            let widest = detect_widest_register();
            for width in detect_supported_widths() {
                let marker = if width == widest { " (widest)" } else { "" };
                println!("{:>4} bits: {}{}", width.bits(), width_description(width), marker);
            }
        }
    }
}

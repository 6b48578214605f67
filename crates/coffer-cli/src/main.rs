// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! coffer CLI - pick the investments that maximize return within a budget.

mod config;
mod report;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use coffer_dp::{
    DpOptimizer, ExhaustiveOracle, best_single,
    monitor::{composite::CompositeMonitor, log::LogMonitor},
};
use coffer_model::{
    catalog::ReturnKind,
    loading::{CatalogLoader, LoadedCatalog},
};
use config::{Config, Returns, parse_budget};
use report::Money;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "coffer")]
#[command(version)]
#[command(about = "Optimal investment selection under a budget (0/1 knapsack)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to an optional TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Best combination of actions (dynamic programming)
    Combo(RunArgs),

    /// Best single action that fits the budget
    Single(RunArgs),

    /// Best combination by enumerating every subset (small inputs only)
    Exhaustive(RunArgs),

    /// Run both optimizers and check that they agree
    Verify(RunArgs),

    /// Show example configuration
    Example,
}

#[derive(Args)]
struct RunArgs {
    /// Path to the CSV input file
    #[arg(short, long)]
    input: PathBuf,

    /// Budget in major currency units, e.g. 500, 500.00 or "500,00 €"
    #[arg(short, long)]
    budget: Option<String>,

    /// Field delimiter of the input file
    #[arg(short, long)]
    delimiter: Option<char>,

    /// How to read the return column
    #[arg(short, long, value_enum)]
    returns: Option<ReturnsArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReturnsArg {
    Percent,
    Absolute,
}

impl From<ReturnsArg> for Returns {
    fn from(r: ReturnsArg) -> Self {
        match r {
            ReturnsArg::Percent => Returns::Percent,
            ReturnsArg::Absolute => Returns::Absolute,
        }
    }
}

/// `COFFER_LOG` overrides the level chosen by `--verbose`.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("COFFER_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn print_example_config() {
    let example = r#"# coffer configuration file

[budget]
# Budget in major currency units
amount = "500.00"
currency = "€"

[quantizer]
minor_digits = 2
# "half-away-from-zero" or "half-even"
rounding = "half-away-from-zero"

[input]
delimiter = ","
# "percent" (return is a percentage of the cost) or "absolute"
returns = "percent"

[limits]
max_budget_units = 10000000
max_choice_bits = 2147483648
max_oracle_items = 22
"#;
    println!("{example}");
}

/// Everything a run needs once the configuration and the input are resolved.
struct Session {
    config: Config,
    loaded: LoadedCatalog<u64>,
    budget: u64,
    money: Money,
    started: Instant,
}

impl Session {
    fn open(config: Config, args: &RunArgs) -> Result<Self> {
        let started = Instant::now();
        let quantizer = config.quantizer()?;

        let returns = args.returns.map(Returns::from).unwrap_or(config.input.returns);
        let loader = CatalogLoader::new()
            .delimiter(args.delimiter.unwrap_or(config.input.delimiter))
            .return_kind(ReturnKind::from(returns))
            .quantizer(quantizer);

        let loaded: LoadedCatalog<u64> = loader
            .from_path(&args.input)
            .with_context(|| format!("Failed to load catalog from {:?}", args.input))?;
        for rejection in &loaded.rejections {
            warn!("Skipped {}", rejection);
        }

        let budget_text = args.budget.as_deref().unwrap_or(&config.budget.amount);
        let budget = parse_budget(budget_text, &quantizer)
            .with_context(|| format!("Invalid budget '{}'", budget_text))?;

        let money = Money::new(quantizer, config.budget.currency.clone());
        Ok(Self {
            config,
            loaded,
            budget,
            money,
            started,
        })
    }

    /// Observers for a run; empty unless `--verbose` is set.
    fn monitor(verbose: bool) -> CompositeMonitor<'static, u64> {
        let mut monitor = CompositeMonitor::new();
        if verbose {
            monitor.add_monitor(LogMonitor::<u64>::default());
        }
        monitor
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let args = match &cli.command {
        Commands::Example => {
            print_example_config();
            return Ok(());
        }
        Commands::Combo(a) | Commands::Single(a) | Commands::Exhaustive(a) | Commands::Verify(a) => a,
    };

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::default(),
    };

    let session = Session::open(config, args)?;
    let catalog = &session.loaded.catalog;
    let limits = session.config.optimizer_config();
    info!(
        items = catalog.len(),
        rejected = session.loaded.rejections.len(),
        budget = %session.money.format(session.budget),
        "Catalog ready"
    );

    match &cli.command {
        Commands::Combo(_) => {
            let mut monitor = Session::monitor(cli.verbose);
            let outcome = DpOptimizer::with_config(limits)
                .solve_with_monitor(catalog, session.budget, &mut monitor)
                .context("Optimization failed")?;
            debug!("\n{}", outcome.statistics());
            print!(
                "{}",
                report::render_combination(
                    "Best combination (DP)",
                    catalog,
                    outcome.selection(),
                    session.budget,
                    &session.money,
                    session.started.elapsed(),
                )
            );
        }

        Commands::Single(_) => {
            let best = best_single(catalog, session.budget);
            print!("{}", report::render_single(catalog, best, &session.money));
        }

        Commands::Exhaustive(_) => {
            let mut monitor = Session::monitor(cli.verbose);
            let outcome = ExhaustiveOracle::with_config(limits)
                .solve_with_monitor(catalog, session.budget, &mut monitor)
                .context("Exhaustive search failed")?;
            debug!("\n{}", outcome.statistics());
            print!(
                "{}",
                report::render_combination(
                    "Best combination (exhaustive)",
                    catalog,
                    outcome.selection(),
                    session.budget,
                    &session.money,
                    session.started.elapsed(),
                )
            );
        }

        Commands::Verify(_) => {
            let dp = DpOptimizer::with_config(limits)
                .solve(catalog, session.budget)
                .context("Optimization failed")?;
            let oracle = ExhaustiveOracle::with_config(limits)
                .solve(catalog, session.budget)
                .context("Exhaustive search failed")?;
            print!(
                "{}",
                report::render_verification(
                    dp.selection(),
                    dp.statistics(),
                    oracle.selection(),
                    oracle.statistics(),
                    &session.money,
                )
            );
            if dp.selection().total_value() != oracle.selection().total_value() {
                bail!(
                    "DP value {} differs from exhaustive value {}",
                    dp.selection().total_value(),
                    oracle.selection().total_value()
                );
            }
        }

        Commands::Example => unreachable!("handled above"),
    }

    Ok(())
}

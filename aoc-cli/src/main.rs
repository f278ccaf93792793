//! AOC CLI - run Advent of Code solvers against local puzzle inputs

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::{SolverPlugin, SolverRegistry, SolverRegistryBuilder, inventory};
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::Executor;
use itertools::Itertools;
use output::OutputFormatter;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(Config::from_args(args)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` if set, otherwise the level picked by `-v`
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config::log_level(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: Config) -> Result<(), CliError> {
    if config.list {
        list_solvers(&config);
        return Ok(());
    }

    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }
    if !config.quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys = work_items.iter().flat_map(|w| {
        w.parts.clone().map(move |part| aggregator::ResultKey {
            year: w.year,
            day: w.day,
            part,
        })
    });
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(config.quiet);
    let mut results = Vec::new();
    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }
    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    if !aggregator.is_complete() {
        tracing::warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("executor thread panicked".to_string()))??;

    formatter.print_summary(&results);
    tracing::info!(results = results.len(), "run finished");
    Ok(())
}

/// Registry of the linked plugins carrying every tag in `tags`
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| has_tags(plugin, tags))?
    };

    Ok(builder.build())
}

fn has_tags(plugin: &SolverPlugin, tags: &[String]) -> bool {
    tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
}

/// Print the solvers passing the year/day/tag filters, sorted
fn list_solvers(config: &Config) {
    let plugins = inventory::iter::<SolverPlugin>()
        .filter(|p| config.year_filter.is_none_or(|y| p.year == y))
        .filter(|p| config.day_filter.is_none_or(|d| p.day == d))
        .filter(|p| has_tags(p, &config.tags))
        .sorted_by_key(|p| (p.year, p.day));

    for plugin in plugins {
        println!(
            "{}/{:02}  parts: {}  tags: {}",
            plugin.year,
            plugin.day,
            plugin.solver.parts(),
            plugin.tags.join(", ")
        );
    }
}

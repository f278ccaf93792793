//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError, InputError};
use crate::input::InputStore;
use aoc_solver::{DynSolver, ParseError, SolveResult, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    /// Set on the first result produced from each parse
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    run_config: RunConfig,
    thread_pool: rayon::ThreadPool,
}

struct RunConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            run_config: RunConfig {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.run_config;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        tracing::info!(
            solvers = work_items.len(),
            threads = self.thread_pool.current_num_threads(),
            mode = ?self.run_config.parallelize_by,
            "executing"
        );

        match self.run_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work(&work, &tx, &self.run_config) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part mode additionally splits each day's parts in run_work
            ParallelizeBy::Day | ParallelizeBy::Part => {
                self.execute_parallel_grouped(work_items.into_iter().map(|w| vec![w]).collect(), &tx)
            }
        }
    }

    /// Run groups in parallel on the pool, the items of one group in order
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let run_config = &self.run_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work(&work, tx, run_config) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
                    (a, b) => a.or(b),
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

/// Parts to run given the part filter and the solver's part count
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        // Empty
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

/// An error result for every part of `work`
fn error_results<'a>(
    work: &'a WorkItem,
    error: impl Fn() -> SolverError + 'a,
) -> impl Iterator<Item = SolverResult> + 'a {
    work.parts.clone().map(move |part| SolverResult {
        year: work.year,
        day: work.day,
        part,
        answer: Err(error()),
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
    })
}

/// A missing file is missing data; any other read failure is reported as is
fn input_failure(error: &InputError) -> ParseError {
    match error {
        InputError::Missing { .. } => ParseError::MissingData(error.to_string()),
        InputError::Read { .. } => ParseError::Other(error.to_string()),
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result).map_err(|_| ExecutorError::ChannelSend.into())
}

/// Read the input for `work` and run the requested parts
fn run_work(work: &WorkItem, tx: &Sender<SolverResult>, run_config: &RunConfig) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let input = match run_config.inputs.get(year, day) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(year, day, "{e}");
            let error = input_failure(&e);
            for result in error_results(work, || SolverError::ParseError(error.clone())) {
                send(tx, result)?;
            }
            return Ok(());
        }
    };

    if matches!(run_config.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &run_config.registry)
    } else {
        run_parts_sequential(work, &input, tx, &run_config.registry)
    }
}

/// Parse once and solve the parts in order, sharing the parsed data
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let mut solver = match registry.create_solver(work.year, work.day, input) {
        Ok(solver) => solver,
        Err(e) => return report_parse_failure(work, e, tx),
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        send(tx, solve_part(&mut *solver, part, parse_duration.take()))?;
    }
    Ok(())
}

/// Solve each part on its own parse, in parallel, emitting results in part order
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let mut results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match registry.create_solver(year, day, input) {
            Ok(mut solver) => {
                let parse_duration = solver.parse_duration();
                solve_part(&mut *solver, part, Some(parse_duration))
            }
            Err(e) => SolverResult {
                year,
                day,
                part,
                answer: Err(e),
                parse_duration: None,
                solve_duration: TimeDelta::zero(),
            },
        })
        .collect();

    results.sort_by_key(|r| r.part);
    for result in results {
        send(tx, result)?;
    }
    Ok(())
}

fn report_parse_failure(work: &WorkItem, error: SolverError, tx: &Sender<SolverResult>) -> Result<(), ArcExecutorError> {
    tracing::debug!(year = work.year, day = work.day, %error, "solver creation failed");
    let copy = || match &error {
        SolverError::ParseError(e) => SolverError::ParseError(e.clone()),
        SolverError::NotFound(year, day) => SolverError::NotFound(*year, *day),
        other => SolverError::ParseError(ParseError::Other(other.to_string())),
    };
    for result in error_results(work, copy) {
        send(tx, result)?;
    }
    Ok(())
}

fn solve_part(solver: &mut dyn DynSolver, part: u8, parse_duration: Option<TimeDelta>) -> SolverResult {
    let answer = solver.solve(part);
    tracing::debug!(year = solver.year(), day = solver.day(), part, ok = answer.is_ok(), "part finished");

    SolverResult {
        year: solver.year(),
        day: solver.day(),
        part,
        solve_duration: answer.as_ref().map_or(TimeDelta::zero(), SolveResult::duration),
        answer: answer.map(|r| r.answer).map_err(Into::into),
        parse_duration,
    }
}

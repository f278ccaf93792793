//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::{Duration, Instant};

/// Prints results as they are released, then a summary
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    /// Print one result: answers to stdout, errors to stderr
    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{answer}"),
            (Ok(_), false) => println!("{}", format_result(result)),
            (Err(_), _) => eprintln!("{}", format_result(result)),
        }
    }

    /// Totals over `results`; nothing in quiet mode
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }
        println!();
        print!("{}", format_summary(results, self.start_time.elapsed()));
    }
}

/// `YYYY/DD Part P: answer (parse: t, solve: t)`.
///
/// A multi-line answer goes on the lines after the header.
pub fn format_result(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);

    match &result.answer {
        Ok(answer) => {
            let timing = format!(
                "({}solve: {})",
                result
                    .parse_duration
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default(),
                format_duration(result.solve_duration)
            );
            if answer.contains('\n') {
                format!("{prefix}: {timing}\n{}", answer.trim_end_matches('\n'))
            } else {
                format!("{prefix}: {answer} {timing}")
            }
        }
        Err(e) => format!("{prefix}: Error - {e}"),
    }
}

/// Counts and timings over all results.
///
/// Speedup is the summed parse and solve time of the successful results
/// over the wall-clock time.
pub fn format_summary(results: &[SolverResult], elapsed: Duration) -> String {
    let successes = results.iter().filter(|r| r.answer.is_ok()).count();
    let failures = results.len() - successes;

    let solved = || results.iter().filter(|r| r.answer.is_ok());
    let total_parse_time: TimeDelta = solved().filter_map(|r| r.parse_duration).sum();
    let total_solve_time: TimeDelta = solved().map(|r| r.solve_duration).sum();
    let total_compute_time = total_parse_time + total_solve_time;

    let mut out = String::from("--- Summary ---\n");
    out += &format!("Solvers: {successes} solved, {failures} failed\n");
    out += &format!("Total parse time: {}\n", format_duration(total_parse_time));
    out += &format!("Total solve time: {}\n", format_duration(total_solve_time));
    out += &format!("Elapsed wall-clock time: {}\n", format_std_duration(elapsed));
    if !elapsed.is_zero() {
        let total_compute_secs = total_compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
        out += &format!("Speedup factor: {:.2}x\n", total_compute_secs / elapsed.as_secs_f64());
    }
    out
}

fn format_micros(micros: u128) -> String {
    if micros < 1000 {
        format!("{micros}µs")
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

fn format_duration(d: TimeDelta) -> String {
    match d.num_microseconds() {
        None => "N/A".to_string(),
        Some(micros) if micros < 0 => format!("-{}", format_duration(-d)),
        Some(micros) => format_micros(micros.unsigned_abs().into()),
    }
}

/// Wall-clock variant of [`format_duration`]
fn format_std_duration(d: Duration) -> String {
    format_micros(d.as_micros())
}

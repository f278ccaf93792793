//! If You Give A Seed A Fertilizer

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 5, tags = ["intervals"])]
pub struct Solver;

/// One `destination source length` line of a map
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Rule {
    src: u64,
    dst: u64,
    len: u64,
}

/// A category-to-category map, rules sorted by source start
#[derive(Debug, Clone, Default)]
struct Mapping {
    rules: Vec<Rule>,
}

impl Mapping {
    fn apply(&self, value: u64) -> u64 {
        self.rules
            .iter()
            .find(|r| (r.src..r.src + r.len).contains(&value))
            .map_or(value, |r| r.dst + (value - r.src))
    }

    /// Map half-open ranges, splitting them where rules begin or end
    fn apply_ranges(&self, ranges: &[(u64, u64)]) -> Vec<(u64, u64)> {
        let mut out = Vec::with_capacity(ranges.len());
        for &(mut start, end) in ranges {
            for rule in &self.rules {
                let rule_end = rule.src + rule.len;
                if start >= end || rule.src >= end {
                    break;
                }
                if rule_end <= start {
                    continue;
                }
                if start < rule.src {
                    out.push((start, rule.src));
                    start = rule.src;
                }
                let overlap_end = end.min(rule_end);
                out.push((rule.dst + (start - rule.src), rule.dst + (overlap_end - rule.src)));
                start = overlap_end;
            }
            if start < end {
                out.push((start, end));
            }
        }
        out
    }
}

pub struct Almanac {
    seeds: Vec<u64>,
    maps: Vec<Mapping>,
}

fn parse_numbers(line: &str, line_idx: usize) -> Result<Vec<u64>, ParseError> {
    line.split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|e| ParseError::at_line(line_idx, e))
}

impl AocParser for Solver {
    type SharedData<'a> = Almanac;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.lines().enumerate();
        let seeds = lines
            .next()
            .and_then(|(idx, line)| Some((idx, line.strip_prefix("seeds:")?)))
            .ok_or_else(|| ParseError::MissingData("missing `seeds:` line".into()))
            .and_then(|(idx, rest)| parse_numbers(rest, idx))?;

        let mut maps: Vec<Mapping> = Vec::new();
        for (line_idx, line) in lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.ends_with("map:") {
                maps.push(Mapping::default());
                continue;
            }
            let current = maps
                .last_mut()
                .ok_or_else(|| ParseError::at_line(line_idx, "rule before any map header"))?;
            let [dst, src, len] = parse_numbers(line, line_idx)?[..] else {
                return Err(ParseError::at_line(line_idx, "expected `destination source length`"));
            };
            current.rules.push(Rule { src, dst, len });
        }

        if maps.is_empty() {
            return Err(ParseError::MissingData("no maps".into()));
        }
        for map in &mut maps {
            map.rules.sort_unstable();
        }
        Ok(Almanac { seeds, maps })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .seeds
            .iter()
            .map(|&seed| shared.maps.iter().fold(seed, |v, m| m.apply(v)))
            .min()
            .map(|loc| loc.to_string())
            .ok_or_else(|| anyhow!("no seeds").into())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.seeds.len() % 2 != 0 {
            return Err(anyhow!("seed ranges need an even count of numbers, found {}", shared.seeds.len()).into());
        }
        let seeds: Vec<_> = shared
            .seeds
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[0] + pair[1]))
            .collect();
        shared
            .maps
            .iter()
            .fold(seeds, |ranges, m| m.apply_ranges(&ranges))
            .into_iter()
            .filter(|(start, end)| start < end)
            .map(|(start, _)| start)
            .min()
            .map(|loc| loc.to_string())
            .ok_or_else(|| anyhow!("no seed ranges").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "35");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "46");
    }

    #[test]
    fn test_range_split() {
        let map = Mapping {
            rules: vec![Rule { src: 10, dst: 100, len: 5 }],
        };
        assert_eq!(map.apply_ranges(&[(8, 20)]), vec![(8, 10), (100, 105), (15, 20)]);
        assert_eq!(map.apply_ranges(&[(11, 13)]), vec![(101, 103)]);
        assert_eq!(map.apply(14), 104);
        assert_eq!(map.apply(15), 15);
    }
}

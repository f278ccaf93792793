//! Aplenty

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 19, tags = ["intervals", "parsing"])]
pub struct Solver;

const RATING_RANGE: (u64, u64) = (1, 4000);
const CATEGORIES: &str = "xmas";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Accept,
    Reject,
    Workflow(usize),
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    category: usize,
    less_than: bool,
    value: u64,
    target: Target,
}

impl Rule {
    fn matches(&self, part: &[u64; 4]) -> bool {
        let rating = part[self.category];
        if self.less_than { rating < self.value } else { rating > self.value }
    }
}

#[derive(Debug, Clone)]
struct Workflow {
    rules: Vec<Rule>,
    fallback: Target,
}

#[derive(Debug)]
pub struct System {
    workflows: Vec<Workflow>,
    start: usize,
    /// x, m, a, s ratings of each part
    parts: Vec<[u64; 4]>,
}

impl System {
    fn accepts(&self, part: &[u64; 4]) -> bool {
        let mut current = self.start;
        loop {
            let workflow = &self.workflows[current];
            let target = workflow
                .rules
                .iter()
                .find(|r| r.matches(part))
                .map_or(workflow.fallback, |r| r.target);
            match target {
                Target::Accept => return true,
                Target::Reject => return false,
                Target::Workflow(next) => current = next,
            }
        }
    }

    /// Combinations within the inclusive `ranges` that end up accepted
    fn accepted_combinations(&self, target: Target, mut ranges: [(u64, u64); 4]) -> u64 {
        let workflow = match target {
            Target::Accept => return ranges.iter().map(|(lo, hi)| hi - lo + 1).product(),
            Target::Reject => return 0,
            Target::Workflow(idx) => &self.workflows[idx],
        };

        let mut total = 0;
        for rule in &workflow.rules {
            let (lo, hi) = ranges[rule.category];
            let (pass, fail) = if rule.less_than {
                ((lo, hi.min(rule.value.saturating_sub(1))), (lo.max(rule.value), hi))
            } else {
                ((lo.max(rule.value + 1), hi), (lo, hi.min(rule.value)))
            };
            if pass.0 <= pass.1 {
                let mut split = ranges;
                split[rule.category] = pass;
                total += self.accepted_combinations(rule.target, split);
            }
            if fail.0 > fail.1 {
                return total;
            }
            ranges[rule.category] = fail;
        }
        total + self.accepted_combinations(workflow.fallback, ranges)
    }
}

/// A workflow that can be reached again from itself, if any
fn find_cycle(workflows: &[Workflow]) -> Option<usize> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Open,
        Done,
    }
    let mut marks = vec![Mark::New; workflows.len()];
    let successors = |idx: usize| {
        let workflow = &workflows[idx];
        workflow
            .rules
            .iter()
            .map(|r| r.target)
            .chain(std::iter::once(workflow.fallback))
            .filter_map(|t| match t {
                Target::Workflow(next) => Some(next),
                _ => None,
            })
            .collect::<Vec<_>>()
    };

    for root in 0..workflows.len() {
        if marks[root] != Mark::New {
            continue;
        }
        marks[root] = Mark::Open;
        let mut stack = vec![(root, successors(root), 0)];
        while let Some((node, next, i)) = stack.last_mut() {
            match next.get(*i).copied() {
                Some(child) => {
                    *i += 1;
                    match marks[child] {
                        Mark::Open => return Some(child),
                        Mark::New => {
                            marks[child] = Mark::Open;
                            stack.push((child, successors(child), 0));
                        }
                        Mark::Done => {}
                    }
                }
                None => {
                    marks[*node] = Mark::Done;
                    stack.pop();
                }
            }
        }
    }
    None
}

fn parse_rule<'a>(s: &'a str, line_idx: usize) -> Result<(usize, bool, u64, &'a str), ParseError> {
    let bad = || ParseError::at_line(line_idx, format!("bad rule {s:?}"));
    let (cond, target) = s.split_once(':').ok_or_else(bad)?;
    let mut chars = cond.chars();
    let category = chars.next().and_then(|c| CATEGORIES.find(c)).ok_or_else(bad)?;
    let less_than = match chars.next() {
        Some('<') => true,
        Some('>') => false,
        _ => return Err(bad()),
    };
    let value = cond[2..].parse().map_err(|_| bad())?;
    Ok((category, less_than, value, target))
}

impl AocParser for Solver {
    type SharedData<'a> = System;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (workflow_text, parts_text) = input
            .split_once("\n\n")
            .ok_or_else(|| ParseError::MissingData("expected workflows, a blank line, then parts".into()))?;

        // Names first, so rules can refer to workflows defined later
        let raw: Vec<(usize, &str, &str)> = workflow_text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                let (name, body) = line
                    .trim()
                    .strip_suffix('}')
                    .and_then(|l| l.split_once('{'))
                    .ok_or_else(|| ParseError::at_line(line_idx, "expected `name{rules}`"))?;
                Ok((line_idx, name, body))
            })
            .collect::<Result<_, ParseError>>()?;
        let index: HashMap<&str, usize> = raw.iter().enumerate().map(|(i, &(_, name, _))| (name, i)).collect();
        let resolve = |name: &str, line_idx: usize| match name {
            "A" => Ok(Target::Accept),
            "R" => Ok(Target::Reject),
            _ => index
                .get(name)
                .map(|&i| Target::Workflow(i))
                .ok_or_else(|| ParseError::at_line(line_idx, format!("unknown workflow {name:?}"))),
        };

        let workflows = raw
            .iter()
            .map(|&(line_idx, _, body)| {
                let mut items: Vec<&str> = body.split(',').collect();
                let fallback = resolve(items.pop().unwrap_or_default(), line_idx)?;
                let rules = items
                    .into_iter()
                    .map(|item| {
                        let (category, less_than, value, target) = parse_rule(item, line_idx)?;
                        Ok(Rule {
                            category,
                            less_than,
                            value,
                            target: resolve(target, line_idx)?,
                        })
                    })
                    .collect::<Result<_, ParseError>>()?;
                Ok(Workflow { rules, fallback })
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        if let Some(idx) = find_cycle(&workflows) {
            return Err(ParseError::InvalidFormat(format!("workflow {:?} loops back to itself", raw[idx].1)));
        }

        let offset = workflow_text.lines().count() + 1;
        let parts = parts_text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                let line_idx = offset + idx;
                let ratings = line
                    .trim()
                    .strip_prefix('{')
                    .and_then(|l| l.strip_suffix('}'))
                    .ok_or_else(|| ParseError::at_line(line_idx, "expected `{x=..,m=..,a=..,s=..}`"))?;
                let mut part = [0u64; 4];
                for rating in ratings.split(',') {
                    let (key, value) = rating
                        .split_once('=')
                        .ok_or_else(|| ParseError::at_line(line_idx, format!("bad rating {rating:?}")))?;
                    let category = CATEGORIES
                        .find(key)
                        .filter(|_| key.len() == 1)
                        .ok_or_else(|| ParseError::at_line(line_idx, format!("unknown category {key:?}")))?;
                    part[category] = value.parse().map_err(|e| ParseError::at_line(line_idx, e))?;
                }
                Ok(part)
            })
            .collect::<Result<_, ParseError>>()?;

        let start = *index
            .get("in")
            .ok_or_else(|| ParseError::MissingData("no `in` workflow".into()))?;
        Ok(System {
            workflows,
            start,
            parts,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared
            .parts
            .iter()
            .filter(|p| shared.accepts(p))
            .map(|p| p.iter().sum::<u64>())
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let combos = shared.accepted_combinations(Target::Workflow(shared.start), [RATING_RANGE; 4]);
        Ok(combos.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
px{a<2006:qkq,m>2090:A,rfg}
pv{a>1716:R,A}
lnx{m>1548:A,A}
rfg{s<537:gd,x>2440:R,A}
qs{s>3448:A,lnx}
qkq{x<1416:A,crn}
crn{x>2662:A,R}
in{s<1351:px,qqz}
qqz{s>2770:qs,m<1801:hdj,R}
gd{a>3333:R,R}
hdj{m>838:A,pv}

{x=787,m=2655,a=1222,s=2876}
{x=1679,m=44,a=2067,s=496}
{x=2036,m=264,a=79,s=2244}
{x=2461,m=1339,a=466,s=291}
{x=2127,m=1623,a=2188,s=1013}
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "19114");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "167409079868000");
    }

    #[test]
    fn test_single_rule_combinations() {
        let system = Solver::parse("in{x<11:A,R}\n\n{x=1,m=1,a=1,s=1}\n").unwrap();
        let combos = system.accepted_combinations(Target::Workflow(system.start), [RATING_RANGE; 4]);
        assert_eq!(combos, 10 * 4000 * 4000 * 4000);
        assert!(system.accepts(&[10, 1, 1, 1]));
        assert!(!system.accepts(&[11, 1, 1, 1]));
    }

    #[test]
    fn test_looping_workflows_rejected() {
        let err = Solver::parse("in{x<11:ab,R}\nab{m>5:in,A}\n\n{x=1,m=1,a=1,s=1}\n").unwrap_err();
        assert!(err.to_string().contains("loops back"), "{err}");
    }

    #[test]
    fn test_unknown_workflow_target() {
        let err = Solver::parse("in{x<11:zz,R}\n\n{x=1,m=1,a=1,s=1}\n").unwrap_err();
        assert!(err.to_string().contains("unknown workflow"), "{err}");
    }
}

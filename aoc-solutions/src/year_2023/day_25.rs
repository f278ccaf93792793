//! Snowverload

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use anyhow::anyhow;
use std::collections::{HashMap, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2023, day = 25, tags = ["graph", "max-flow"])]
pub struct Solver;

const WIRES_TO_CUT: usize = 3;

/// Undirected component graph, nodes numbered in order of first mention
#[derive(Debug)]
pub struct Wiring {
    adjacency: Vec<Vec<usize>>,
}

type Flow = HashMap<(usize, usize), i32>;

impl Wiring {
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// BFS parents over edges with spare capacity; the source is its own parent
    fn residual_bfs(&self, source: usize, flow: &Flow) -> Vec<Option<usize>> {
        let mut parents = vec![None; self.adjacency.len()];
        parents[source] = Some(source);
        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            for &next in &self.adjacency[node] {
                if parents[next].is_none() && flow.get(&(node, next)).copied().unwrap_or(0) < 1 {
                    parents[next] = Some(node);
                    queue.push_back(next);
                }
            }
        }
        parents
    }

    /// Size of the `source` side when exactly `wires` edge-disjoint paths
    /// join `source` and `sink`.
    ///
    /// Returns `None` if the two are joined by more or fewer paths, in which
    /// case they don't lie on opposite sides of a `wires`-edge cut.
    pub fn cut_side(&self, source: usize, sink: usize, wires: usize) -> Option<usize> {
        let mut flow = Flow::new();
        for _ in 0..wires {
            let parents = self.residual_bfs(source, &flow);
            parents[sink]?;
            let mut node = sink;
            while node != source {
                let prev = parents[node]?;
                *flow.entry((prev, node)).or_default() += 1;
                *flow.entry((node, prev)).or_default() -= 1;
                node = prev;
            }
        }

        let reached = self.residual_bfs(source, &flow);
        if reached[sink].is_some() {
            return None;
        }
        Some(reached.iter().filter(|p| p.is_some()).count())
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Wiring;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut ids: HashMap<&str, usize> = HashMap::new();
        let mut adjacency: Vec<Vec<usize>> = Vec::new();
        let mut node = |name: &'a str| {
            *ids.entry(name).or_insert_with(|| {
                adjacency.push(Vec::new());
                adjacency.len() - 1
            })
        };
        let mut edges = Vec::new();

        for (line_idx, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (from, to) = line
                .split_once(':')
                .ok_or_else(|| ParseError::at_line(line_idx, format!("expected `name: names`, got {line:?}")))?;
            let from = node(from.trim());
            for name in to.split_whitespace() {
                edges.push((from, node(name)));
            }
        }

        for (a, b) in edges {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        if adjacency.len() < 2 {
            return Err(ParseError::MissingData("need at least two components".into()));
        }
        Ok(Wiring { adjacency })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let side = (1..shared.len())
            .find_map(|sink| shared.cut_side(0, sink, WIRES_TO_CUT))
            .ok_or_else(|| anyhow!("no cut of {WIRES_TO_CUT} wires splits the graph"))?;
        Ok((side * (shared.len() - side)).to_string())
    }
}

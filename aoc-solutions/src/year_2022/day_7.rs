//! No Space Left On Device

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet};

use crate::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 7, tags = ["parsing", "tree", "dp"])]
pub struct Solver;

const SMALL_DIR_LIMIT: u64 = 100_000;
const DISK_SIZE: u64 = 70_000_000;
const NEEDED_SPACE: u64 = 30_000_000;

/// Total size of every directory; index 0 is `/`
pub type DirSizes = Vec<u64>;

type Path<'a> = Vec<&'a str>;

/// Files and subdirectories seen directly inside one directory
#[derive(Debug, Default)]
struct Listing<'a> {
    files: HashMap<&'a str, u64>,
    subdirs: HashSet<&'a str>,
}

#[derive(Debug)]
struct DirTree<'a> {
    listings: HashMap<Path<'a>, Listing<'a>>,
    /// Directories in order of first mention, root first
    order: Vec<Path<'a>>,
}

impl<'a> DirTree<'a> {
    fn new() -> Self {
        Self {
            listings: HashMap::from([(Vec::new(), Listing::default())]),
            order: vec![Vec::new()],
        }
    }

    fn dir(&mut self, path: &[&'a str]) -> &mut Listing<'a> {
        if !self.listings.contains_key(path) {
            self.order.push(path.to_vec());
        }
        self.listings.entry(path.to_vec()).or_default()
    }

    fn add_subdir(&mut self, path: &[&'a str], name: &'a str) {
        self.dir(path).subdirs.insert(name);
        let mut sub = path.to_vec();
        sub.push(name);
        self.dir(&sub);
    }
}

/// A directory's total is its own files plus the totals of its subdirectories
impl<'a> DpProblem<Path<'a>, u64> for DirTree<'a> {
    fn deps(&self, dir: &Path<'a>) -> Vec<Path<'a>> {
        self.listings.get(dir).map_or_else(Vec::new, |listing| {
            listing
                .subdirs
                .iter()
                .map(|&name| {
                    let mut sub = dir.clone();
                    sub.push(name);
                    sub
                })
                .collect()
        })
    }

    fn compute(&self, dir: &Path<'a>, subdirs: Vec<u64>) -> u64 {
        let files: u64 = self.listings.get(dir).map_or(0, |l| l.files.values().sum());
        files + subdirs.iter().sum::<u64>()
    }
}

impl AocParser for Solver {
    type SharedData<'a> = DirSizes;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut tree = DirTree::new();
        let mut path: Path<'a> = Vec::new();

        for (line_idx, line) in input.lines().enumerate() {
            let line = line.trim();
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields[..] {
                [] | ["$", "ls"] => {}
                ["dir", name] => tree.add_subdir(&path, name),
                ["$", "cd", "/"] => path.clear(),
                ["$", "cd", ".."] => {
                    if path.pop().is_none() {
                        return Err(ParseError::at_line(line_idx, "cd .. from the root"));
                    }
                }
                ["$", "cd", name] => {
                    tree.add_subdir(&path, name);
                    path.push(name);
                }
                [size, name] => {
                    let size: u64 = size.parse().map_err(|e| ParseError::at_line(line_idx, e))?;
                    tree.dir(&path).files.insert(name, size);
                }
                _ => return Err(ParseError::at_line(line_idx, format!("unrecognized line {line:?}"))),
            }
        }

        let order = std::mem::take(&mut tree.order);
        let totals = DpCache::new(HashMapBackend::new(), tree);
        Ok(order.iter().map(|dir| totals.get(dir)).collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u64 = shared.iter().filter(|&&s| s <= SMALL_DIR_LIMIT).sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let free = DISK_SIZE
            .checked_sub(shared[0])
            .ok_or_else(|| anyhow!("used space {} exceeds the disk", shared[0]))?;
        let to_free = NEEDED_SPACE.saturating_sub(free);
        shared
            .iter()
            .filter(|&&s| s >= to_free)
            .min()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("no directory frees {to_free}").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const EXAMPLE: &str = "\
$ cd /
$ ls
dir a
14848514 b.txt
8504156 c.dat
dir d
$ cd a
$ ls
dir e
29116 f
2557 g
62596 h.lst
$ cd e
$ ls
584 i
$ cd ..
$ cd ..
$ cd d
$ ls
4060174 j
8033020 d.log
5626152 d.ext
7214296 k
";

    #[test]
    fn test_example() {
        assert_eq!(solve::<Solver>(EXAMPLE, 1), "95437");
        assert_eq!(solve::<Solver>(EXAMPLE, 2), "24933642");
    }

    #[test]
    fn test_directory_sizes() {
        let mut sizes = Solver::parse(EXAMPLE).unwrap();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![584, 94853, 24933642, 48381165]);
    }

    #[test]
    fn test_repeated_listing_counted_once() {
        let input = "$ cd /\n$ ls\n10 a\n$ cd x\n$ ls\n5 b\n$ cd ..\n$ ls\n10 a\n$ cd x\n$ ls\n5 b\n";
        assert_eq!(Solver::parse(input).unwrap(), vec![15, 5]);
    }

    #[test]
    fn test_nested_totals_include_unvisited_dirs() {
        let input = "$ cd /\n$ ls\ndir p\ndir q\n$ cd p\n$ ls\ndir r\n7 f\n$ cd r\n$ ls\n3 g\n";
        // order of first mention: /, p, q, r
        assert_eq!(Solver::parse(input).unwrap(), vec![10, 10, 0, 3]);
    }
}

//! Dense 2D grids parsed from character maps

use aoc_solver::ParseError;
use std::fmt::Display;
use std::ops::{Index, IndexMut};

/// A cell position, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// `(d_row, d_col)`
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub const fn turn_left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    pub const fn turn_right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Index into [`Direction::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Row-major grid of cells with a fixed width and height
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Parse a rectangular character map, converting every cell with `f`.
    ///
    /// Trailing blank lines are ignored. Ragged rows or conversion failures
    /// are reported with their line number.
    pub fn parse_with<E, F>(input: &str, mut f: F) -> Result<Self, ParseError>
    where
        E: Display,
        F: FnMut(char) -> Result<T, E>,
    {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::with_capacity(input.len());

        for (line_idx, line) in input.trim_end().lines().enumerate() {
            let line = line.trim_end();
            let row_width = line.chars().count();
            match width {
                None => width = Some(row_width),
                Some(w) if w != row_width => {
                    return Err(ParseError::at_line(
                        line_idx,
                        format!("expected {w} columns, found {row_width}"),
                    ));
                }
                Some(_) => {}
            }
            for c in line.chars() {
                cells.push(f(c).map_err(|e| ParseError::at_line(line_idx, e))?);
            }
            height += 1;
        }

        match width {
            Some(width) if width > 0 => Ok(Self {
                width,
                height,
                cells,
            }),
            _ => Err(ParseError::MissingData("empty grid".into())),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        if pos.row < self.height && pos.col < self.width {
            self.cells.get(pos.row * self.width + pos.col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        if pos.row < self.height && pos.col < self.width {
            self.cells.get_mut(pos.row * self.width + pos.col)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = &T> {
        self.cells.iter().skip(col).step_by(self.width)
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<T> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Pos::new(row, col)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        self.positions().zip(self.cells.iter())
    }

    /// First position (row-major) whose cell matches
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Pos> {
        self.iter().find(|&(_, c)| pred(c)).map(|(p, _)| p)
    }

    /// Neighbour of `pos` in direction `dir`, if inside the grid
    pub fn step(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        (row < self.height && col < self.width).then_some(Pos::new(row, col))
    }

    /// The up to four orthogonal neighbours of `pos`
    pub fn neighbors4(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        Direction::ALL.into_iter().filter_map(move |d| self.step(pos, d))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Flat cell storage, row-major
    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}

impl Grid<u8> {
    /// Parse a character map keeping the raw bytes
    pub fn parse_bytes(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, |c| {
            if c.is_ascii() {
                Ok(c as u8)
            } else {
                Err(format!("non-ASCII character {c:?}"))
            }
        })
    }

    /// Render back into the character map it was parsed from
    pub fn render(&self) -> String {
        self.rows()
            .map(|row| String::from_utf8_lossy(row).into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<T> Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &T {
        &self.cells[pos.row * self.width + pos.col]
    }
}

impl<T> IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut T {
        &mut self.cells[pos.row * self.width + pos.col]
    }
}

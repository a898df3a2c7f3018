//! Dense 3-D arrays and the rotation group of the cube.
//!
//! Piece postures and solved volumes are both `Grid3` values, so the same
//! two quarter turns orient pieces and compare solutions.
//!
//! Axes, outermost first: planes (height), rows (depth), cells (width).
//! A cell lives at flat index `(plane * depth + row) * width + cell`.

use std::ops::{Index, IndexMut};

/// A unit-cube coordinate `(x, y, z)`: x runs along a row, y across rows,
/// z up through the planes.
pub type Coord = (i32, i32, i32);

/// A `(plane, row, cell)` position inside a grid.
pub type Position = (usize, usize, usize);

/// Number of proper rotations of a cube.
pub const NUM_ROTATIONS: usize = 24;

/// A height x depth x width array stored in one flat vector.
///
/// Equality and ordering are structural and include the dimensions, so two
/// grids of different shapes never compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Grid3<T> {
    height: usize,
    depth: usize,
    width: usize,
    cells: Vec<T>,
}

impl<T> Grid3<T> {
    /// Builds a grid by evaluating `f` at every `(plane, row, cell)`.
    pub fn from_fn(
        height: usize,
        depth: usize,
        width: usize,
        mut f: impl FnMut(Position) -> T,
    ) -> Self {
        let mut cells = Vec::with_capacity(height * depth * width);
        for plane in 0..height {
            for row in 0..depth {
                for cell in 0..width {
                    cells.push(f((plane, row, cell)));
                }
            }
        }
        Self {
            height,
            depth,
            width,
            cells,
        }
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn depth(&self) -> usize {
        self.depth
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    /// `(height, depth, width)`.
    pub const fn dims(&self) -> (usize, usize, usize) {
        (self.height, self.depth, self.width)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Converts a position to a flat cell index.
    #[inline(always)]
    pub const fn index_of(&self, (plane, row, cell): Position) -> usize {
        (plane * self.depth + row) * self.width + cell
    }

    /// Converts a flat cell index back to its position.
    #[inline(always)]
    pub const fn position_of(&self, index: usize) -> Position {
        let plane = index / (self.depth * self.width);
        let rest = index % (self.depth * self.width);
        (plane, rest / self.width, rest % self.width)
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        let (plane, row, cell) = position;
        if plane < self.height && row < self.depth && cell < self.width {
            self.cells.get(self.index_of(position))
        } else {
            None
        }
    }

    /// The cells in flat index order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// Iterates `(position, value)` pairs in flat index order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, value)| (self.position_of(index), value))
    }

    /// Applies `f` to every cell, in flat index order.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid3<U> {
        Grid3 {
            height: self.height,
            depth: self.depth,
            width: self.width,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Grid3<T> {
    /// A grid with every cell set to `value`.
    pub fn filled(height: usize, depth: usize, width: usize, value: T) -> Self {
        Self {
            height,
            depth,
            width,
            cells: vec![value; height * depth * width],
        }
    }

    /// Quarter turn in the height x depth plane.
    ///
    /// Reverses the planes, then swaps the plane and row axes. The result is
    /// `depth x height x width`.
    pub fn spun(&self) -> Self {
        let height = self.height;
        Self::from_fn(self.depth, self.height, self.width, |(a, b, c)| {
            self[(height - 1 - b, a, c)].clone()
        })
    }

    /// Quarter turn of every plane in the depth x width face.
    ///
    /// Reverses the rows of each plane, then swaps the row and cell axes.
    /// The result is `height x width x depth`.
    pub fn tumbled(&self) -> Self {
        let depth = self.depth;
        Self::from_fn(self.height, self.width, self.depth, |(p, a, b)| {
            self[(p, depth - 1 - b, a)].clone()
        })
    }

    /// Reflection that reverses the plane axis.
    pub fn mirrored(&self) -> Self {
        let height = self.height;
        Self::from_fn(self.height, self.depth, self.width, |(p, r, c)| {
            self[(height - 1 - p, r, c)].clone()
        })
    }

    /// Applies one entry of [`ROTATIONS`].
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let mut grid = self.clone();
        for _ in 0..rotation.pre_spins {
            grid = grid.spun();
        }
        for _ in 0..rotation.tumbles {
            grid = grid.tumbled();
        }
        for _ in 0..rotation.spins {
            grid = grid.spun();
        }
        grid
    }

    /// All 24 rotations of this grid, in table order. Duplicates are kept.
    pub fn rotations(&self) -> impl Iterator<Item = Self> + '_ {
        ROTATIONS.iter().map(move |&rotation| self.rotated(rotation))
    }
}

impl<T> Index<Position> for Grid3<T> {
    type Output = T;

    fn index(&self, position: Position) -> &T {
        &self.cells[self.index_of(position)]
    }
}

impl<T> IndexMut<Position> for Grid3<T> {
    fn index_mut(&mut self, position: Position) -> &mut T {
        let index = self.index_of(position);
        &mut self.cells[index]
    }
}

/// One proper rotation, written as a composition of quarter turns:
/// `pre_spins` spins, then `tumbles` tumbles, then `spins` spins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rotation {
    pub pre_spins: u8,
    pub tumbles: u8,
    pub spins: u8,
}

impl Rotation {
    pub const IDENTITY: Self = Self {
        pre_spins: 0,
        tumbles: 0,
        spins: 0,
    };
}

/// Every proper rotation of the cube, each exactly once.
///
/// Six "face" positions (0 to 3 tumbles, plus the two poles reached by a
/// spin followed by one or three tumbles), each followed by 0 to 3 spins.
/// Entry 0 is the identity.
pub const ROTATIONS: [Rotation; NUM_ROTATIONS] = build_rotation_table();

const fn build_rotation_table() -> [Rotation; NUM_ROTATIONS] {
    // (pre_spins, tumbles) for each face position
    const FACES: [(u8, u8); 6] = [(0, 0), (0, 1), (0, 2), (0, 3), (1, 1), (1, 3)];

    let mut table = [Rotation::IDENTITY; NUM_ROTATIONS];
    let mut face = 0;
    while face < FACES.len() {
        let mut spins = 0;
        while spins < 4 {
            table[face * 4 + spins] = Rotation {
                pre_spins: FACES[face].0,
                tumbles: FACES[face].1,
                spins: spins as u8,
            };
            spins += 1;
        }
        face += 1;
    }
    table
}

//! The target volume and its solved snapshots.

use std::fmt;

use crate::grid::Grid3;

/// State of one volume cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cell {
    /// Still to be covered.
    Empty,
    /// Pre-filled or outside the target shape; never covered.
    Dead,
    /// Covered by the named piece.
    Piece(char),
}

impl Cell {
    pub const fn piece(self) -> Option<char> {
        match self {
            Self::Piece(name) => Some(name),
            Self::Empty | Self::Dead => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("*"),
            Self::Dead => f.write_str("."),
            Self::Piece(name) => write!(f, "{name}"),
        }
    }
}

/// A working volume during search, or a solution once every live cell
/// carries a piece label.
pub type Volume = Grid3<Cell>;

impl Grid3<Cell> {
    /// True once no cell is left empty.
    pub fn is_complete(&self) -> bool {
        self.cells().iter().all(|&cell| cell != Cell::Empty)
    }

    /// Number of cells labelled with `name`.
    pub fn count_of(&self, name: char) -> usize {
        self.cells()
            .iter()
            .filter(|cell| cell.piece() == Some(name))
            .count()
    }
}

/// Plain text: one line per row from back to front, planes side by side
/// from bottom to top, separated by `" / "`.
impl fmt::Display for Grid3<Cell> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.depth()).rev() {
            for plane in 0..self.height() {
                if plane > 0 {
                    f.write_str(" / ")?;
                }
                for cell in 0..self.width() {
                    write!(f, "{}", self[(plane, row, cell)])?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_plane_rendering() {
        let mut volume = Volume::filled(1, 2, 2, Cell::Piece('1'));
        volume[(0, 0, 1)] = Cell::Dead;
        insta::assert_snapshot!(volume.to_string().trim_end(), @r"
        11
        1.
        ");
    }

    #[test]
    fn test_planes_render_side_by_side() {
        let volume = Volume::from_fn(2, 2, 3, |(plane, row, cell)| match (plane, row, cell) {
            (0, 0, _) => Cell::Piece('a'),
            (0, 1, 0) => Cell::Dead,
            (1, _, 2) => Cell::Piece('b'),
            _ => Cell::Empty,
        });
        insta::assert_snapshot!(volume.to_string().trim_end(), @r"
        .** / **b
        aaa / **b
        ");
    }

    #[test]
    fn test_completeness_and_counts() {
        let mut volume = Volume::filled(1, 1, 3, Cell::Piece('x'));
        assert!(volume.is_complete());
        assert_eq!(volume.count_of('x'), 3);
        volume[(0, 0, 0)] = Cell::Empty;
        assert!(!volume.is_complete());
        assert_eq!(volume.count_of('x'), 2);
        assert_eq!(Cell::Dead.piece(), None);
        assert_eq!(Cell::Piece('q').piece(), Some('q'));
    }
}

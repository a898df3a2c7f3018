//! Error types for puzzle construction.
//!
//! The search itself cannot fail: every error here is raised while the
//! catalogue, the volume or the puzzle is being validated, before any
//! placement row is generated.

use std::fmt;

/// Everything that can make a puzzle unsolvable by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// A volume dimension was zero
    InvalidDimension {
        /// Requested height
        height: usize,
        /// Requested depth
        depth: usize,
        /// Requested width
        width: usize,
    },

    /// A live cell was given at a negative coordinate
    NegativeCoordinate {
        /// The offending coordinate
        coord: (i32, i32, i32),
    },

    /// A piece shape has no cubes or a zero dimension
    EmptyPiece {
        /// Name of the piece
        name: char,
    },

    /// Piece names must be single printable characters
    InvalidPieceName {
        /// The rejected name
        name: char,
    },

    /// The same name was given to two pieces
    DuplicatePiece {
        /// The repeated name
        name: char,
    },

    /// A piece was requested that the catalogue does not contain
    UnknownPiece {
        /// The missing name
        name: char,
    },

    /// The catalogue holds no pieces
    EmptyCatalogue,

    /// The volume has no live cells
    EmptyVolume,

    /// A piece does not fit inside the volume in any orientation
    PieceTooLarge {
        /// Name of the piece
        name: char,
        /// Volume dimensions `(height, depth, width)`
        volume: (usize, usize, usize),
    },

    /// The pieces cannot exactly fill the live cells
    ///
    /// Detected before the search; distinct from a search that runs to
    /// completion and finds nothing.
    CellCountMismatch {
        /// Cells left to cover once dead cells are removed
        live_cells: usize,
        /// Cubes in the whole catalogue
        piece_cells: usize,
    },

    /// The dead cells leave a piece with no legal placement, even though it
    /// fits the bounding box
    NoPlacement {
        /// Name of the piece
        name: char,
    },
}

impl PuzzleError {
    /// True for instances that are well formed but cannot possibly be tiled.
    pub const fn is_infeasible(&self) -> bool {
        matches!(
            self,
            Self::CellCountMismatch { .. } | Self::NoPlacement { .. }
        )
    }
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension {
                height,
                depth,
                width,
            } => {
                write!(
                    f,
                    "Invalid volume {height}x{depth}x{width}: every dimension must be at least 1"
                )
            }
            Self::NegativeCoordinate { coord } => {
                write!(f, "Live cell {coord:?} has a negative coordinate")
            }
            Self::EmptyPiece { name } => write!(f, "Piece '{name}' has no cubes"),
            Self::InvalidPieceName { name } => {
                write!(f, "Piece name {name:?} is not a printable character")
            }
            Self::DuplicatePiece { name } => write!(f, "Piece '{name}' is defined twice"),
            Self::UnknownPiece { name } => write!(f, "Piece '{name}' is not in the catalogue"),
            Self::EmptyCatalogue => write!(f, "The piece catalogue is empty"),
            Self::EmptyVolume => write!(f, "The volume has no live cells"),
            Self::PieceTooLarge { name, volume } => {
                let (height, depth, width) = volume;
                let dims = format!("{height}x{depth}x{width}");
                write!(
                    f,
                    "Piece '{name}' does not fit in a {dims} volume in any orientation"
                )
            }
            Self::CellCountMismatch {
                live_cells,
                piece_cells,
            } => {
                write!(
                    f,
                    "Pieces have {piece_cells} cubes but the volume has {live_cells} live cells"
                )
            }
            Self::NoPlacement { name } => {
                write!(f, "Piece '{name}' has no placement that avoids the dead cells")
            }
        }
    }
}

impl std::error::Error for PuzzleError {}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infeasible_errors() {
        let mismatch = PuzzleError::CellCountMismatch {
            live_cells: 26,
            piece_cells: 27,
        };
        assert!(mismatch.is_infeasible());
        assert!(PuzzleError::NoPlacement { name: '1' }.is_infeasible());
        assert!(!PuzzleError::EmptyCatalogue.is_infeasible());
        assert!(!PuzzleError::PieceTooLarge {
            name: 'x',
            volume: (1, 1, 1)
        }
        .is_infeasible());
    }

    #[test]
    fn test_display_names_the_piece() {
        let err = PuzzleError::PieceTooLarge {
            name: 'L',
            volume: (1, 2, 2),
        };
        assert_eq!(
            err.to_string(),
            "Piece 'L' does not fit in a 1x2x2 volume in any orientation"
        );
        assert_eq!(
            PuzzleError::NoPlacement { name: '1' }.to_string(),
            "Piece '1' has no placement that avoids the dead cells"
        );
    }
}

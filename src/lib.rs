//! Polycube Dissection Solver Library
//!
//! Finds every way to pack a set of named polycube pieces into a 3D volume,
//! using Algorithm X over a dancing-links matrix, and keeps one solution per
//! class of rotations, reflections and swaps of congruent pieces.

pub mod config;
pub mod error;
pub mod grid;
pub mod matrix;
pub mod pieces;
pub mod placement;
pub mod posture;
pub mod progress;
pub mod puzzle;
pub mod solver;
pub mod symmetry;
pub mod volume;

pub use config::SolveConfig;
pub use error::{PuzzleError, Result};
pub use pieces::Builtin;
pub use placement::VolumeShape;
pub use posture::{Equivalences, PieceCatalogue};
pub use puzzle::{Puzzle, SolveReport};
pub use volume::{Cell, Volume};

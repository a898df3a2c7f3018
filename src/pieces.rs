//! Built-in piece sets and the puzzles that use them.
//!
//! Each piece is a set of unit cube positions, normalized to start at the
//! origin, under a single-character name.

use crate::error::Result;
use crate::grid::Coord;
use crate::placement::VolumeShape;
use crate::posture::PieceCatalogue;
use crate::puzzle::Puzzle;

/// The seven Soma cube pieces that fill a 3x3x3 cube.
pub const SOMA_PIECES: &[(char, &[Coord])] = &[
    // small L piece (3 cubes)
    ('1', &[(0, 0, 0), (1, 0, 0), (0, 1, 0)]),
    // L-shaped piece
    ('2', &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (0, 1, 0)]),
    // T-shaped piece
    ('3', &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0)]),
    // S-shaped piece
    ('4', &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 1, 0)]),
    // 3d corner, right-handed screw
    ('5', &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 0, 1)]),
    // 3d corner, left-handed screw
    ('6', &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (0, 1, 1)]),
    // tripod
    ('7', &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (0, 0, 1)]),
];

/// The six flat pieces of the diabolical cube, named by their size.
pub const DIABOLICAL_PIECES: &[(char, &[Coord])] = &[
    ('2', &[(0, 0, 0), (0, 1, 0)]),
    ('3', &[(0, 0, 0), (0, 1, 0), (0, 2, 0)]),
    ('4', &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 0, 0)]),
    ('5', &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 0, 0), (1, 2, 0)]),
    ('6', &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 0, 0), (1, 1, 0), (1, 2, 0)]),
    (
        '7',
        &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 0, 0), (1, 2, 0), (2, 0, 0), (2, 1, 0)],
    ),
];

/// The thirteen Bedlam cube pieces that fill a 4x4x4 cube.
pub const BEDLAM_PIECES: &[(char, &[Coord])] = &[
    // little corner (4 cubes)
    ('A', &[(0, 0, 0), (0, 1, 0), (1, 0, 0), (0, 0, 1)]),
    // long stick
    ('B', &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0), (3, 1, 0)]),
    // hat
    ('C', &[(0, 0, 0), (0, 1, 0), (1, 1, 0), (1, 2, 0), (2, 2, 0)]),
    // bucket
    ('D', &[(0, 0, 0), (0, 1, 0), (1, 1, 0), (1, 2, 0), (1, 1, 1)]),
    // screw
    ('E', &[(0, 0, 0), (1, 0, 0), (1, 0, 1), (1, 1, 1), (2, 1, 1)]),
    // twist
    ('F', &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (1, 1, 1), (2, 1, 1)]),
    // signpost
    ('G', &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0), (1, 0, 1)]),
    // ducktail
    ('H', &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 1, 0), (1, 0, 1)]),
    // plane
    ('I', &[(0, 0, 0), (0, 1, 0), (1, 1, 0), (2, 1, 0), (1, 2, 0)]),
    // bridge
    ('J', &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (0, 1, 0), (2, 1, 0)]),
    // staircase
    ('K', &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 1, 0), (2, 2, 0)]),
    // spikey zag
    ('L', &[(0, 0, 1), (0, 1, 0), (0, 1, 1), (1, 1, 0), (1, 2, 0)]),
    // middle zig
    ('M', &[(0, 0, 0), (0, 1, 0), (0, 1, 1), (1, 1, 0), (1, 2, 0)]),
];

/// Name of the congruent copy of a Soma piece in the double set.
pub fn soma_companion(name: char) -> char {
    match name {
        '1'..='7' => char::from(b'a' + (name as u8 - b'1')),
        other => other,
    }
}

/// A puzzle that ships with the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Builtin {
    /// Seven Soma pieces in a 3x3x3 cube
    Soma,
    /// Six flat pieces in a 3x3x3 cube
    Diabolical,
    /// Thirteen Bedlam pieces in a 4x4x4 cube
    Bedlam,
    /// Two Soma sets in a 3x3x6 box
    DoubleSoma,
}

impl Builtin {
    pub const ALL: [Self; 4] = [Self::Soma, Self::Diabolical, Self::Bedlam, Self::DoubleSoma];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Soma => "soma",
            Self::Diabolical => "diabolical",
            Self::Bedlam => "bedlam",
            Self::DoubleSoma => "double-soma",
        }
    }

    pub fn catalogue(self) -> Result<PieceCatalogue> {
        match self {
            Self::Soma => PieceCatalogue::from_cubes(SOMA_PIECES),
            Self::Diabolical => PieceCatalogue::from_cubes(DIABOLICAL_PIECES),
            Self::Bedlam => PieceCatalogue::from_cubes(BEDLAM_PIECES),
            Self::DoubleSoma => PieceCatalogue::from_cubes(SOMA_PIECES)?.doubled(soma_companion),
        }
    }

    pub fn shape(self) -> Result<VolumeShape> {
        match self {
            Self::Soma | Self::Diabolical => VolumeShape::full(3, 3, 3),
            Self::Bedlam => VolumeShape::full(4, 4, 4),
            Self::DoubleSoma => VolumeShape::full(3, 3, 6),
        }
    }

    pub fn puzzle(self) -> Result<Puzzle> {
        Puzzle::new(self.shape()?, self.catalogue()?)
    }
}

/// The Soma cube.
pub fn soma() -> Result<Puzzle> {
    Builtin::Soma.puzzle()
}

/// The diabolical cube.
pub fn diabolical() -> Result<Puzzle> {
    Builtin::Diabolical.puzzle()
}

pub fn bedlam() -> Result<Puzzle> {
    Builtin::Bedlam.puzzle()
}

/// Both Soma sets, the second named `a` to `g`.
pub fn double_soma() -> Result<Puzzle> {
    Builtin::DoubleSoma.puzzle()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_sets_fill_their_boxes() {
        for builtin in Builtin::ALL {
            let catalogue = builtin.catalogue().unwrap();
            let shape = builtin.shape().unwrap();
            assert_eq!(
                catalogue.cube_count(),
                shape.live_cell_count(),
                "{}",
                builtin.name()
            );
        }
    }

    #[test]
    fn test_every_builtin_validates() {
        for builtin in Builtin::ALL {
            assert!(builtin.puzzle().is_ok(), "{}", builtin.name());
        }
    }

    #[test]
    fn test_soma_companion_names() {
        assert_eq!(soma_companion('1'), 'a');
        assert_eq!(soma_companion('7'), 'g');
        assert_eq!(soma_companion('x'), 'x');
        let catalogue = Builtin::DoubleSoma.catalogue().unwrap();
        assert_eq!(catalogue.len(), 14);
        assert_eq!(catalogue.get('a'), catalogue.get('1'));
    }

    #[test]
    fn test_soma_equivalences() {
        let puzzle = soma().unwrap();
        let equivalences = puzzle.equivalences();
        assert!(equivalences.piece_copies.is_empty());
        assert_eq!(equivalences.mirror_of('5'), Some('6'));
        assert_eq!(equivalences.mirror_of('6'), Some('5'));
        assert_eq!(equivalences.mirror_of('3'), Some('3'));
    }

    #[test]
    fn test_double_soma_copies_pair_up() {
        let puzzle = double_soma().unwrap();
        let equivalences = puzzle.equivalences();
        assert_eq!(equivalences.copies_of('1'), Some(&['1', 'a'][..]));
        assert_eq!(equivalences.copies_of('g'), Some(&['7', 'g'][..]));
        assert_eq!(equivalences.mirror_of('f'), Some('5'));
    }
}

//! Piece shapes, their orientations and the equivalences between pieces.
//!
//! A cube has 24 proper rotations. Applying all of them to a piece and
//! removing duplicates gives its distinct postures; symmetric pieces have
//! fewer than 24. Mirror images are computed separately and only used to
//! pair chiral pieces, never placed.

use std::collections::BTreeMap;

use crate::error::{PuzzleError, Result};
use crate::grid::{Coord, Grid3, Position};

/// One piece in one orientation. Non-zero cells belong to the piece.
pub type Posture = Grid3<u8>;

impl Grid3<u8> {
    /// Builds a posture from unit-cube coordinates.
    ///
    /// x maps to cells, y to rows and z to planes. The result is translated
    /// so the minimum coordinates sit at the origin. Returns `None` for an
    /// empty slice.
    pub fn from_cubes(cubes: &[Coord]) -> Option<Self> {
        let min_x = cubes.iter().map(|&(x, _, _)| x).min()?;
        let min_y = cubes.iter().map(|&(_, y, _)| y).min()?;
        let min_z = cubes.iter().map(|&(_, _, z)| z).min()?;
        let max_x = cubes.iter().map(|&(x, _, _)| x).max()?;
        let max_y = cubes.iter().map(|&(_, y, _)| y).max()?;
        let max_z = cubes.iter().map(|&(_, _, z)| z).max()?;

        let mut posture = Self::filled(
            (max_z - min_z + 1) as usize,
            (max_y - min_y + 1) as usize,
            (max_x - min_x + 1) as usize,
            0,
        );
        for &(x, y, z) in cubes {
            let position = ((z - min_z) as usize, (y - min_y) as usize, (x - min_x) as usize);
            posture[position] = 1;
        }
        Some(posture)
    }

    /// Number of occupied cells.
    pub fn cube_count(&self) -> usize {
        self.cells().iter().filter(|&&value| value != 0).count()
    }

    /// Crops empty border planes, rows and cells. Returns `None` when no
    /// cell is occupied.
    pub fn trimmed(&self) -> Option<Self> {
        let mut bounds: Option<(Position, Position)> = None;
        for (pos, &value) in self.iter() {
            if value == 0 {
                continue;
            }
            bounds = Some(match bounds {
                None => (pos, pos),
                Some((lo, hi)) => (
                    (lo.0.min(pos.0), lo.1.min(pos.1), lo.2.min(pos.2)),
                    (hi.0.max(pos.0), hi.1.max(pos.1), hi.2.max(pos.2)),
                ),
            });
        }
        let ((p0, r0, c0), (p1, r1, c1)) = bounds?;
        Some(Self::from_fn(p1 - p0 + 1, r1 - r0 + 1, c1 - c0 + 1, |(p, r, c)| {
            self[(p + p0, r + r0, c + c0)]
        }))
    }

    /// True if some rotation of this posture fits in the given box.
    pub fn fits_within(&self, (height, depth, width): (usize, usize, usize)) -> bool {
        orientations(self).iter().any(|posture| {
            posture.height() <= height && posture.depth() <= depth && posture.width() <= width
        })
    }
}

/// Generates all unique orientations of a posture.
///
/// Applies the 24 rotations, then sorts and removes duplicates, so the
/// result is deterministic. A single cube yields one posture.
pub fn orientations(base: &Posture) -> Vec<Posture> {
    let mut postures: Vec<Posture> = base.rotations().collect();
    postures.sort();
    postures.dedup();
    postures
}

/// A posture tagged with the name of its piece.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedPosture {
    pub name: char,
    pub posture: Posture,
}

/// The pieces of one puzzle, keyed and ordered by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PieceCatalogue {
    pieces: BTreeMap<char, Posture>,
}

impl PieceCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalogue from named cube lists.
    ///
    /// # Errors
    ///
    /// Fails on empty shapes, unprintable names and repeated names.
    pub fn from_cubes(pieces: &[(char, &[Coord])]) -> Result<Self> {
        let mut catalogue = Self::new();
        for &(name, cubes) in pieces {
            catalogue.insert_cubes(name, cubes)?;
        }
        Ok(catalogue)
    }

    /// Adds a piece. The shape is cropped to its occupied bounding box.
    ///
    /// # Errors
    ///
    /// Fails on empty shapes, unprintable names and repeated names.
    pub fn insert(&mut self, name: char, shape: &Posture) -> Result<()> {
        if name.is_control() || name.is_whitespace() {
            return Err(PuzzleError::InvalidPieceName { name });
        }
        if self.pieces.contains_key(&name) {
            return Err(PuzzleError::DuplicatePiece { name });
        }
        let posture = shape.trimmed().ok_or(PuzzleError::EmptyPiece { name })?;
        self.pieces.insert(name, posture);
        Ok(())
    }

    /// Adds a piece given as unit-cube coordinates.
    ///
    /// # Errors
    ///
    /// See [`PieceCatalogue::insert`].
    pub fn insert_cubes(&mut self, name: char, cubes: &[Coord]) -> Result<()> {
        let posture = Posture::from_cubes(cubes).ok_or(PuzzleError::EmptyPiece { name })?;
        self.insert(name, &posture)
    }

    pub fn get(&self, name: char) -> Option<&Posture> {
        self.pieces.get(&name)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = char> + '_ {
        self.pieces.keys().copied()
    }

    /// Pieces in name order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Posture)> + '_ {
        self.pieces.iter().map(|(&name, posture)| (name, posture))
    }

    /// Total cubes over all pieces.
    pub fn cube_count(&self) -> usize {
        self.pieces.values().map(Posture::cube_count).sum()
    }

    /// Keeps only the named pieces.
    ///
    /// # Errors
    ///
    /// Fails if a name is missing from this catalogue.
    pub fn subset(&self, names: &[char]) -> Result<Self> {
        let mut subset = Self::new();
        for &name in names {
            let posture = self.get(name).ok_or(PuzzleError::UnknownPiece { name })?;
            subset.insert(name, posture)?;
        }
        Ok(subset)
    }

    /// A double set: every piece plus a congruent copy named `companion(name)`.
    ///
    /// # Errors
    ///
    /// Fails if a companion name collides with an existing piece.
    pub fn doubled(&self, companion: impl Fn(char) -> char) -> Result<Self> {
        let mut doubled = self.clone();
        for (name, posture) in self.iter() {
            doubled.insert(companion(name), posture)?;
        }
        Ok(doubled)
    }
}

/// The distinct postures of every piece, in catalogue order.
pub fn unique_postures(catalogue: &PieceCatalogue) -> Vec<NamedPosture> {
    catalogue
        .iter()
        .flat_map(|(name, base)| {
            orientations(base)
                .into_iter()
                .map(move |posture| NamedPosture { name, posture })
        })
        .collect()
}

/// Which pieces are interchangeable, and which are each other's mirror image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Equivalences {
    /// Piece name to the sorted names of every piece congruent to it,
    /// itself included. Pieces without a copy are absent.
    pub piece_copies: BTreeMap<char, Vec<char>>,
    /// Piece name to the smallest name whose postures contain its mirror
    /// image. Achiral pieces usually map to themselves.
    pub piece_mirrors: BTreeMap<char, char>,
}

impl Equivalences {
    /// Derives both maps from the catalogue and its full posture set.
    pub fn new(catalogue: &PieceCatalogue, postures: &[NamedPosture]) -> Self {
        let mut piece_copies: BTreeMap<char, Vec<char>> = BTreeMap::new();
        let mut piece_mirrors: BTreeMap<char, char> = BTreeMap::new();

        for (name, base) in catalogue.iter() {
            let mirror = base.mirrored();
            for other in postures {
                if other.posture == *base {
                    let copies = piece_copies.entry(name).or_default();
                    if !copies.contains(&other.name) {
                        copies.push(other.name);
                    }
                }
                if other.posture == mirror {
                    piece_mirrors
                        .entry(name)
                        .and_modify(|current| *current = (*current).min(other.name))
                        .or_insert(other.name);
                }
            }
        }

        piece_copies.retain(|_, copies| copies.len() > 1);
        for copies in piece_copies.values_mut() {
            copies.sort_unstable();
        }

        Self {
            piece_copies,
            piece_mirrors,
        }
    }

    /// The congruent pieces of `name`, if it has any copy.
    pub fn copies_of(&self, name: char) -> Option<&[char]> {
        self.piece_copies.get(&name).map(Vec::as_slice)
    }

    pub fn mirror_of(&self, name: char) -> Option<char> {
        self.piece_mirrors.get(&name).copied()
    }

    /// Label map applied when a solution is reflected.
    ///
    /// Sends the i-th member of a piece's copy class to the i-th member of
    /// its mirror's copy class. Unlike `piece_mirrors` this never merges two
    /// pieces into one label, so reflected double-set solutions still
    /// canonicalize to the form of their congruent twin.
    pub fn reflection_labels(&self) -> BTreeMap<char, char> {
        self.piece_mirrors
            .iter()
            .map(|(&name, &mirror)| {
                let own_class = self.copies_of(name).unwrap_or(&[]);
                let mirror_class = self.copies_of(mirror).unwrap_or(&[]);
                let target = own_class
                    .iter()
                    .position(|&member| member == name)
                    .and_then(|slot| mirror_class.get(slot).copied())
                    .unwrap_or(mirror);
                (name, target)
            })
            .collect()
    }
}

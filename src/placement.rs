//! Placement rows: every legal position of every posture in the volume.
//!
//! Rows are produced lazily. The first row is the column header; each
//! following row is one `(piece, posture, translation)` that stays inside
//! the volume and touches no dead cell.

use std::iter;

use crate::error::{PuzzleError, Result};
use crate::grid::{Coord, Grid3, Position};
use crate::posture::{NamedPosture, Posture};
use crate::volume::{Cell, Volume};

/// Volume dimensions plus the dead-cell mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumeShape {
    dead: Grid3<bool>,
}

impl VolumeShape {
    /// A box with no dead cells.
    ///
    /// # Errors
    ///
    /// Fails if any dimension is zero.
    pub fn full(height: usize, depth: usize, width: usize) -> Result<Self> {
        Self::with_dead(Grid3::filled(height, depth, width, false))
    }

    /// A box with the given dead mask (`true` = dead).
    ///
    /// # Errors
    ///
    /// Fails if any dimension is zero.
    pub fn with_dead(dead: Grid3<bool>) -> Result<Self> {
        let (height, depth, width) = dead.dims();
        if height == 0 || depth == 0 || width == 0 {
            return Err(PuzzleError::InvalidDimension {
                height,
                depth,
                width,
            });
        }
        Ok(Self { dead })
    }

    /// The bounding box of `live` (translated to the origin); every cell not
    /// listed is dead.
    ///
    /// # Errors
    ///
    /// Fails on an empty list or a negative coordinate.
    pub fn from_live_cells(live: &[Coord]) -> Result<Self> {
        if let Some(&coord) = live.iter().find(|&&(x, y, z)| x < 0 || y < 0 || z < 0) {
            return Err(PuzzleError::NegativeCoordinate { coord });
        }
        let shape = Posture::from_cubes(live).ok_or(PuzzleError::EmptyVolume)?;
        Self::with_dead(shape.map(|&value| value == 0))
    }

    /// Marks one cell dead.
    pub fn kill(&mut self, position: Position) {
        self.dead[position] = true;
    }

    /// `(height, depth, width)`.
    pub const fn dims(&self) -> (usize, usize, usize) {
        self.dead.dims()
    }

    pub fn cell_count(&self) -> usize {
        self.dead.len()
    }

    pub fn live_cell_count(&self) -> usize {
        self.dead.cells().iter().filter(|&&dead| !dead).count()
    }

    pub fn is_dead(&self, index: usize) -> bool {
        self.dead.cells()[index]
    }

    /// A working volume: dead cells marked, everything else empty.
    pub fn empty_volume(&self) -> Volume {
        self.dead
            .map(|&dead| if dead { Cell::Dead } else { Cell::Empty })
    }
}

/// One posture at one translation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub piece: char,
    /// One value per volume cell; non-zero where the posture lands.
    pub values: Vec<u8>,
}

impl Placement {
    /// Flat indices of the covered cells.
    pub fn covered(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, &value)| value != 0)
            .map(|(index, _)| index)
    }
}

/// One line of the incidence matrix, as generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Row {
    /// Column indices `0..columns`; column 0 holds piece names.
    Header { columns: usize },
    Placement(Placement),
}

/// Lazily generates the header row followed by every legal placement.
///
/// Postures are visited in slice order and translations plane by plane,
/// row by row, cell by cell. The sequence is finite and not restartable.
pub fn placement_rows<'a>(
    shape: &'a VolumeShape,
    postures: &'a [NamedPosture],
) -> impl Iterator<Item = Row> + 'a {
    let header = Row::Header {
        columns: shape.cell_count() + 1,
    };
    iter::once(header).chain(postures.iter().flat_map(move |named| {
        offsets(shape.dims(), named.posture.dims())
            .filter_map(move |offset| overlay(shape, named, offset))
            .map(Row::Placement)
    }))
}

/// Every translation that keeps a `posture` box inside a `volume` box.
fn offsets(
    (height, depth, width): (usize, usize, usize),
    (posture_height, posture_depth, posture_width): (usize, usize, usize),
) -> impl Iterator<Item = Position> {
    let planes = (height + 1).saturating_sub(posture_height);
    let rows = (depth + 1).saturating_sub(posture_depth);
    let cells = (width + 1).saturating_sub(posture_width);
    (0..planes).flat_map(move |plane| {
        (0..rows).flat_map(move |row| (0..cells).map(move |cell| (plane, row, cell)))
    })
}

/// Puts the posture onto a copy of the dead mask at `offset`.
///
/// Returns `None` if any covered cell is dead or already marked.
fn overlay(shape: &VolumeShape, named: &NamedPosture, offset: Position) -> Option<Placement> {
    let mut values = vec![0u8; shape.cell_count()];
    for ((plane, row, cell), &value) in named.posture.iter() {
        if value == 0 {
            continue;
        }
        let index = shape
            .dead
            .index_of((plane + offset.0, row + offset.1, cell + offset.2));
        if shape.is_dead(index) || values[index] != 0 {
            return None;
        }
        values[index] = value;
    }
    Some(Placement {
        piece: named.name,
        values,
    })
}

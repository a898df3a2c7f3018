//! Duplicate detection for solved volumes.
//!
//! Two solutions are the same if one turns into the other under a rotation
//! or reflection of the volume, once congruent pieces are treated as
//! interchangeable. Each accepted solution is stored in canonical form: every
//! label is replaced by the first unused member of its copy class, in flat
//! cell order. A new solution is a duplicate when any of its 48 images has a
//! canonical form already in the set.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use crate::grid::ROTATIONS;
use crate::posture::Equivalences;
use crate::volume::{Cell, Volume};

/// Accepts solutions that are new up to symmetry, in discovery order.
#[derive(Clone, Debug, Default)]
pub struct SymmetryReducer {
    copies: BTreeMap<char, Vec<char>>,
    reflection: BTreeMap<char, char>,
    accepted: FxHashSet<Volume>,
    solutions: Vec<Volume>,
}

impl SymmetryReducer {
    pub fn new(equivalences: &Equivalences) -> Self {
        Self {
            copies: equivalences.piece_copies.clone(),
            reflection: equivalences.reflection_labels(),
            accepted: FxHashSet::default(),
            solutions: Vec::new(),
        }
    }

    /// Relabels congruent pieces greedily: the first label met in flat cell
    /// order takes the first member of its class, the next distinct label
    /// the next free member, and so on.
    pub fn canonical_form(&self, solution: &Volume) -> Volume {
        let mut assigned: BTreeMap<char, char> = BTreeMap::new();
        solution.map(|&cell| {
            let Some(name) = cell.piece() else {
                return cell;
            };
            let Some(class) = self.copies.get(&name) else {
                return cell;
            };
            if let Some(&label) = assigned.get(&name) {
                return Cell::Piece(label);
            }
            let label = class
                .iter()
                .copied()
                .find(|candidate| !assigned.values().any(|used| used == candidate))
                .unwrap_or(name);
            assigned.insert(name, label);
            Cell::Piece(label)
        })
    }

    /// The mirror image of `solution`, with chiral pieces swapped for their
    /// partners.
    pub fn reflect(&self, solution: &Volume) -> Volume {
        solution.mirrored().map(|&cell| match cell.piece() {
            Some(name) => Cell::Piece(self.reflection.get(&name).copied().unwrap_or(name)),
            None => cell,
        })
    }

    /// The 24 rotations of `solution` followed by the 24 rotations of its
    /// reflection.
    pub fn variants(&self, solution: &Volume) -> impl Iterator<Item = Volume> {
        let images = [solution.clone(), self.reflect(solution)];
        images
            .into_iter()
            .flat_map(|image| ROTATIONS.into_iter().map(move |rotation| image.rotated(rotation)))
    }

    /// True if some image of `solution` was already accepted.
    pub fn is_duplicate(&self, solution: &Volume) -> bool {
        self.variants(solution)
            .any(|image| self.accepted.contains(&self.canonical_form(&image)))
    }

    /// Records `solution` unless it is a duplicate. Returns whether it was new.
    pub fn accept(&mut self, solution: Volume) -> bool {
        if self.is_duplicate(&solution) {
            return false;
        }
        self.accepted.insert(self.canonical_form(&solution));
        self.solutions.push(solution);
        true
    }

    /// Number of accepted solutions.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Accepted solutions in discovery order, with their original labels.
    pub fn solutions(&self) -> &[Volume] {
        &self.solutions
    }

    pub fn into_solutions(self) -> Vec<Volume> {
        self.solutions
    }
}

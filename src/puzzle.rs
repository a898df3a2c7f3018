//! A validated puzzle: a volume shape plus the pieces that must fill it.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::config::SolveConfig;
use crate::error::{PuzzleError, Result};
use crate::matrix::Matrix;
use crate::placement::{placement_rows, Row, VolumeShape};
use crate::posture::{unique_postures, Equivalences, NamedPosture, PieceCatalogue};
use crate::solver::{Search, SearchStats};
use crate::symmetry::SymmetryReducer;
use crate::volume::Volume;

/// Everything a finished run reports.
#[derive(Clone, Debug)]
pub struct SolveReport {
    /// Distinct solutions in discovery order
    pub solutions: Vec<Volume>,
    pub stats: SearchStats,
    pub equivalences: Equivalences,
}

/// A puzzle that passed validation and can be searched any number of times.
#[derive(Clone, Debug)]
pub struct Puzzle {
    shape: VolumeShape,
    catalogue: PieceCatalogue,
    postures: Vec<NamedPosture>,
    equivalences: Equivalences,
}

impl Puzzle {
    /// Validates the pieces against the volume and computes every posture.
    ///
    /// # Errors
    ///
    /// - [`PuzzleError::EmptyCatalogue`] if there are no pieces
    /// - [`PuzzleError::EmptyVolume`] if every cell is dead
    /// - [`PuzzleError::PieceTooLarge`] if a piece fits in no orientation
    /// - [`PuzzleError::CellCountMismatch`] if the pieces cannot fill the
    ///   live cells exactly
    /// - [`PuzzleError::NoPlacement`] if the dead cells leave a piece with
    ///   nowhere to go
    pub fn new(shape: VolumeShape, catalogue: PieceCatalogue) -> Result<Self> {
        if catalogue.is_empty() {
            return Err(PuzzleError::EmptyCatalogue);
        }
        let live_cells = shape.live_cell_count();
        if live_cells == 0 {
            return Err(PuzzleError::EmptyVolume);
        }

        for (name, base) in catalogue.iter() {
            if base.cube_count() == 0 {
                return Err(PuzzleError::EmptyPiece { name });
            }
            if !base.fits_within(shape.dims()) {
                return Err(PuzzleError::PieceTooLarge {
                    name,
                    volume: shape.dims(),
                });
            }
        }

        let piece_cells = catalogue.cube_count();
        if piece_cells != live_cells {
            return Err(PuzzleError::CellCountMismatch {
                live_cells,
                piece_cells,
            });
        }

        let postures = unique_postures(&catalogue);
        let placeable: BTreeSet<char> = placement_rows(&shape, &postures)
            .filter_map(|row| match row {
                Row::Placement(placement) => Some(placement.piece),
                Row::Header { .. } => None,
            })
            .collect();
        if let Some(name) = catalogue.names().find(|name| !placeable.contains(name)) {
            return Err(PuzzleError::NoPlacement { name });
        }

        let equivalences = Equivalences::new(&catalogue, &postures);
        debug!(
            pieces = catalogue.len(),
            postures = postures.len(),
            live_cells,
            "puzzle validated"
        );

        Ok(Self {
            shape,
            catalogue,
            postures,
            equivalences,
        })
    }

    pub fn shape(&self) -> &VolumeShape {
        &self.shape
    }

    pub fn catalogue(&self) -> &PieceCatalogue {
        &self.catalogue
    }

    /// Every distinct posture of every piece, in catalogue order.
    pub fn postures(&self) -> &[NamedPosture] {
        &self.postures
    }

    /// Copy and mirror relations between the pieces.
    pub fn equivalences(&self) -> &Equivalences {
        &self.equivalences
    }

    /// Header row followed by every legal placement.
    pub fn placements(&self) -> impl Iterator<Item = Row> + '_ {
        placement_rows(&self.shape, &self.postures)
    }

    /// A freshly built incidence matrix.
    pub fn build_matrix(&self) -> Matrix {
        Matrix::from_rows(self.shape.cell_count() + 1, self.placements())
    }

    /// A search over a fresh matrix and an empty working volume.
    pub fn search(&self, config: &SolveConfig) -> Search {
        Search::new(
            self.build_matrix(),
            self.shape.empty_volume(),
            SymmetryReducer::new(&self.equivalences),
            config,
        )
    }

    /// Finds every distinct solution, or the first `max_solutions`. A
    /// cancelled run reports the solutions found so far.
    pub fn solve(&self, config: &SolveConfig) -> SolveReport {
        let mut search = self.search(config);
        let stats = search.run();
        if stats.interrupted {
            warn!(solutions = stats.solutions, "search interrupted");
        }
        info!(
            solutions = stats.solutions,
            branches = stats.branches,
            stopped_early = stats.stopped_early,
            "search finished"
        );
        SolveReport {
            solutions: search.into_solutions(),
            stats,
            equivalences: self.equivalences.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::grid::Coord;
    use crate::pieces::{bedlam, diabolical, soma, SOMA_PIECES};
    use crate::placement::Placement;
    use crate::volume::Cell;

    const MONO: &[Coord] = &[(0, 0, 0)];
    const DOMINO: &[Coord] = &[(0, 0, 0), (1, 0, 0)];
    const SMALL_L: &[Coord] = &[(0, 0, 0), (1, 0, 0), (0, 1, 0)];

    fn puzzle(shape: VolumeShape, pieces: &[(char, &[Coord])]) -> Result<Puzzle> {
        Puzzle::new(shape, PieceCatalogue::from_cubes(pieces)?)
    }

    fn count(shape: VolumeShape, pieces: &[(char, &[Coord])]) -> usize {
        let report = puzzle(shape, pieces).unwrap().solve(&SolveConfig::default());
        assert_eq!(report.stats.solutions, report.solutions.len());
        report.solutions.len()
    }

    /// Every live cell labelled, each piece covering exactly its own size.
    fn assert_exact_cover(puzzle: &Puzzle, solution: &Volume) {
        assert!(solution.is_complete());
        for (position, cell) in solution.iter() {
            let dead = puzzle.shape().is_dead(solution.index_of(position));
            assert_eq!(dead, *cell == Cell::Dead, "{position:?}");
        }
        for (name, posture) in puzzle.catalogue().iter() {
            assert_eq!(solution.count_of(name), posture.cube_count(), "piece {name}");
        }
    }

    /// Each piece's cells in the solution form one of its placements, so no
    /// two placements overlap.
    fn assert_placements_disjoint(puzzle: &Puzzle, solution: &Volume) {
        let placements: Vec<Placement> = puzzle
            .placements()
            .filter_map(|row| match row {
                Row::Placement(placement) => Some(placement),
                Row::Header { .. } => None,
            })
            .collect();
        let mut seen = BTreeSet::new();
        for name in puzzle.catalogue().names() {
            let cells: Vec<usize> = solution
                .cells()
                .iter()
                .enumerate()
                .filter(|(_, &cell)| cell == Cell::Piece(name))
                .map(|(index, _)| index)
                .collect();
            assert!(placements.iter().any(|placement| {
                placement.piece == name && placement.covered().eq(cells.iter().copied())
            }));
            for index in cells {
                assert!(seen.insert(index), "cell {index} covered twice");
            }
        }
    }

    #[test]
    fn test_soma_has_240_solutions() {
        let puzzle = soma().unwrap();
        let report = puzzle.solve(&SolveConfig::default());
        assert_eq!(report.solutions.len(), 240);
        assert!(!report.stats.stopped_early);
        for solution in &report.solutions {
            assert_exact_cover(&puzzle, solution);
            assert_placements_disjoint(&puzzle, solution);
        }

        // no accepted solution is an image of another
        let reducer = SymmetryReducer::new(puzzle.equivalences());
        let canonical: BTreeSet<Volume> = report
            .solutions
            .iter()
            .map(|solution| reducer.canonical_form(solution))
            .collect();
        for (index, solution) in report.solutions.iter().enumerate() {
            let images: BTreeSet<Volume> = reducer
                .variants(solution)
                .map(|image| reducer.canonical_form(&image))
                .collect();
            let clashes = images.intersection(&canonical).count();
            assert_eq!(clashes, 1, "solution {index} matches another");
        }
    }

    #[test]
    fn test_diabolical_has_13_solutions() {
        let report = diabolical().unwrap().solve(&SolveConfig::default());
        assert_eq!(report.solutions.len(), 13);
    }

    #[test]
    fn test_rerun_gives_same_solution_set() {
        let puzzle = diabolical().unwrap();
        let solve = || -> BTreeSet<Volume> {
            let report = puzzle.solve(&SolveConfig::default());
            report.solutions.into_iter().collect()
        };
        assert_eq!(solve(), solve());
    }

    #[test]
    fn test_stop_after_one_leaves_matrix_intact() {
        let puzzle = diabolical().unwrap();
        let config = SolveConfig::new().with_max_solutions(Some(1));
        let mut search = puzzle.search(&config);
        let pristine = search.matrix().clone();
        let stats = search.run();
        assert_eq!(stats.solutions, 1);
        assert!(stats.stopped_early);
        assert_eq!(search.matrix(), &pristine);
        assert_eq!(search.matrix(), &puzzle.build_matrix());
        assert_exact_cover(&puzzle, &search.solutions()[0]);
    }

    #[test]
    fn test_small_counts() {
        let three = [('a', DOMINO), ('b', DOMINO), ('c', DOMINO)];
        assert_eq!(count(VolumeShape::full(1, 2, 2).unwrap(), &three[..2]), 1);
        assert_eq!(count(VolumeShape::full(1, 2, 3).unwrap(), &three), 2);
        assert_eq!(
            count(
                VolumeShape::full(2, 2, 2).unwrap(),
                &[('a', DOMINO), ('b', DOMINO), ('c', DOMINO), ('d', DOMINO)]
            ),
            2
        );
        assert_eq!(count(VolumeShape::full(1, 1, 4).unwrap(), &three[..2]), 1);
    }

    #[test]
    fn test_double_sets_count_congruent_pieces_once() {
        assert_eq!(
            count(
                VolumeShape::full(2, 2, 2).unwrap(),
                &[('1', SMALL_L), ('2', SMALL_L), ('x', MONO), ('y', MONO)]
            ),
            4
        );
        assert_eq!(
            count(
                VolumeShape::full(2, 2, 2).unwrap(),
                &[('1', SMALL_L), ('a', MONO), ('b', MONO), ('c', MONO), ('d', MONO), ('e', MONO)]
            ),
            1
        );
    }

    #[test]
    fn test_dead_cells_shape_the_volume() {
        let mut shape = VolumeShape::full(1, 2, 2).unwrap();
        shape.kill((0, 0, 1));
        let puzzle = puzzle(shape, &[('1', SMALL_L)]).unwrap();
        let report = puzzle.solve(&SolveConfig::default());
        assert_eq!(report.solutions.len(), 1);
        assert_exact_cover(&puzzle, &report.solutions[0]);
        insta::assert_snapshot!(report.solutions[0].to_string().trim_end(), @r"
        11
        1.
        ");
    }

    #[test]
    fn test_oversized_piece_is_rejected() {
        let shape = VolumeShape::full(1, 2, 2).unwrap();
        let err = puzzle(shape, &[('2', SOMA_PIECES[1].1)]).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::PieceTooLarge {
                name: '2',
                volume: (1, 2, 2)
            }
        );
        assert!(!err.is_infeasible());
    }

    #[test]
    fn test_oversized_piece_without_validation_finds_nothing() {
        let shape = VolumeShape::full(1, 2, 2).unwrap();
        let catalogue = PieceCatalogue::from_cubes(&[('2', SOMA_PIECES[1].1)]).unwrap();
        let postures = unique_postures(&catalogue);
        let matrix = Matrix::from_rows(shape.cell_count() + 1, placement_rows(&shape, &postures));
        assert!(!matrix.has_rows());

        let reducer = SymmetryReducer::new(&Equivalences::new(&catalogue, &postures));
        let config = SolveConfig::default();
        let mut search = Search::new(matrix, shape.empty_volume(), reducer, &config);
        let stats = search.run();
        assert_eq!(stats.branches, 0);
        assert_eq!(stats.solutions, 0);
    }

    #[test]
    fn test_piece_walled_off_by_dead_cells_is_rejected() {
        // the dead middle column splits the box into two 1x2 strips
        let mut shape = VolumeShape::full(1, 2, 3).unwrap();
        shape.kill((0, 0, 1));
        shape.kill((0, 1, 1));
        let err = puzzle(shape, &[('1', SMALL_L), ('x', MONO)]).unwrap_err();
        assert_eq!(err, PuzzleError::NoPlacement { name: '1' });
        assert!(err.is_infeasible());
    }

    #[test]
    fn test_cancelled_search_keeps_partial_solutions() {
        let puzzle = diabolical().unwrap();
        let config = SolveConfig::new().with_max_solutions(Some(1));
        let mut search = puzzle.search(&config);
        assert_eq!(search.run().solutions, 1);

        config.cancel();
        let stats = search.run();
        assert_eq!(stats.solutions, 1);
        assert!(stats.stopped_early);
        assert!(stats.interrupted);
        assert_eq!(search.matrix(), &puzzle.build_matrix());
        assert_exact_cover(&puzzle, &search.solutions()[0]);
    }

    #[test]
    fn test_cancel_from_another_thread_unwinds_search() {
        let puzzle = bedlam().unwrap();
        let config = SolveConfig::default();
        let handle = config.clone();
        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(200));
            handle.cancel();
        });

        let mut search = puzzle.search(&config);
        let stats = search.run();
        canceller.join().unwrap();
        assert!(stats.interrupted);
        assert!(stats.stopped_early);
        assert_eq!(stats.solutions, search.solutions().len());
        assert_eq!(search.matrix(), &puzzle.build_matrix());
        for solution in search.solutions() {
            assert_exact_cover(&puzzle, solution);
        }
    }

    #[test]
    fn test_cell_count_mismatch_is_infeasible() {
        let mut shape = VolumeShape::full(3, 3, 3).unwrap();
        shape.kill((1, 1, 1));
        let catalogue = PieceCatalogue::from_cubes(SOMA_PIECES).unwrap();
        let err = Puzzle::new(shape, catalogue).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::CellCountMismatch {
                live_cells: 26,
                piece_cells: 27
            }
        );
        assert!(err.is_infeasible());
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        let shape = VolumeShape::full(1, 1, 1).unwrap();
        assert_eq!(
            Puzzle::new(shape.clone(), PieceCatalogue::new()).unwrap_err(),
            PuzzleError::EmptyCatalogue
        );

        let mut dead = shape;
        dead.kill((0, 0, 0));
        assert_eq!(
            puzzle(dead, &[('a', MONO)]).unwrap_err(),
            PuzzleError::EmptyVolume
        );
    }

    #[test]
    fn test_equivalences_reported_with_solutions() {
        let report = puzzle(
            VolumeShape::full(1, 2, 2).unwrap(),
            &[('a', DOMINO), ('b', DOMINO)],
        )
        .unwrap()
        .solve(&SolveConfig::default());
        let expected: BTreeMap<char, Vec<char>> =
            [('a', vec!['a', 'b']), ('b', vec!['a', 'b'])].into_iter().collect();
        assert_eq!(report.equivalences.piece_copies, expected);
    }
}

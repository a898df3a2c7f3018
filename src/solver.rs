//! Algorithm X over the dancing-links matrix.
//!
//! The search is recursive, one frame per placed piece. Each frame:
//! - picks the live column with the fewest covering rows (a column with
//!   none ends the branch)
//! - for every row covering that column, removes the other rows of the
//!   same piece, then every row clashing with the selected one and every
//!   column it covers, labels the working volume and recurses
//! - undoes its removals in reverse order before trying the next row
//!
//! A frame with neither rows nor columns left is a complete cover.
//! Stopping early, at the solution ceiling or on cancellation, unwinds
//! through every open frame with the same undo, so the matrix after
//! [`Search::run`] equals the matrix it was given.

use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::config::SolveConfig;
use crate::matrix::{Matrix, NodeId, Payload};
use crate::progress::ProgressReporter;
use crate::symmetry::SymmetryReducer;
use crate::volume::{Cell, Volume};

/// One structural removal, replayed backwards to undo a branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mutation {
    Row(NodeId),
    Column(NodeId),
}

/// Counters reported at the end of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Placement rows selected at a branch step
    pub branches: u64,
    /// Distinct solutions accepted
    pub solutions: usize,
    /// True if the run ended before the search space was exhausted
    pub stopped_early: bool,
    /// True if the run was cancelled through its config
    pub interrupted: bool,
}

/// A search over one matrix, owning everything it mutates.
pub struct Search {
    matrix: Matrix,
    volume: Volume,
    reducer: SymmetryReducer,
    config: SolveConfig,
    progress: ProgressReporter,
    branches: u64,
}

impl Search {
    /// Prepares a search. `volume` must have one cell per matrix column
    /// after column 0; its dead cells are left out of the cover.
    pub fn new(
        matrix: Matrix,
        volume: Volume,
        reducer: SymmetryReducer,
        config: &SolveConfig,
    ) -> Self {
        Self {
            matrix,
            volume,
            reducer,
            config: config.clone(),
            progress: ProgressReporter::new(config.progress_interval),
            branches: 0,
        }
    }

    /// Runs the search to completion, to the solution ceiling or until the
    /// config is cancelled.
    pub fn run(&mut self) -> SearchStats {
        let dead = self.delete_dead_columns();
        debug!(
            nodes = self.matrix.len(),
            dead_columns = dead.len(),
            "starting search"
        );

        let flow = if self.config.limit_reached(self.reducer.len()) || self.config.is_cancelled() {
            ControlFlow::Break(())
        } else {
            self.descend()
        };

        for &column in dead.iter().rev() {
            self.matrix.insert_col(column);
        }
        self.progress.finish(self.branches, self.reducer.len());

        SearchStats {
            branches: self.branches,
            solutions: self.reducer.len(),
            stopped_early: flow.is_break(),
            interrupted: flow.is_break() && self.config.is_cancelled(),
        }
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Accepted solutions so far, in discovery order.
    pub fn solutions(&self) -> &[Volume] {
        self.reducer.solutions()
    }

    pub fn into_solutions(self) -> Vec<Volume> {
        self.reducer.into_solutions()
    }

    /// Removes the columns of dead cells, which no row covers.
    fn delete_dead_columns(&mut self) -> Vec<NodeId> {
        let Some(head) = self.matrix.head() else {
            return Vec::new();
        };
        let dead: Vec<NodeId> = self
            .matrix
            .row_nonzero_nodes(head)
            .filter(|&column| {
                self.cell_index(column)
                    .is_some_and(|index| self.volume.cells()[index] == Cell::Dead)
            })
            .collect();
        for &column in &dead {
            self.matrix.delete_col(column);
        }
        dead
    }

    fn descend(&mut self) -> ControlFlow<()> {
        self.progress.tick(self.branches, self.reducer.len());
        if self.config.is_cancelled() {
            debug!(branches = self.branches, "search cancelled");
            return ControlFlow::Break(());
        }

        let Some((column, covering)) = self.matrix.sparsest_column() else {
            if self.matrix.has_rows() {
                return ControlFlow::Continue(());
            }
            return self.record();
        };
        if covering == 0 {
            return ControlFlow::Continue(());
        }

        let candidates: Vec<NodeId> = self
            .matrix
            .col_nonzero_nodes(column)
            .map(|node| self.matrix.row_head(node))
            .collect();

        for selected in candidates {
            let Payload::Piece(piece) = self.matrix.payload(selected) else {
                continue;
            };
            self.branches += 1;

            let covered: Vec<NodeId> = self
                .matrix
                .row_nonzero_nodes(selected)
                .map(|node| self.matrix.col_head(node))
                .collect();
            self.label(&covered, Cell::Piece(piece));

            let trail = self.select(piece, &covered);
            trace!(piece = %piece, removed = trail.len(), "placed");
            let flow = self.descend();
            self.undo(trail);
            self.label(&covered, Cell::Empty);

            if flow.is_break() {
                return flow;
            }
        }
        ControlFlow::Continue(())
    }

    /// Removes every other row of `piece`, every row clashing with the
    /// selected one and the columns it covers.
    fn select(&mut self, piece: char, covered: &[NodeId]) -> Vec<Mutation> {
        let mut trail = Vec::new();
        let Some(head) = self.matrix.head() else {
            return trail;
        };

        let same_piece: Vec<NodeId> = self
            .matrix
            .col_nonzero_nodes(head)
            .filter(|&row| self.matrix.payload(row) == Payload::Piece(piece))
            .collect();
        for row in same_piece {
            self.matrix.delete_row(row);
            trail.push(Mutation::Row(row));
        }

        for &column in covered {
            let clashing: Vec<NodeId> = self
                .matrix
                .col_nonzero_nodes(column)
                .map(|node| self.matrix.row_head(node))
                .collect();
            for row in clashing {
                self.matrix.delete_row(row);
                trail.push(Mutation::Row(row));
            }
            self.matrix.delete_col(column);
            trail.push(Mutation::Column(column));
        }
        trail
    }

    fn undo(&mut self, trail: Vec<Mutation>) {
        for mutation in trail.into_iter().rev() {
            match mutation {
                Mutation::Row(row) => self.matrix.insert_row(row),
                Mutation::Column(column) => self.matrix.insert_col(column),
            }
        }
    }

    fn label(&mut self, columns: &[NodeId], cell: Cell) {
        for &column in columns {
            if let Some(index) = self.cell_index(column) {
                self.volume.cells_mut()[index] = cell;
            }
        }
    }

    fn record(&mut self) -> ControlFlow<()> {
        if self.reducer.accept(self.volume.clone()) {
            debug!(
                solutions = self.reducer.len(),
                branches = self.branches,
                "solution found"
            );
            if self.config.limit_reached(self.reducer.len()) {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Volume cell of a header column. Column 0 has none.
    fn cell_index(&self, column: NodeId) -> Option<usize> {
        match self.matrix.payload(column) {
            Payload::Column(index) => index.checked_sub(1),
            Payload::Piece(_) | Payload::Cell(_) => None,
        }
    }
}

//! The block tiler: pads both sequences to a multiple of the block dimension,
//! arranges the edit matrix as a grid of blocks, and propagates step vectors
//! block by block through table lookups.

use crate::steps::{self, StepInt};
use crate::table::SubmatrixTable;
use crate::trace;
use fr_types::{Cost, FrError, Seq, Sequence};

/// Two gapped sequences of equal length, in the order the inputs were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub a: Sequence,
    pub b: Sequence,
}

/// One distance or alignment query against a prebuilt `SubmatrixTable`.
///
/// The longer input always goes on the row axis: both the runtime and the
/// memory of the path-capable mode scale with the number of block columns.
pub struct Solver<'t> {
    table: &'t SubmatrixTable,
    /// Padded symbol indices, row axis (the longer input).
    pub(crate) a: Vec<u8>,
    /// Padded symbol indices, column axis.
    pub(crate) b: Vec<u8>,
    /// Unpadded input bytes, in (row, column) order.
    a_raw: Sequence,
    b_raw: Sequence,
    pub(crate) a_real: usize,
    pub(crate) b_real: usize,
    swapped: bool,
    pub(crate) dim: usize,
    pub(crate) row_num: usize,
    pub(crate) col_num: usize,
    /// Per block row/column: the symbol-weight part of the lookup offset,
    /// computed once instead of on every lookup.
    row_char_parts: Vec<usize>,
    col_char_parts: Vec<usize>,
}

/// Everything the path mode retains beyond the distance mode: the full grids
/// of exit vectors and the absolute cost at each block's top-left corner.
pub(crate) struct BlockGrids {
    /// `cols[i][j]`: right-edge exit of block (i, j); column 0 holds the
    /// initial left boundary vectors.
    pub cols: Vec<Vec<StepInt>>,
    /// `rows[i][j]`: bottom-edge exit of block (i, j); row 0 holds the initial
    /// top boundary vectors.
    pub rows: Vec<Vec<StepInt>>,
    /// Absolute cost of the matrix cell at each block's top-left corner.
    pub top_left_costs: Vec<Vec<Cost>>,
}

impl<'t> Solver<'t> {
    pub fn new(a: Seq, b: Seq, table: &'t SubmatrixTable) -> Result<Self, FrError> {
        let swapped = a.len() < b.len();
        let (a, b) = if swapped { (b, a) } else { (a, b) };

        let alphabet = table.alphabet();
        let dim = table.dim();
        let mut a_idx = alphabet.encode(a)?;
        let mut b_idx = alphabet.encode(b)?;
        let pad = alphabet.padding_index();
        a_idx.resize(a_idx.len().next_multiple_of(dim), pad);
        b_idx.resize(b_idx.len().next_multiple_of(dim), pad);

        let row_num = a_idx.len() / dim;
        let col_num = b_idx.len() / dim;
        let indexer = table.indexer();
        let row_char_parts = (0..row_num)
            .map(|i| indexer.char_left_part(&a_idx[i * dim..(i + 1) * dim]))
            .collect();
        let col_char_parts = (0..col_num)
            .map(|j| indexer.char_top_part(&b_idx[j * dim..(j + 1) * dim]))
            .collect();

        Ok(Solver {
            table,
            a_real: a.len(),
            b_real: b.len(),
            a_raw: a.to_vec(),
            b_raw: b.to_vec(),
            a: a_idx,
            b: b_idx,
            swapped,
            dim,
            row_num,
            col_num,
            row_char_parts,
            col_char_parts,
        })
    }

    /// The initial top boundary vector of block column `bj` (1-based): +1 per
    /// real position, 0 per padded position.
    fn initial_top(&self, bj: usize) -> StepInt {
        let real = self.b_real.saturating_sub((bj - 1) * self.dim).min(self.dim);
        steps::leading_ones(real, self.dim)
    }

    /// The initial left boundary vector of block row `bi` (1-based).
    fn initial_left(&self, bi: usize) -> StepInt {
        let real = self.a_real.saturating_sub((bi - 1) * self.dim).min(self.dim);
        steps::leading_ones(real, self.dim)
    }

    /// One table lookup for block (bi, bj) with the given entering vectors.
    pub(crate) fn block_exit(
        &self,
        bi: usize,
        bj: usize,
        left_steps: StepInt,
        top_steps: StepInt,
    ) -> Result<(StepInt, StepInt), FrError> {
        let indexer = self.table.indexer();
        let offset = self.row_char_parts[bi - 1]
            + self.col_char_parts[bj - 1]
            + indexer.step_part(left_steps, top_steps);
        self.table.exit_at(offset)
    }

    pub(crate) fn block_left_syms(&self, bi: usize) -> &[u8] {
        &self.a[(bi - 1) * self.dim..bi * self.dim]
    }

    pub(crate) fn block_top_syms(&self, bj: usize) -> &[u8] {
        &self.b[(bj - 1) * self.dim..bj * self.dim]
    }

    pub(crate) fn costs(&self) -> fr_types::CostModel {
        self.table.costs()
    }

    pub(crate) fn padding_index(&self) -> u8 {
        self.table.alphabet().padding_index()
    }

    /// Distance only, keeping two rolling block rows of bottom-edge vectors
    /// and a single carried right-edge vector.
    pub fn cost(&self) -> Result<Cost, FrError> {
        let mut prev: Vec<StepInt> = std::iter::once(0)
            .chain((1..=self.col_num).map(|bj| self.initial_top(bj)))
            .collect();
        let mut curr = prev.clone();

        for bi in 1..=self.row_num {
            let mut left = self.initial_left(bi);
            for bj in 1..=self.col_num {
                let (right, bottom) = self.block_exit(bi, bj, left, prev[bj])?;
                left = right;
                curr[bj] = bottom;
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        // The bottom boundary starts at cost |a|; summing the final bottom-edge
        // vectors walks it to the corner.
        Ok(self.a_real as Cost
            + (1..=self.col_num)
                .map(|bj| steps::sum(prev[bj], self.dim))
                .sum::<Cost>())
    }

    /// Distance plus an explicit alignment; retains the full block grids for
    /// backtracking.
    pub fn align(&self) -> Result<(Cost, Alignment), FrError> {
        let grids = self.fill_grids()?;
        let cost = self.a_real as Cost
            + (1..=self.col_num)
                .map(|bj| steps::sum(grids.rows[self.row_num][bj], self.dim))
                .sum::<Cost>();

        let path = trace::edit_path(self, &grids);
        let (a_aligned, b_aligned) = trace::alignment_from_path(
            &self.a_raw,
            &self.b_raw,
            &path,
            self.table.alphabet().padding(),
        );
        let alignment = if self.swapped {
            Alignment {
                a: b_aligned,
                b: a_aligned,
            }
        } else {
            Alignment {
                a: a_aligned,
                b: b_aligned,
            }
        };
        Ok((cost, alignment))
    }

    fn fill_grids(&self) -> Result<BlockGrids, FrError> {
        let mut cols = vec![vec![0; self.col_num + 1]; self.row_num + 1];
        let mut rows = vec![vec![0; self.col_num + 1]; self.row_num + 1];
        let mut top_left_costs = vec![vec![0; self.col_num + 1]; self.row_num + 1];

        for bj in 1..=self.col_num {
            rows[0][bj] = self.initial_top(bj);
        }
        for bi in 1..=self.row_num {
            cols[bi][0] = self.initial_left(bi);
        }

        for bi in 1..=self.row_num {
            // No block columns to seed when the shorter input is empty; the
            // whole path is then a straight run along column 0.
            if self.col_num > 0 {
                top_left_costs[bi][1] = ((bi - 1) * self.dim).min(self.a_real) as Cost;
            }
            for bj in 1..=self.col_num {
                let (right, bottom) = self.block_exit(bi, bj, cols[bi][bj - 1], rows[bi - 1][bj])?;
                log::trace!(
                    "block ({bi}, {bj}): right {} bottom {}",
                    steps::pretty(right, self.dim),
                    steps::pretty(bottom, self.dim)
                );
                cols[bi][bj] = right;
                rows[bi][bj] = bottom;
                if bj > 1 {
                    top_left_costs[bi][bj] = top_left_costs[bi][bj - 1]
                        + steps::sum(rows[bi - 1][bj - 1], self.dim);
                }
            }
        }

        Ok(BlockGrids {
            cols,
            rows,
            top_left_costs,
        })
    }
}

impl std::fmt::Debug for Solver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solver")
            .field("dim", &self.dim)
            .field("rows", &self.row_num)
            .field("cols", &self.col_num)
            .field("a_real", &self.a_real)
            .field("b_real", &self.b_real)
            .finish()
    }
}

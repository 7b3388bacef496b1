//! Backtracking through the block grid.
//!
//! Step vectors alone cannot be backtracked, they carry no absolute reference
//! point. For blocks on the optimal path we therefore rebuild the absolute
//! local cost submatrix from the block's entering vectors and its stored
//! top-left cost, walk it cell by cell, and chain into the left/up/diagonal
//! neighbor whenever the walk leaves the block.

use crate::solver::{BlockGrids, Solver};
use crate::steps::{self, StepInt};
use crate::table::one_sided_costs;
use fr_types::{Cost, CostModel, Sequence};

/// One backward move of the edit path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EditOp {
    /// Down: consume a row symbol, gap in the column sequence.
    Del,
    /// Right: consume a column symbol, gap in the row sequence.
    Ins,
    /// Diagonal: match or substitution.
    Match,
}

const TAG_BOUNDARY: u8 = 0;
const TAG_DEL: u8 = 1;
const TAG_INS: u8 = 2;
const TAG_DIAG: u8 = 3;

/// The full edit path, emitted in reverse chronological order (end of the
/// alignment first).
pub(crate) fn edit_path(s: &Solver, grids: &BlockGrids) -> Vec<EditOp> {
    let d = s.dim;
    let mut path = Vec::new();

    // Start in the last block containing real data, at its real corner cell.
    let mut x = s.a_real.div_ceil(d);
    let mut y = s.b_real.div_ceil(d);
    let mut sub_x = if s.a_real % d == 0 { d } else { s.a_real % d };
    let mut sub_y = if s.b_real % d == 0 { d } else { s.b_real % d };

    let mut dp = CostSubmatrix::new(d, s.costs(), s.padding_index());
    while x > 0 && y > 0 {
        dp.fill(
            s.block_left_syms(x),
            s.block_top_syms(y),
            grids.cols[x][y - 1],
            grids.rows[x - 1][y],
            grids.top_left_costs[x][y],
        );

        let (mut i, mut j) = (sub_x, sub_y);
        while i > 0 && j > 0 {
            match dp.tag(i, j) {
                TAG_DEL => {
                    path.push(EditOp::Del);
                    i -= 1;
                }
                TAG_INS => {
                    path.push(EditOp::Ins);
                    j -= 1;
                }
                _ => {
                    path.push(EditOp::Match);
                    i -= 1;
                    j -= 1;
                }
            }
        }

        // The walk left the block: continue in the diagonal, upper, or left
        // neighbor, entering at the matching edge cell.
        if i == 0 && j == 0 {
            x -= 1;
            y -= 1;
            sub_x = d;
            sub_y = d;
        } else if i == 0 {
            x -= 1;
            sub_x = d;
            sub_y = j;
        } else {
            y -= 1;
            sub_y = d;
            sub_x = i;
        }
    }

    // A trailing straight run along global row 0 or column 0 lies outside all
    // blocks and is appended explicitly.
    if x == 0 && y > 0 {
        path.extend(std::iter::repeat(EditOp::Ins).take((y - 1) * d + sub_y));
    }
    if y == 0 && x > 0 {
        path.extend(std::iter::repeat(EditOp::Del).take((x - 1) * d + sub_x));
    }
    path
}

/// Replay a reverse-chronological path forwards into two gapped sequences.
pub(crate) fn alignment_from_path(
    a: &[u8],
    b: &[u8],
    path: &[EditOp],
    gap: u8,
) -> (Sequence, Sequence) {
    let mut a_aligned = Vec::with_capacity(path.len());
    let mut b_aligned = Vec::with_capacity(path.len());
    let (mut ai, mut bi) = (0, 0);
    for op in path.iter().rev() {
        match op {
            EditOp::Del => {
                a_aligned.push(a[ai]);
                ai += 1;
                b_aligned.push(gap);
            }
            EditOp::Ins => {
                a_aligned.push(gap);
                b_aligned.push(b[bi]);
                bi += 1;
            }
            EditOp::Match => {
                a_aligned.push(a[ai]);
                ai += 1;
                b_aligned.push(b[bi]);
                bi += 1;
            }
        }
    }
    debug_assert_eq!(ai, a.len());
    debug_assert_eq!(bi, b.len());
    (a_aligned, b_aligned)
}

/// Absolute local cost submatrix plus per-cell parent-move tags, with owned
/// scratch buffers reused across blocks.
struct CostSubmatrix {
    dim: usize,
    costs: CostModel,
    pad: u8,
    cost: Vec<Cost>,
    tags: Vec<u8>,
    left_buf: Vec<Cost>,
    top_buf: Vec<Cost>,
}

impl CostSubmatrix {
    fn new(dim: usize, costs: CostModel, pad: u8) -> Self {
        let w = dim + 1;
        CostSubmatrix {
            dim,
            costs,
            pad,
            cost: vec![0; w * w],
            tags: vec![TAG_BOUNDARY; w * w],
            left_buf: vec![0; dim],
            top_buf: vec![0; dim],
        }
    }

    #[inline]
    fn tag(&self, i: usize, j: usize) -> u8 {
        self.tags[i * (self.dim + 1) + j]
    }

    /// Same recurrence as the precomputer, but seeded with the block's
    /// absolute top-left cost so the matrix can be walked.
    fn fill(
        &mut self,
        left: &[u8],
        top: &[u8],
        left_steps: StepInt,
        top_steps: StepInt,
        initial_cost: Cost,
    ) {
        let d = self.dim;
        let w = d + 1;
        steps::decode_into(left_steps, &mut self.left_buf);
        steps::decode_into(top_steps, &mut self.top_buf);

        self.cost[0] = initial_cost;
        for i in 1..=d {
            self.cost[i * w] = self.cost[(i - 1) * w] + self.left_buf[i - 1];
            self.cost[i] = self.cost[i - 1] + self.top_buf[i - 1];
            self.tags[i * w] = TAG_BOUNDARY;
            self.tags[i] = TAG_BOUNDARY;
        }

        for i in 1..=d {
            for j in 1..=d {
                let (r, del, ins) = one_sided_costs(&self.costs, left[i - 1], top[j - 1], self.pad);
                // Tie-breaking: diagonal, then insert, then delete; an
                // alternative only wins when strictly cheaper.
                let mut best = self.cost[(i - 1) * w + j - 1] + r;
                let mut tag = TAG_DIAG;
                let alt = self.cost[i * w + j - 1] + ins;
                if alt < best {
                    best = alt;
                    tag = TAG_INS;
                }
                let alt = self.cost[(i - 1) * w + j] + del;
                if alt < best {
                    best = alt;
                    tag = TAG_DEL;
                }
                self.cost[i * w + j] = best;
                self.tags[i * w + j] = tag;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn path_replay() {
        // Reverse-chronological: the forward order is Match, Del, Del, Del.
        let path = vec![EditOp::Del, EditOp::Del, EditOp::Del, EditOp::Match];
        let (a, b) = alignment_from_path(b"ACGT", b"A", &path, b'-');
        assert_eq!(a, b"ACGT");
        assert_eq!(b, b"A---");
    }
}

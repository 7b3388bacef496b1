//! Exhaustive precomputation of block transformations.
//!
//! For every reachable (left symbols, top symbols, left steps, top steps)
//! 4-tuple, run the local step recurrence once and store the exit pair
//! (right-edge steps, bottom-edge steps) in one flat arena addressed by the
//! `OffsetIndexer`. Queries then replace the per-cell recurrence with a single
//! lookup per block.

use crate::offsets::OffsetIndexer;
use crate::steps::{self, StepInt};
use fr_types::{Alphabet, Cost, CostModel, FrError};
use rayon::prelude::*;
use std::time::Instant;

/// Entries never written during the build; hit only when a lookup does not
/// match the parameters the table was built for.
const EMPTY: u64 = u64::MAX;

#[inline]
fn pack(right: StepInt, bottom: StepInt) -> u64 {
    (right as u64) << 32 | bottom as u64
}

/// The precomputed result table for one (dimension, alphabet, costs)
/// configuration. Read-only after construction; safe to share between any
/// number of concurrent solvers.
pub struct SubmatrixTable {
    dim: usize,
    alphabet: Alphabet,
    costs: CostModel,
    indexer: OffsetIndexer,
    entries: Vec<u64>,
}

impl SubmatrixTable {
    /// Build the table, or fail fast when the configuration is invalid or the
    /// projected allocation exceeds `max_bytes`.
    pub fn build(
        dim: usize,
        alphabet: &Alphabet,
        costs: CostModel,
        max_bytes: usize,
    ) -> Result<Self, FrError> {
        if dim < 1 {
            return Err(FrError::InvalidDimension);
        }
        costs.validate()?;
        let required = OffsetIndexer::projected_entries(dim, alphabet.size())
            .and_then(|e| e.checked_mul(std::mem::size_of::<u64>() as u128))
            .unwrap_or(u128::MAX);
        if required > max_bytes as u128 {
            return Err(FrError::TableSizeExceeded {
                required,
                budget: max_bytes,
            });
        }

        let indexer = OffsetIndexer::new(dim, alphabet.size());
        log::info!(
            "allocating submatrix table: dimension {dim}, {} entries, {required} bytes",
            indexer.table_size()
        );
        let start = Instant::now();
        let mut entries = vec![EMPTY; indexer.table_size()];

        let tops = boundary_strings(dim, alphabet.size());
        let step_count = 3u32.pow(dim as u32);
        let pad = alphabet.padding_index();

        // Each left boundary string owns one contiguous chunk of the arena,
        // so the workers write disjoint ranges and need no synchronization.
        entries
            .par_chunks_mut(indexer.left_char_stride())
            .enumerate()
            .for_each(|(chunk, slice)| {
                let mut left = vec![0u8; dim];
                indexer.left_chars_of_chunk(chunk, &mut left);
                if !is_suffix_padded(&left, pad) {
                    return;
                }
                let mut dp = StepSubmatrix::new(dim, costs, pad);
                for top in &tops {
                    let top_part = indexer.char_top_part(top);
                    for left_steps in 0..step_count {
                        for top_steps in 0..step_count {
                            if let Some((right, bottom)) =
                                dp.exit_steps(&left, top, left_steps, top_steps)
                            {
                                slice[top_part + indexer.step_part(left_steps, top_steps)] =
                                    pack(right, bottom);
                            }
                        }
                    }
                }
            });
        log::debug!(
            "submatrix table built in {:.2?} ({} boundary strings per side)",
            start.elapsed(),
            tops.len()
        );

        Ok(SubmatrixTable {
            dim,
            alphabet: alphabet.clone(),
            costs,
            indexer,
            entries,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn costs(&self) -> CostModel {
        self.costs
    }

    pub fn indexer(&self) -> &OffsetIndexer {
        &self.indexer
    }

    /// The (right-edge, bottom-edge) exit vectors for a block key, given as
    /// symbol indices and encoded step vectors.
    pub fn exit_steps(
        &self,
        left: &[u8],
        top: &[u8],
        left_steps: StepInt,
        top_steps: StepInt,
    ) -> Result<(StepInt, StepInt), FrError> {
        self.exit_at(self.indexer.offset(left, top, left_steps, top_steps))
    }

    /// Lookup by precomputed offset.
    pub(crate) fn exit_at(&self, offset: usize) -> Result<(StepInt, StepInt), FrError> {
        match self.entries.get(offset) {
            Some(&e) if e != EMPTY => Ok(((e >> 32) as StepInt, e as StepInt)),
            _ => Err(FrError::TableMismatch),
        }
    }
}

impl std::fmt::Debug for SubmatrixTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmatrixTable")
            .field("dim", &self.dim)
            .field("alphabet", &self.alphabet)
            .field("costs", &self.costs)
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// The local step recurrence over one `d x d` block, with owned scratch
/// buffers so repeated calls do not reallocate.
///
/// `v[i][j]` is the cost delta from cell `(i-1, j)` to `(i, j)` and `h[i][j]`
/// the delta from `(i, j-1)` to `(i, j)`; tracking deltas instead of absolute
/// costs keeps every value in {-1, 0, +1} for the supported cost models.
struct StepSubmatrix {
    dim: usize,
    costs: CostModel,
    pad: u8,
    v: Vec<Cost>,
    h: Vec<Cost>,
    left_buf: Vec<Cost>,
    top_buf: Vec<Cost>,
    exit_buf: Vec<Cost>,
}

impl StepSubmatrix {
    fn new(dim: usize, costs: CostModel, pad: u8) -> Self {
        let w = dim + 1;
        StepSubmatrix {
            dim,
            costs,
            pad,
            v: vec![0; w * w],
            h: vec![0; w * w],
            left_buf: vec![0; dim],
            top_buf: vec![0; dim],
            exit_buf: vec![0; dim],
        }
    }

    /// Run the recurrence and encode the exit vectors. `None` when an exit
    /// step leaves -1..=1, which only happens for 4-tuples no padded input can
    /// produce.
    fn exit_steps(
        &mut self,
        left: &[u8],
        top: &[u8],
        left_steps: StepInt,
        top_steps: StepInt,
    ) -> Option<(StepInt, StepInt)> {
        let d = self.dim;
        let w = d + 1;
        steps::decode_into(left_steps, &mut self.left_buf);
        steps::decode_into(top_steps, &mut self.top_buf);
        for i in 1..=d {
            self.v[i * w] = self.left_buf[i - 1];
            self.h[i] = self.top_buf[i - 1];
        }

        for i in 1..=d {
            for j in 1..=d {
                let (r, del, ins) = one_sided_costs(&self.costs, left[i - 1], top[j - 1], self.pad);
                let v_left = self.v[i * w + j - 1];
                let h_above = self.h[(i - 1) * w + j];
                self.v[i * w + j] = min3(r - h_above, del, ins + v_left - h_above);
                self.h[i * w + j] = min3(r - v_left, ins, del + h_above - v_left);
            }
        }

        for i in 1..=d {
            self.exit_buf[i - 1] = self.v[i * w + d];
        }
        let right = steps::encode(&self.exit_buf)?;
        for j in 1..=d {
            self.exit_buf[j - 1] = self.h[d * w + j];
        }
        let bottom = steps::encode(&self.exit_buf)?;
        Some((right, bottom))
    }
}

/// Cell costs with the one-sided padding refinement: a padded position
/// contributes no edit operations beyond what padding already represents, so
/// its moves are free and a padded/real diagonal costs the one-sided
/// insert/delete instead of a substitution.
#[inline]
pub(crate) fn one_sided_costs(costs: &CostModel, lc: u8, tc: u8, pad: u8) -> (Cost, Cost, Cost) {
    let l_real = lc != pad;
    let t_real = tc != pad;
    let r = match (l_real, t_real) {
        (true, true) => {
            if lc == tc {
                0
            } else {
                costs.sub
            }
        }
        (true, false) => costs.del,
        (false, true) => costs.ins,
        (false, false) => 0,
    };
    (
        r,
        if l_real { costs.del } else { 0 },
        if t_real { costs.ins } else { 0 },
    )
}

#[inline]
fn min3(x: Cost, y: Cost, z: Cost) -> Cost {
    x.min(y).min(z)
}

/// All boundary strings a padded input can produce: `k` real symbols followed
/// by `d - k` padding symbols, enumerated with an iterative mixed-radix
/// counter over the real prefix.
fn boundary_strings(dim: usize, alphabet_size: usize) -> Vec<Vec<u8>> {
    let pad = alphabet_size as u8;
    let mut out = Vec::new();
    for real in 0..=dim {
        let mut s = vec![0u8; dim];
        s[real..].fill(pad);
        loop {
            out.push(s.clone());
            let mut p = 0;
            while p < real {
                s[p] += 1;
                if (s[p] as usize) < alphabet_size {
                    break;
                }
                s[p] = 0;
                p += 1;
            }
            if p == real {
                break;
            }
        }
    }
    out
}

fn is_suffix_padded(syms: &[u8], pad: u8) -> bool {
    let mut padded = false;
    for &s in syms {
        if s == pad {
            padded = true;
        } else if padded {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn boundary_string_count() {
        // sum over k of 4^k real prefixes
        let strings = boundary_strings(2, 4);
        assert_eq!(strings.len(), 1 + 4 + 16);
        assert!(strings.iter().all(|s| is_suffix_padded(s, 4)));
    }

    #[test]
    fn budget_is_checked_before_allocation() {
        let alph = Alphabet::dna();
        let err = SubmatrixTable::build(2, &alph, CostModel::default(), 1024);
        assert!(matches!(err, Err(FrError::TableSizeExceeded { .. })));
        // An absurd dimension must fail fast, not attempt allocation.
        let err = SubmatrixTable::build(64, &alph, CostModel::default(), 1 << 30);
        assert!(matches!(err, Err(FrError::TableSizeExceeded { .. })));
    }

    #[test]
    fn rejects_invalid_configuration() {
        let alph = Alphabet::dna();
        assert!(matches!(
            SubmatrixTable::build(0, &alph, CostModel::default(), 1 << 20),
            Err(FrError::InvalidDimension)
        ));
        assert!(matches!(
            SubmatrixTable::build(1, &alph, CostModel { sub: 5, ins: 1, del: 1 }, 1 << 20),
            Err(FrError::UnsupportedCosts { .. })
        ));
    }

    /// One block over fully real symbols must reproduce the plain
    /// Wagner-Fischer deltas. "AG" vs "GG" with sub=2: one substitution.
    #[test]
    fn single_block_matches_wagner_fischer() {
        let alph = Alphabet::dna();
        let table = SubmatrixTable::build(2, &alph, CostModel::default(), 1 << 20).unwrap();
        let left = alph.encode(b"AG").unwrap();
        let top = alph.encode(b"GG").unwrap();
        let (right, bottom) = table
            .exit_steps(&left, &top, steps::ones(2), steps::ones(2))
            .unwrap();
        assert_eq!(steps::decode(right, 2), vec![1, -1]);
        assert_eq!(steps::decode(bottom, 2), vec![-1, 1]);
    }
}

//! Mixed-radix addressing of submatrix 4-tuples.
//!
//! A block is keyed by (left boundary symbols, top boundary symbols, left step
//! vector, top step vector). Each key component contributes `d` digits to one
//! big mixed-radix number: first the top steps (base 3), then the left steps
//! (base 3), then the top symbols (base `|alphabet| + 1`), then the left
//! symbols, least significant digits first. Summing one precomputed weight per
//! digit yields a distinct offset for every key, with no collisions by
//! construction.

use crate::steps::StepInt;

#[derive(Debug, Clone)]
pub struct OffsetIndexer {
    dim: usize,
    sym_base: usize,
    /// Per-position weights, in radix order.
    step_top: Vec<usize>,
    step_left: Vec<usize>,
    char_top: Vec<usize>,
    char_left: Vec<usize>,
    table_size: usize,
}

impl OffsetIndexer {
    /// Projected number of table entries for a configuration, before anything
    /// is allocated. `(|alphabet|+1)^(2d) * 3^(2d)` in u128 to survive absurd
    /// requests long enough to report them.
    pub fn projected_entries(dim: usize, alphabet_size: usize) -> Option<u128> {
        let sym = (alphabet_size as u128 + 1).checked_pow(2 * dim as u32)?;
        let step = 3u128.checked_pow(2 * dim as u32)?;
        sym.checked_mul(step)
    }

    pub fn new(dim: usize, alphabet_size: usize) -> Self {
        let sym_base = alphabet_size + 1;
        let mut weight = 1usize;
        let mut lay_out = |base: usize| -> Vec<usize> {
            (0..dim)
                .map(|_| {
                    let w = weight;
                    weight *= base;
                    w
                })
                .collect()
        };
        let step_top = lay_out(3);
        let step_left = lay_out(3);
        let char_top = lay_out(sym_base);
        let char_left = lay_out(sym_base);
        OffsetIndexer {
            dim,
            sym_base,
            step_top,
            step_left,
            char_top,
            char_left,
            table_size: weight,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// Offsets covered by one left boundary string: the left symbols are the
    /// most significant digits, so each left string owns one contiguous chunk
    /// of this size.
    pub fn left_char_stride(&self) -> usize {
        self.char_left[0]
    }

    /// Weighted contribution of the left boundary symbols (as indices).
    pub fn char_left_part(&self, syms: &[u8]) -> usize {
        debug_assert_eq!(syms.len(), self.dim);
        syms.iter()
            .zip(&self.char_left)
            .map(|(&s, w)| s as usize * w)
            .sum()
    }

    /// Weighted contribution of the top boundary symbols (as indices).
    pub fn char_top_part(&self, syms: &[u8]) -> usize {
        debug_assert_eq!(syms.len(), self.dim);
        syms.iter()
            .zip(&self.char_top)
            .map(|(&s, w)| s as usize * w)
            .sum()
    }

    /// Weighted contribution of both step vectors. The base-3 digits of an
    /// encoded step vector line up exactly with the accumulated step weights,
    /// so the encodings serve as their own digit sums.
    #[inline]
    pub fn step_part(&self, left: StepInt, top: StepInt) -> usize {
        top as usize * self.step_top[0] + left as usize * self.step_left[0]
    }

    /// The unique offset of a 4-tuple.
    pub fn offset(&self, left: &[u8], top: &[u8], left_steps: StepInt, top_steps: StepInt) -> usize {
        self.char_left_part(left) + self.char_top_part(top) + self.step_part(left_steps, top_steps)
    }

    /// Decode a left-chunk index back into symbol digits, least significant
    /// first. Inverse of `char_left_part` scaled by the stride.
    pub fn left_chars_of_chunk(&self, mut chunk: usize, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.dim);
        for s in out.iter_mut() {
            *s = (chunk % self.sym_base) as u8;
            chunk /= self.sym_base;
        }
        debug_assert_eq!(chunk, 0);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Over the full cross product the offsets are a bijection onto
    /// `0..table_size`.
    #[test]
    fn offsets_are_injective() {
        for (dim, s) in [(1, 4), (2, 2), (2, 4)] {
            let ix = OffsetIndexer::new(dim, s);
            assert_eq!(
                ix.table_size() as u128,
                OffsetIndexer::projected_entries(dim, s).unwrap()
            );
            let mut seen = vec![false; ix.table_size()];
            let sym_base = s + 1;
            let chars: Vec<Vec<u8>> = (0..sym_base.pow(dim as u32))
                .map(|mut v| {
                    (0..dim)
                        .map(|_| {
                            let c = (v % sym_base) as u8;
                            v /= sym_base;
                            c
                        })
                        .collect()
                })
                .collect();
            let steps = 3u32.pow(dim as u32);
            for left in &chars {
                for top in &chars {
                    for ls in 0..steps {
                        for ts in 0..steps {
                            let o = ix.offset(left, top, ls, ts);
                            assert!(!seen[o], "offset collision at {o}");
                            seen[o] = true;
                        }
                    }
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn chunk_decode_inverts_left_part() {
        let ix = OffsetIndexer::new(3, 4);
        let mut syms = [0u8; 3];
        for chunk in 0..5usize.pow(3) {
            ix.left_chars_of_chunk(chunk, &mut syms);
            assert_eq!(ix.char_left_part(&syms), chunk * ix.left_char_stride());
        }
    }
}

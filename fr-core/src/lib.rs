//! Edit distance and optimal alignment over a small fixed alphabet using the
//! Four Russians method: precompute the net effect of the Wagner-Fischer
//! recurrence for every possible `d x d` block once, then answer whole-matrix
//! queries by composing table lookups instead of filling `n * m` cells.
//!
//! Typical use builds one [`SubmatrixTable`] per configuration and runs any
//! number of [`Solver`] queries against it:
//!
//! ```
//! use fr_core::{Solver, SubmatrixTable};
//! use fr_types::{Alphabet, CostModel};
//!
//! let table = SubmatrixTable::build(2, &Alphabet::dna(), CostModel::default(), 1 << 20)?;
//! let solver = Solver::new(b"ACGT", b"A", &table)?;
//! assert_eq!(solver.cost()?, 3);
//! # Ok::<(), fr_types::FrError>(())
//! ```

mod offsets;
mod solver;
pub mod steps;
mod table;
mod trace;

#[cfg(test)]
mod tests;

pub use offsets::OffsetIndexer;
pub use solver::{Alignment, Solver};
pub use table::SubmatrixTable;

use fr_types::{Aligner, Alphabet, Cost, CostModel, FrError, Seq, Sequence};
use std::collections::HashMap;

/// Default memory budget for the precomputed table.
pub const DEFAULT_TABLE_BUDGET: usize = 1 << 30;

/// Block dimension for which the total precompute cost stays sub-linear in
/// the `n * m` work it replaces: `ln n / ln(3 * (|alphabet| + 1)) / 2`,
/// rounded up and at least 1.
pub fn suggested_dimension(n: usize, alphabet_size: usize) -> usize {
    if n < 2 {
        return 1;
    }
    let base = 3.0 * (alphabet_size as f64 + 1.0);
    (((n as f64).ln() / base.ln() / 2.0).ceil() as usize).max(1)
}

/// One-shot distance with the nucleotide alphabet, default costs, and an
/// auto-derived block dimension.
pub fn four_russians_distance(a: Seq, b: Seq) -> Result<Cost, FrError> {
    let alphabet = Alphabet::dna();
    let dim = suggested_dimension(a.len().max(b.len()), alphabet.size());
    let table = SubmatrixTable::build(dim, &alphabet, CostModel::default(), DEFAULT_TABLE_BUDGET)?;
    Solver::new(a, b, &table)?.cost()
}

/// As [`four_russians_distance`], also returning the alignment.
pub fn four_russians_align(a: Seq, b: Seq) -> Result<(Cost, Alignment), FrError> {
    let alphabet = Alphabet::dna();
    let dim = suggested_dimension(a.len().max(b.len()), alphabet.size());
    let table = SubmatrixTable::build(dim, &alphabet, CostModel::default(), DEFAULT_TABLE_BUDGET)?;
    Solver::new(a, b, &table)?.align()
}

/// Reusable aligner configuration implementing [`fr_types::Aligner`]; tables
/// are built lazily per dimension and cached across calls.
#[derive(Debug)]
pub struct FourRussians {
    /// Block dimension; 0 derives it from the longer input per query.
    pub dimension: usize,
    pub alphabet: Alphabet,
    pub costs: CostModel,
    pub max_table_bytes: usize,
    /// Whether `align` reconstructs the alignment or only reports the cost.
    pub trace: bool,
    tables: HashMap<usize, SubmatrixTable>,
}

impl Default for FourRussians {
    fn default() -> Self {
        FourRussians {
            dimension: 0,
            alphabet: Alphabet::dna(),
            costs: CostModel::default(),
            max_table_bytes: DEFAULT_TABLE_BUDGET,
            trace: true,
            tables: HashMap::new(),
        }
    }
}

impl FourRussians {
    pub fn new(dimension: usize, costs: CostModel) -> Self {
        FourRussians {
            dimension,
            costs,
            ..Default::default()
        }
    }
}

impl Aligner for FourRussians {
    fn align(&mut self, a: Seq, b: Seq) -> (Cost, Option<(Sequence, Sequence)>) {
        let dim = if self.dimension > 0 {
            self.dimension
        } else {
            suggested_dimension(a.len().max(b.len()), self.alphabet.size())
        };
        let table = self.tables.entry(dim).or_insert_with(|| {
            SubmatrixTable::build(dim, &self.alphabet, self.costs, self.max_table_bytes).unwrap()
        });
        let solver = Solver::new(a, b, table).unwrap();
        if self.trace {
            let (cost, alignment) = solver.align().unwrap();
            (cost, Some((alignment.a, alignment.b)))
        } else {
            (solver.cost().unwrap(), None)
        }
    }
}

use crate::Cost;
use thiserror::Error;

/// Everything that can go wrong while configuring or running the aligner.
///
/// All failures are synchronous and final; nothing here is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrError {
    /// A sequence character outside the alphabet and not the padding symbol.
    #[error("symbol {:?} is not in the alphabet", *symbol as char)]
    InvalidSymbol { symbol: u8 },

    #[error("the alphabet is empty")]
    EmptyAlphabet,

    #[error("duplicate symbol {:?} in the alphabet", *symbol as char)]
    DuplicateSymbol { symbol: u8 },

    /// The padding symbol must not be a regular alphabet symbol.
    #[error("padding symbol {:?} is part of the alphabet", *padding as char)]
    PaddingInAlphabet { padding: u8 },

    #[error("block dimension must be at least 1")]
    InvalidDimension,

    /// The base-3 step encoding only holds when every per-cell delta stays
    /// within -1..=1, which bounds the supported cost models.
    #[error("unsupported costs sub={sub} ins={ins} del={del}: require ins = del = 1 and sub in 1..=2")]
    UnsupportedCosts { sub: Cost, ins: Cost, del: Cost },

    /// The projected submatrix table does not fit the caller's memory budget.
    /// Checked before any allocation happens.
    #[error("submatrix table needs {required} bytes, over the budget of {budget} bytes")]
    TableSizeExceeded { required: u128, budget: usize },

    /// A lookup hit a slot the table was never built for, i.e. the table was
    /// built for different parameters than the query.
    #[error("submatrix lookup does not match the parameters the table was built for")]
    TableMismatch,
}

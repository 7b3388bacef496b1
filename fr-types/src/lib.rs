//! Shared types for the four-russians crates: sequences, the alphabet model,
//! the linear cost model, and the error taxonomy.

mod alphabet;
mod cost_model;
mod error;

pub use alphabet::Alphabet;
pub use cost_model::CostModel;
pub use error::FrError;

/// Accumulated edit cost.
pub type Cost = i32;

/// A borrowed sequence over the input alphabet.
pub type Seq<'a> = &'a [u8];

/// An owned sequence.
pub type Sequence = Vec<u8>;

pub fn seq_to_string(seq: Seq) -> String {
    String::from_utf8_lossy(seq).into_owned()
}

/// A pairwise aligner returning a cost and optionally two gapped sequences of
/// equal length, in input order.
pub trait Aligner: std::fmt::Debug {
    fn align(&mut self, a: Seq, b: Seq) -> (Cost, Option<(Sequence, Sequence)>);
}

//! Generation of random sequence pairs: a uniform random sequence, and a copy
//! mutated by uniform substitutions, insertions, and deletions.

use fr_types::Sequence;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

pub const NUCLEOTIDES: &[u8] = b"ACGT";

pub fn random_sequence(n: usize, rng: &mut impl Rng) -> Sequence {
    (0..n)
        .map(|_| NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())])
        .collect()
}

/// Apply `(e * |seq|)` random edits to a copy of `seq`.
pub fn mutate(seq: &[u8], e: f32, rng: &mut impl Rng) -> Sequence {
    let mut out = seq.to_vec();
    let edits = (e * seq.len() as f32).ceil() as usize;
    for _ in 0..edits {
        if out.is_empty() {
            out.push(NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())]);
            continue;
        }
        let pos = rng.gen_range(0..out.len());
        match rng.gen_range(0..3) {
            0 => out[pos] = NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())],
            1 => out.insert(pos, NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())]),
            _ => {
                out.remove(pos);
            }
        }
    }
    out
}

/// A random pair of length `n` and error rate `e`, reproducible from `seed`.
pub fn generate_pair(n: usize, e: f32, seed: u64) -> (Sequence, Sequence) {
    let rng = &mut ChaCha8Rng::seed_from_u64(seed);
    let a = random_sequence(n, rng);
    let b = mutate(&a, e, rng);
    (a, b)
}

/// Options to generate input pairs, for `clap(flatten)` in binaries.
#[derive(clap::Args, Debug, Clone, Serialize, Deserialize)]
pub struct DatasetGenerator {
    /// Length of the generated sequences.
    #[clap(short = 'n', long, default_value_t = 1000)]
    pub length: usize,

    /// Induced error rate.
    #[clap(short, long, default_value_t = 0.05)]
    pub error_rate: f32,

    /// Number of pairs to generate.
    #[clap(long, default_value_t = 1)]
    pub cnt: usize,

    /// Seed to initialize the random number generator.
    #[clap(long)]
    pub seed: Option<u64>,
}

impl DatasetGenerator {
    pub fn generate(&self, rng: &mut impl Rng) -> (Sequence, Sequence) {
        let a = random_sequence(self.length, rng);
        let b = mutate(&a, self.error_rate, rng);
        (a, b)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reproducible() {
        assert_eq!(generate_pair(100, 0.1, 31415), generate_pair(100, 0.1, 31415));
    }

    #[test]
    fn error_rate_zero_is_identity() {
        let (a, b) = generate_pair(50, 0.0, 1);
        assert_eq!(a, b);
    }
}

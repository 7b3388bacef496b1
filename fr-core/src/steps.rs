//! Compact encoding of step vectors.
//!
//! A step vector holds, for each of `d` consecutive rows (or columns), the
//! incremental cost of entering that row (column) relative to the previous
//! one. Each entry is in {-1, 0, +1}, so a whole vector packs into a single
//! little-endian base-3 integer with digit `step + 1`. Position 0 is the least
//! significant digit.

use fr_types::Cost;

/// A base-3 encoded step vector.
pub type StepInt = u32;

/// Encode a step vector, or `None` when any entry falls outside -1..=1.
pub fn encode(steps: &[Cost]) -> Option<StepInt> {
    let mut enc: StepInt = 0;
    for &s in steps.iter().rev() {
        if !(-1..=1).contains(&s) {
            return None;
        }
        enc = enc * 3 + (s + 1) as StepInt;
    }
    Some(enc)
}

/// Inverse of `encode`.
pub fn decode(enc: StepInt, dim: usize) -> Vec<Cost> {
    let mut out = vec![0; dim];
    decode_into(enc, &mut out);
    out
}

pub fn decode_into(mut enc: StepInt, out: &mut [Cost]) {
    for s in out.iter_mut() {
        *s = (enc % 3) as Cost - 1;
        enc /= 3;
    }
    debug_assert_eq!(enc, 0);
}

/// Signed sum of all `dim` steps; the total cost change across the edge.
pub fn sum(mut enc: StepInt, dim: usize) -> Cost {
    let mut total = 0;
    for _ in 0..dim {
        total += (enc % 3) as Cost - 1;
        enc /= 3;
    }
    total
}

/// The all `+1` vector: the boundary of an unpadded block.
pub fn ones(dim: usize) -> StepInt {
    leading_ones(dim, dim)
}

/// `+1` on the first `real` positions, `0` on the padded remainder. Boundary
/// vectors entering the global edit matrix have this shape.
pub fn leading_ones(real: usize, dim: usize) -> StepInt {
    debug_assert!(real <= dim);
    let mut enc = 0;
    for pos in (0..dim).rev() {
        enc = enc * 3 + if pos < real { 2 } else { 1 };
    }
    enc
}

/// Human-readable form for debug logging, e.g. `[+1 0 -1]`.
pub fn pretty(enc: StepInt, dim: usize) -> String {
    let parts: Vec<String> = decode(enc, dim)
        .iter()
        .map(|s| match s {
            1 => "+1".to_string(),
            _ => s.to_string(),
        })
        .collect();
    format!("[{}]", parts.join(" "))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_decode_inverse() {
        let v = vec![-1, 0, 1, 1, -1];
        let enc = encode(&v).unwrap();
        assert_eq!(decode(enc, v.len()), v);
        assert_eq!(sum(enc, v.len()), 0);
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(encode(&[0, 2]), None);
        assert_eq!(encode(&[-2]), None);
    }

    #[test]
    fn boundary_vectors() {
        assert_eq!(decode(ones(3), 3), vec![1, 1, 1]);
        assert_eq!(decode(leading_ones(1, 3), 3), vec![1, 0, 0]);
        assert_eq!(decode(leading_ones(0, 2), 2), vec![0, 0]);
        assert_eq!(sum(leading_ones(2, 4), 4), 2);
    }

    #[test]
    fn pretty_form() {
        assert_eq!(pretty(encode(&[1, 0, -1]).unwrap(), 3), "[+1 0 -1]");
    }
}

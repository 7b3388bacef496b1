//! Test helpers: a naive Wagner-Fischer oracle and assertion drivers that
//! check any [`Aligner`] against it on hardcoded and generated inputs.

use fr_types::*;
use itertools::Itertools;

/// The straightforward `O(n * m)` edit distance recurrence, used only as a
/// correctness oracle.
pub fn oracle_distance(a: Seq, b: Seq, costs: &CostModel) -> Cost {
    let mut prev: Vec<Cost> = (0..=b.len()).map(|j| j as Cost * costs.ins).collect();
    let mut curr = vec![0; b.len() + 1];
    for i in 1..=a.len() {
        curr[0] = i as Cost * costs.del;
        for j in 1..=b.len() {
            curr[j] = (prev[j - 1] + costs.sub_cost(a[i - 1], b[j - 1]))
                .min(prev[j] + costs.del)
                .min(curr[j - 1] + costs.ins);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Short hand-picked pairs covering the awkward shapes: empty inputs, equal
/// inputs, pure indels, length differences around block boundaries.
fn test_sequences() -> Vec<(Seq<'static>, Seq<'static>)> {
    vec![
        (b"", b""),
        (b"", b"ACGT"),
        (b"T", b""),
        (b"A", b"A"),
        (b"AG", b"GG"),
        (b"AC", b"AC"),
        (b"ACGT", b"A"),
        (b"ACGT", b"TGCA"),
        (b"AAAA", b"AAAAAAAA"),
        (b"GATTACA", b"GCATGCT"),
        (b"TTTTTTTTTT", b"T"),
        (b"ACGTACGTACGTA", b"ACGTACGGACGTA"),
        (b"CTCTCTTCTCTCTCTA", b"CCTCTCTCTCTCCTCTC"),
        (b"AGTGGGTTGCCTTCATTCCG", b"AGTGGTGTCTTCAGGCCTTCATTCCG"),
    ]
}

/// Size/error grid for generated inputs; sizes straddle typical block
/// dimensions and their multiples.
pub fn gen_seqs() -> impl Iterator<Item = ((Sequence, Sequence), (usize, f32, u64))> {
    let ns = vec![
        0usize, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 16, 17, 31, 32, 33, 50, 100, 127, 128, 200, 300,
    ];
    let es = vec![0.0f32, 0.01, 0.05, 0.10, 0.30, 0.50, 1.0];
    ns.into_iter()
        .cartesian_product(es)
        .enumerate()
        .map(|(i, (n, e))| {
            let seed = 31415 + i as u64;
            ((fr_generate::generate_pair(n, e, seed)), (n, e, seed))
        })
}

/// Check one aligner run: cost against the oracle (and `triple_accel` for
/// unit costs), and validity of the returned alignment.
pub fn test_aligner_on_input(
    a: Seq,
    b: Seq,
    costs: &CostModel,
    aligner: &mut impl Aligner,
    params: &str,
) {
    let expected = oracle_distance(a, b, costs);
    let (cost, alignment) = aligner.align(a, b);
    assert_eq!(
        cost,
        expected,
        "\n{params}\nlet a = \"{}\".as_bytes();\nlet b = \"{}\".as_bytes();\nAligner\n{aligner:?}",
        seq_to_string(a),
        seq_to_string(b),
    );
    if costs.is_unit() {
        assert_eq!(cost, triple_accel::levenshtein_exp(a, b) as Cost, "{params}");
    }
    if let Some((a_aligned, b_aligned)) = alignment {
        verify_alignment(a, b, &a_aligned, &b_aligned, costs, cost, b'-');
    }
}

/// An alignment is valid when both rows have equal length, stripping gaps
/// reproduces the inputs, no column is gap-on-gap, and the column costs sum
/// to the reported distance.
pub fn verify_alignment(
    a: Seq,
    b: Seq,
    a_aligned: Seq,
    b_aligned: Seq,
    costs: &CostModel,
    cost: Cost,
    gap: u8,
) {
    assert_eq!(a_aligned.len(), b_aligned.len());
    let stripped_a: Sequence = a_aligned.iter().copied().filter(|&c| c != gap).collect();
    let stripped_b: Sequence = b_aligned.iter().copied().filter(|&c| c != gap).collect();
    assert_eq!(stripped_a, a, "gapped row does not reproduce the input");
    assert_eq!(stripped_b, b, "gapped row does not reproduce the input");
    let mut total = 0;
    for (&ca, &cb) in a_aligned.iter().zip(b_aligned) {
        total += match (ca == gap, cb == gap) {
            (false, false) => costs.sub_cost(ca, cb),
            (false, true) => costs.del,
            (true, false) => costs.ins,
            (true, true) => panic!("gap aligned against gap"),
        };
    }
    assert_eq!(total, cost, "alignment cost does not match reported cost");
}

/// Run an aligner over the hardcoded pairs and the full generated grid.
pub fn test_aligner(mut aligner: impl Aligner, costs: &CostModel) {
    test_aligner_up_to(&mut aligner, costs, usize::MAX);
}

/// As [`test_aligner`], but only inputs with `n <= max_n`.
pub fn test_aligner_up_to(aligner: &mut impl Aligner, costs: &CostModel, max_n: usize) {
    for (a, b) in test_sequences() {
        if a.len().max(b.len()) > max_n {
            continue;
        }
        test_aligner_on_input(
            a,
            b,
            costs,
            aligner,
            &format!(
                "hardcoded pair: a {:?} b {:?}",
                seq_to_string(a),
                seq_to_string(b)
            ),
        );
    }
    for ((a, b), (n, e, seed)) in gen_seqs() {
        if a.len().max(b.len()) > max_n {
            continue;
        }
        test_aligner_on_input(
            &a,
            &b,
            costs,
            aligner,
            &format!("seed {seed:>10} n {n:>5} e {e:>.2}"),
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn oracle_basics() {
        let unit = CostModel::unit();
        assert_eq!(oracle_distance(b"", b"", &unit), 0);
        assert_eq!(oracle_distance(b"ACGT", b"", &unit), 4);
        assert_eq!(oracle_distance(b"ACGT", b"ACGT", &unit), 0);
        assert_eq!(oracle_distance(b"AG", b"GG", &unit), 1);
        // With sub = 2 a substitution ties an indel pair.
        assert_eq!(oracle_distance(b"AG", b"GG", &CostModel::default()), 2);
    }

    #[test]
    fn oracle_matches_triple_accel() {
        let unit = CostModel::unit();
        for ((a, b), _) in gen_seqs().take(40) {
            assert_eq!(
                oracle_distance(&a, &b, &unit),
                triple_accel::levenshtein_exp(&a, &b) as Cost
            );
        }
    }
}

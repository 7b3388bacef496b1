use crate::{four_russians_align, four_russians_distance, FourRussians, Solver, SubmatrixTable};
use fr_test::{oracle_distance, test_aligner_up_to};
use fr_types::{Aligner, Alphabet, CostModel, FrError};

fn table(dim: usize, costs: CostModel) -> SubmatrixTable {
    SubmatrixTable::build(dim, &Alphabet::dna(), costs, 1 << 28).unwrap()
}

#[test]
fn one_replace() {
    let t = table(2, CostModel::default());
    assert_eq!(Solver::new(b"AG", b"GG", &t).unwrap().cost().unwrap(), 2);
    let (cost, alignment) = Solver::new(b"AG", b"GG", &t).unwrap().align().unwrap();
    assert_eq!(cost, 2);
    assert_eq!(alignment.a, b"AG");
    assert_eq!(alignment.b, b"GG");
}

#[test]
fn equal_inputs() {
    for dim in 1..=3 {
        let t = table(dim, CostModel::default());
        let (cost, alignment) = Solver::new(b"AC", b"AC", &t).unwrap().align().unwrap();
        assert_eq!(cost, 0);
        assert_eq!(alignment.a, b"AC");
        assert_eq!(alignment.b, b"AC");
    }
}

#[test]
fn trailing_deletions() {
    let t = table(2, CostModel::default());
    let (cost, alignment) = Solver::new(b"ACGT", b"A", &t).unwrap().align().unwrap();
    assert_eq!(cost, 3);
    assert_eq!(alignment.a, b"ACGT");
    assert_eq!(alignment.b, b"A---");
}

#[test]
fn empty_inputs() {
    let t = table(2, CostModel::unit());
    assert_eq!(Solver::new(b"", b"", &t).unwrap().cost().unwrap(), 0);
    assert_eq!(Solver::new(b"", b"ACGT", &t).unwrap().cost().unwrap(), 4);
    assert_eq!(Solver::new(b"GATTACA", b"", &t).unwrap().cost().unwrap(), 7);
}

// With an empty input the block grid has zero columns and the path is a
// straight run of indels.
#[test]
fn align_with_empty_input() {
    let t = table(2, CostModel::unit());
    let (cost, alignment) = Solver::new(b"GATTACA", b"", &t).unwrap().align().unwrap();
    assert_eq!(cost, 7);
    assert_eq!(alignment.a, b"GATTACA");
    assert_eq!(alignment.b, b"-------");
    let (cost, alignment) = Solver::new(b"", b"ACGT", &t).unwrap().align().unwrap();
    assert_eq!(cost, 4);
    assert_eq!(alignment.a, b"----");
    assert_eq!(alignment.b, b"ACGT");
    let (cost, alignment) = Solver::new(b"", b"", &t).unwrap().align().unwrap();
    assert_eq!(cost, 0);
    assert!(alignment.a.is_empty() && alignment.b.is_empty());
}

#[test]
fn matches_oracle_default_costs() {
    for dim in 1..=3 {
        test_aligner_up_to(
            &mut FourRussians::new(dim, CostModel::default()),
            &CostModel::default(),
            128,
        );
    }
}

#[test]
fn matches_oracle_unit_costs() {
    for dim in 1..=3 {
        test_aligner_up_to(
            &mut FourRussians::new(dim, CostModel::unit()),
            &CostModel::unit(),
            128,
        );
    }
}

#[test]
fn matches_oracle_auto_dimension() {
    test_aligner_up_to(&mut FourRussians::default(), &CostModel::default(), 300);
}

#[test]
fn cost_only_mode_matches_trace_mode() {
    let mut traced = FourRussians::new(2, CostModel::default());
    let mut cost_only = FourRussians {
        trace: false,
        ..FourRussians::new(2, CostModel::default())
    };
    for ((a, b), _) in fr_test::gen_seqs().take(60) {
        let (c1, alignment) = traced.align(&a, &b);
        let (c2, none) = cost_only.align(&a, &b);
        assert_eq!(c1, c2);
        assert!(alignment.is_some());
        assert!(none.is_none());
    }
}

#[test]
fn symmetry() {
    let t = table(2, CostModel::default());
    for ((a, b), _) in fr_test::gen_seqs().take(60) {
        let fwd = Solver::new(&a, &b, &t).unwrap().cost().unwrap();
        let bwd = Solver::new(&b, &a, &t).unwrap().cost().unwrap();
        assert_eq!(fwd, bwd);
    }
}

// Inputs shorter than the block row stay on the row axis after the internal
// swap, so alignments must come back in caller order.
#[test]
fn swapped_inputs_align_in_caller_order() {
    let t = table(2, CostModel::default());
    let (cost, alignment) = Solver::new(b"A", b"ACGT", &t).unwrap().align().unwrap();
    assert_eq!(cost, 3);
    assert_eq!(alignment.a, b"A---");
    assert_eq!(alignment.b, b"ACGT");
}

#[test]
fn rejects_unknown_symbol() {
    let t = table(2, CostModel::default());
    let err = Solver::new(b"ACXT", b"A", &t).unwrap_err();
    assert!(matches!(err, FrError::InvalidSymbol { symbol: b'X' }));
}

#[test]
fn one_shot_helpers() {
    assert_eq!(four_russians_distance(b"ACGT", b"A").unwrap(), 3);
    let (cost, alignment) = four_russians_align(b"GATTACA", b"GCATGCT").unwrap();
    assert_eq!(cost, oracle_distance(b"GATTACA", b"GCATGCT", &CostModel::default()));
    assert_eq!(alignment.a.len(), alignment.b.len());
}

#[test]
fn suggested_dimension_grows_slowly() {
    assert_eq!(crate::suggested_dimension(0, 4), 1);
    assert_eq!(crate::suggested_dimension(1, 4), 1);
    assert_eq!(crate::suggested_dimension(100, 4), 1);
    assert!(crate::suggested_dimension(1 << 20, 4) >= 2);
    assert!(crate::suggested_dimension(1 << 40, 4) <= 6);
}

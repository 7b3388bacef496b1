use crate::{Cost, FrError};
use serde::{Deserialize, Serialize};

/// Linear edit costs: substitution, insertion, deletion.
///
/// The Four Russians step encoding tracks per-cell cost deltas in {-1, 0, +1},
/// so only unit indels are supported, with `sub` either 1 or 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostModel {
    pub sub: Cost,
    pub ins: Cost,
    pub del: Cost,
}

impl CostModel {
    pub fn new(sub: Cost, ins: Cost, del: Cost) -> Result<Self, FrError> {
        let cm = CostModel { sub, ins, del };
        cm.validate()?;
        Ok(cm)
    }

    /// Levenshtein costs.
    pub fn unit() -> Self {
        CostModel {
            sub: 1,
            ins: 1,
            del: 1,
        }
    }

    pub fn validate(&self) -> Result<(), FrError> {
        if self.ins == 1 && self.del == 1 && (1..=2).contains(&self.sub) {
            Ok(())
        } else {
            Err(FrError::UnsupportedCosts {
                sub: self.sub,
                ins: self.ins,
                del: self.del,
            })
        }
    }

    #[inline]
    pub fn sub_cost(&self, a: u8, b: u8) -> Cost {
        if a == b {
            0
        } else {
            self.sub
        }
    }

    pub fn is_unit(&self) -> bool {
        *self == Self::unit()
    }
}

/// Substitutions twice the price of an indel, the classic setting of the
/// original Four Russians edit distance formulation.
impl Default for CostModel {
    fn default() -> Self {
        CostModel {
            sub: 2,
            ins: 1,
            del: 1,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validation() {
        assert!(CostModel::unit().validate().is_ok());
        assert!(CostModel::default().validate().is_ok());
        assert!(CostModel::new(3, 1, 1).is_err());
        assert!(CostModel::new(1, 2, 1).is_err());
        assert!(CostModel::new(1, 1, 0).is_err());
    }

    #[test]
    fn sub_cost() {
        let cm = CostModel::default();
        assert_eq!(cm.sub_cost(b'A', b'A'), 0);
        assert_eq!(cm.sub_cost(b'A', b'T'), 2);
    }
}

//! Time-segment selection functions.
use crate::{
    attribute::Attribute,
    binding::{Error, Partition, PartitionMap},
    catalog::{arg, series},
    mask::Mask,
};

/// Default selection with no splitting: the single catch-all
/// partition, every observation selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelection;

impl Partition for NoSelection {
    fn args(&self) -> &[&'static str] {
        &["toas"]
    }
    fn evaluate(&self, args: &[Attribute]) -> Result<PartitionMap, Error> {
        let len = arg(args, 0, "toas")?
            .len()
            .ok_or_else(|| Error::AttributeKind("toas".to_string()))?;
        let mut map = PartitionMap::new();
        map.insert(String::new(), Mask::ones(len));
        Ok(map)
    }
}

/// Splits the dataset in two at the midpoint of its time span:
/// `t1` retains epochs at or below `(max + min) / 2`, `t2` the
/// strictly later ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct CutHalf;

impl Partition for CutHalf {
    fn args(&self) -> &[&'static str] {
        &["toas"]
    }
    fn evaluate(&self, args: &[Attribute]) -> Result<PartitionMap, Error> {
        let toas = series(args, 0, "toas")?;
        let min = toas.iter().copied().fold(f64::INFINITY, f64::min);
        let max = toas.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let midpoint = (max + min) / 2.0;
        let mut map = PartitionMap::new();
        map.insert(
            "t1".to_string(),
            toas.iter().map(|t| *t <= midpoint).collect(),
        );
        map.insert(
            "t2".to_string(),
            toas.iter().map(|t| *t > midpoint).collect(),
        );
        Ok(map)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn no_selection() {
        let masks = NoSelection
            .evaluate(&[Attribute::Series(vec![1.0, 2.0, 3.0])])
            .unwrap();
        assert_eq!(masks.len(), 1);
        assert!(masks[""].is_full());
        assert_eq!(masks[""].len(), 3);
    }
    #[test]
    fn no_selection_rejects_scalars() {
        let err = NoSelection.evaluate(&[Attribute::Scalar(1.0)]).unwrap_err();
        assert_eq!(err, Error::AttributeKind("toas".to_string()));
    }
    #[test]
    fn cut_half() {
        let masks = CutHalf
            .evaluate(&[Attribute::Series(vec![1.0, 2.0, 3.0, 4.0])])
            .unwrap();
        assert_eq!(masks.len(), 2);
        // midpoint 2.5 belongs to the lower segment
        assert_eq!(masks["t1"], Mask::from(vec![true, true, false, false]));
        assert_eq!(masks["t2"], Mask::from(vec![false, false, true, true]));
        assert_eq!(
            masks["t1"].clone() & masks["t2"].clone(),
            Mask::zeros(4)
        );
        assert!((masks["t1"].clone() | masks["t2"].clone()).is_full());
    }
    #[test]
    fn cut_half_midpoint_inclusive() {
        let masks = CutHalf
            .evaluate(&[Attribute::Series(vec![0.0, 5.0, 10.0])])
            .unwrap();
        assert_eq!(masks["t1"], Mask::from(vec![true, true, false]));
    }
}

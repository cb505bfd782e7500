//! Dataset attributes and the capability interface selection
//! functions resolve them through.
use std::collections::BTreeMap;

use crate::mask::Mask;

/// Flag name to categorical column, all columns aligned
/// on the observation index.
pub type FlagTable = BTreeMap<String, Vec<String>>;

/// [Attribute] represents the per-observation metadata columns
/// (and scalars) a dataset may expose to selection functions.
#[derive(Clone, Debug, PartialEq)]
pub enum Attribute {
    /// Numeric column, like observation epochs (MJD) or TOA errors.
    Series(Vec<f64>),
    /// Categorical column, like a backend identifier per TOA.
    Labels(Vec<String>),
    /// Table of categorical columns indexed by flag name.
    Table(FlagTable),
    /// Plain scalar value.
    Scalar(f64),
}

impl Attribute {
    /// Observation count for array valued attributes, None for scalars.
    /// A [Attribute::Table] reports the length of its first column.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Series(v) => Some(v.len()),
            Self::Labels(v) => Some(v.len()),
            Self::Table(t) => t.values().next().map(|col| col.len()),
            Self::Scalar(_) => None,
        }
    }

    /// Restricts self to the observations retained by `mask`.
    /// Scalars pass through unchanged, table columns are sliced
    /// one by one.
    pub fn masked(&self, mask: &Mask) -> Self {
        match self {
            Self::Series(v) => Self::Series(mask.filter(v)),
            Self::Labels(v) => Self::Labels(mask.filter(v)),
            Self::Table(t) => Self::Table(
                t.iter()
                    .map(|(k, col)| (k.clone(), mask.filter(col)))
                    .collect(),
            ),
            Self::Scalar(v) => Self::Scalar(*v),
        }
    }

    /// Numeric column access.
    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            Self::Series(v) => Some(v),
            _ => None,
        }
    }

    /// Categorical column access.
    pub fn as_labels(&self) -> Option<&[String]> {
        match self {
            Self::Labels(v) => Some(v),
            _ => None,
        }
    }

    /// Flag table access.
    pub fn as_table(&self) -> Option<&FlagTable> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Vec<f64>> for Attribute {
    fn from(v: Vec<f64>) -> Self {
        Self::Series(v)
    }
}

impl From<Vec<String>> for Attribute {
    fn from(v: Vec<String>) -> Self {
        Self::Labels(v)
    }
}

impl From<FlagTable> for Attribute {
    fn from(t: FlagTable) -> Self {
        Self::Table(t)
    }
}

impl From<f64> for Attribute {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

/// [TimingData] is the dataset interface consumed by selection
/// functions: a stable identifier plus named attributes reachable
/// by exact-name lookup. [TimingData::get] stands in for both plain
/// attributes and accessor methods on the dataset.
pub trait TimingData {
    /// Stable dataset identifier, like the pulsar name.
    fn name(&self) -> &str;
    /// Resolves an attribute by exact name.
    fn get(&self, attr: &str) -> Option<Attribute>;
    /// True if this dataset provides attribute `attr`.
    fn has(&self, attr: &str) -> bool {
        self.get(attr).is_some()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn attribute_len() {
        assert_eq!(Attribute::Series(vec![1.0, 2.0]).len(), Some(2));
        assert_eq!(Attribute::Scalar(1.0).len(), None);
        let mut table = FlagTable::new();
        table.insert("fe".to_string(), vec!["L".to_string(), "S".to_string()]);
        assert_eq!(Attribute::Table(table).len(), Some(2));
        assert_eq!(Attribute::Table(FlagTable::new()).len(), None);
    }
    #[test]
    fn attribute_masked() {
        let mask = Mask::from(vec![true, false, true]);
        let attr = Attribute::Series(vec![1.0, 2.0, 3.0]);
        assert_eq!(attr.masked(&mask), Attribute::Series(vec![1.0, 3.0]));

        let mut table = FlagTable::new();
        table.insert(
            "B".to_string(),
            ["10CM", "20CM", "40CM"].map(|s| s.to_string()).to_vec(),
        );
        let masked = Attribute::Table(table).masked(&mask);
        let table = masked.as_table().unwrap();
        assert_eq!(
            table["B"],
            vec!["10CM".to_string(), "40CM".to_string()]
        );

        assert_eq!(
            Attribute::Scalar(1.4).masked(&mask),
            Attribute::Scalar(1.4)
        );
    }
}

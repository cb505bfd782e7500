//! Boolean observation masks.
use thiserror::Error;

/// Mask application errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Elementwise operations require the mask and the array
    /// to share one observation index.
    #[error("mask length {0} does not match array length {1}")]
    ShapeMismatch(usize, usize),
}

/// [Mask] flags the observations retained by one data subset.
/// One entry per observation, `true` meaning "selected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mask(Vec<bool>);

impl Mask {
    /// Builds a [Mask] selecting all of `len` observations.
    pub fn ones(len: usize) -> Self {
        Self(vec![true; len])
    }

    /// Builds a [Mask] selecting none of `len` observations.
    pub fn zeros(len: usize) -> Self {
        Self(vec![false; len])
    }

    /// Number of observations this [Mask] spans.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if this [Mask] spans zero observations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected observations.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }

    /// True if every observation is selected.
    pub fn is_full(&self) -> bool {
        self.0.iter().all(|b| *b)
    }

    /// Iterates selection state, one entry per observation.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Compresses `values` down to the selected observations.
    /// Used when restricting a dataset attribute to one subset.
    pub fn filter<T: Clone>(&self, values: &[T]) -> Vec<T> {
        values
            .iter()
            .zip(self.0.iter())
            .filter_map(|(v, b)| if *b { Some(v.clone()) } else { None })
            .collect()
    }

    /// Elementwise product of self and `values`: deselected entries
    /// are zeroed, length is preserved.
    pub fn scale(&self, values: &[f64]) -> Result<Vec<f64>, Error> {
        if self.0.len() != values.len() {
            return Err(Error::ShapeMismatch(self.0.len(), values.len()));
        }
        Ok(values
            .iter()
            .zip(self.0.iter())
            .map(|(v, b)| if *b { *v } else { 0.0 })
            .collect())
    }
}

impl From<Vec<bool>> for Mask {
    fn from(bits: Vec<bool>) -> Self {
        Self(bits)
    }
}

impl FromIterator<bool> for Mask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::ops::Not for Mask {
    type Output = Mask;
    fn not(self) -> Self {
        Self(self.0.iter().map(|b| !b).collect())
    }
}

impl std::ops::BitAnd for Mask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(
            self.0
                .iter()
                .zip(rhs.0.iter())
                .map(|(a, b)| *a && *b)
                .collect(),
        )
    }
}

impl std::ops::BitOr for Mask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(
            self.0
                .iter()
                .zip(rhs.0.iter())
                .map(|(a, b)| *a || *b)
                .collect(),
        )
    }
}

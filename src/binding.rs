//! Argument binding: resolves the attributes a selection function
//! declares from a [TimingData] implementation.
use std::collections::BTreeMap;

use thiserror::Error;

#[cfg(feature = "log")]
use log::debug;

use crate::{
    attribute::{Attribute, TimingData},
    mask::{Error as MaskError, Mask},
};

/// Label to [Mask] partition, one entry per data subset.
/// The empty label denotes the single catch-all group.
pub type PartitionMap = BTreeMap<String, Mask>;

/// Binding and evaluation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An attribute a selection function declares is neither supplied
    /// by the caller nor provided by the dataset.
    #[error("attribute \"{0}\" cannot be resolved from this dataset")]
    MissingArgument(String),
    /// A resolved attribute does not have the kind the selection
    /// function expects, like a flag column where epochs are declared.
    #[error("attribute \"{0}\" does not have the expected kind")]
    AttributeKind(String),
    #[error("mask application error: {0}")]
    Mask(#[from] MaskError),
}

/// A [Partition] function splits observations into labelled subsets.
/// It declares the dataset attributes it needs by name and receives
/// them resolved, in declaration order.
pub trait Partition {
    /// Attribute names this function requires, in positional order.
    fn args(&self) -> &[&'static str];
    /// Partitions the resolved attributes into one [Mask] per label.
    fn evaluate(&self, args: &[Attribute]) -> Result<PartitionMap, Error>;
}

/// [Bound] attaches a [Partition] function to datasets: declared
/// attribute names are resolved through [TimingData::get], and any
/// array attribute whose length matches a supplied sub-selection
/// mask is sliced down to that subset first.
#[derive(Debug, Clone)]
pub struct Bound<P: Partition> {
    func: P,
}

impl<P: Partition> Bound<P> {
    /// Wraps a [Partition] function.
    pub fn new(func: P) -> Self {
        Self { func }
    }

    /// Read-only access to the wrapped function.
    pub fn inner(&self) -> &P {
        &self.func
    }

    /// Evaluates against `psr` over the full observation set.
    pub fn call(&self, psr: &dyn TimingData) -> Result<PartitionMap, Error> {
        self.call_with(&[], Some(psr), None)
    }

    /// Evaluates against `psr`, restricted to the observations
    /// retained by `mask`.
    pub fn call_masked(
        &self,
        psr: &dyn TimingData,
        mask: &Mask,
    ) -> Result<PartitionMap, Error> {
        self.call_with(&[], Some(psr), Some(mask))
    }

    /// General form: `leading` supplies the first declared attributes
    /// directly, the remainder is resolved from `psr` when one is
    /// given. Unresolvable attributes fail with
    /// [Error::MissingArgument], surfaced as is.
    pub fn call_with(
        &self,
        leading: &[Attribute],
        psr: Option<&dyn TimingData>,
        mask: Option<&Mask>,
    ) -> Result<PartitionMap, Error> {
        let declared = self.func.args();
        let mut resolved: Vec<Attribute> = Vec::with_capacity(declared.len());
        resolved.extend_from_slice(&leading[..leading.len().min(declared.len())]);

        for name in declared.iter().skip(resolved.len()) {
            let attr = psr
                .and_then(|psr| psr.get(name))
                .ok_or_else(|| Error::MissingArgument(name.to_string()))?;

            // slice array attributes aligned with the sub-selection,
            // pass anything else through unmodified
            let attr = match (mask, attr.len()) {
                (Some(mask), Some(len)) if mask.len() == len => {
                    #[cfg(feature = "log")]
                    debug!("\"{}\": sliced to {} observations", name, mask.count());
                    attr.masked(mask)
                },
                _ => attr,
            };

            resolved.push(attr);
        }

        self.func.evaluate(&resolved)
    }
}

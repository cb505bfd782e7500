//! Per-dataset selection adapter: partition masks and
//! per-partition parameter construction.
use std::collections::BTreeMap;

use crate::{
    attribute::TimingData,
    binding::{Bound, Error, Partition, PartitionMap},
    mask::Mask,
};

/// [Selection] binds a [Partition] function to one dataset and
/// builds one independent model parameter per partition label.
///
/// ```
/// use toa_select::{Attribute, ByBackend, Selection, TimingData};
///
/// struct Psr {
///     backend_flags: Vec<String>,
/// }
///
/// impl TimingData for Psr {
///     fn name(&self) -> &str {
///         "J0000+0000"
///     }
///     fn get(&self, attr: &str) -> Option<Attribute> {
///         match attr {
///             "backend_flags" => Some(self.backend_flags.clone().into()),
///             _ => None,
///         }
///     }
/// }
///
/// let psr = Psr {
///     backend_flags: ["GUPPI", "GUPPI", "ASP"].map(|s| s.to_string()).to_vec(),
/// };
///
/// let selection = Selection::new(ByBackend, &psr);
/// let (params, masks) = selection.params("efac", |name| name.to_string()).unwrap();
/// assert!(params.contains_key("J0000+0000_GUPPI_efac"));
/// assert_eq!(masks["J0000+0000_ASP_efac"].count(), 1);
/// ```
pub struct Selection<'a, P: Partition> {
    func: Bound<P>,
    psr: &'a dyn TimingData,
}

impl<'a, P: Partition> Selection<'a, P> {
    /// Builds a [Selection] over `psr` from a [Partition] function.
    pub fn new(func: P, psr: &'a dyn TimingData) -> Self {
        Self {
            func: Bound::new(func),
            psr,
        }
    }

    /// Builds a [Selection] from an already [Bound] function.
    pub fn from_bound(func: Bound<P>, psr: &'a dyn TimingData) -> Self {
        Self { func, psr }
    }

    /// Current partition of the dataset, one [Mask] per label.
    /// Recomputed on every call: mutations of the dataset are
    /// picked up by re-reading.
    pub fn masks(&self) -> Result<PartitionMap, Error> {
        self.func.call(self.psr)
    }

    /// Parameter name for one partition label:
    /// `{psr}_{label}_{parname}`, or `{psr}_{parname}` for the
    /// catch-all (empty) label.
    fn composite_name(&self, label: &str, parname: &str) -> String {
        if label.is_empty() {
            format!("{}_{}", self.psr.name(), parname)
        } else {
            format!("{}_{}_{}", self.psr.name(), label, parname)
        }
    }

    /// Builds one parameter per partition label through `factory`,
    /// keyed by composite name, alongside the raw partition masks
    /// under the same keys. An empty partition yields empty maps.
    pub fn params<T, F: Fn(&str) -> T>(
        &self,
        parname: &str,
        factory: F,
    ) -> Result<(BTreeMap<String, T>, BTreeMap<String, Mask>), Error> {
        let mut params = BTreeMap::new();
        let mut masks = BTreeMap::new();
        for (label, mask) in self.masks()? {
            let name = self.composite_name(&label, parname);
            params.insert(name.clone(), factory(&name));
            masks.insert(name, mask);
        }
        Ok((params, masks))
    }

    /// Like [Selection::params], but records the elementwise product
    /// of each partition mask and `arr` instead of the raw mask:
    /// per label, `arr` with the deselected entries zeroed.
    pub fn scaled_params<T, F: Fn(&str) -> T>(
        &self,
        parname: &str,
        factory: F,
        arr: &[f64],
    ) -> Result<(BTreeMap<String, T>, BTreeMap<String, Vec<f64>>), Error> {
        let mut params = BTreeMap::new();
        let mut scaled = BTreeMap::new();
        for (label, mask) in self.masks()? {
            let name = self.composite_name(&label, parname);
            params.insert(name.clone(), factory(&name));
            scaled.insert(name, mask.scale(arr)?);
        }
        Ok((params, scaled))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::attribute::Attribute;
    use crate::binding::Error as BindingError;
    use crate::mask::Error as MaskError;

    struct Psr;

    impl TimingData for Psr {
        fn name(&self) -> &str {
            "J0000+0000"
        }
        fn get(&self, attr: &str) -> Option<Attribute> {
            match attr {
                "backend_flags" => Some(Attribute::Labels(
                    ["GUPPI", "ASP", "GUPPI"].map(|s| s.to_string()).to_vec(),
                )),
                _ => None,
            }
        }
    }

    struct SplitBackends;

    impl Partition for SplitBackends {
        fn args(&self) -> &[&'static str] {
            &["backend_flags"]
        }
        fn evaluate(&self, args: &[Attribute]) -> Result<PartitionMap, Error> {
            let flags = args[0]
                .as_labels()
                .ok_or_else(|| Error::AttributeKind("backend_flags".to_string()))?;
            let mut map = PartitionMap::new();
            for val in ["ASP", "GUPPI"] {
                map.insert(
                    val.to_string(),
                    flags.iter().map(|f| f.as_str() == val).collect(),
                );
            }
            Ok(map)
        }
    }

    struct Empty;

    impl Partition for Empty {
        fn args(&self) -> &[&'static str] {
            &[]
        }
        fn evaluate(&self, _: &[Attribute]) -> Result<PartitionMap, Error> {
            Ok(PartitionMap::new())
        }
    }

    #[test]
    fn composite_naming() {
        let psr = Psr;
        let selection = Selection::new(SplitBackends, &psr);
        assert_eq!(
            selection.composite_name("GUPPI", "efac"),
            "J0000+0000_GUPPI_efac"
        );
        assert_eq!(selection.composite_name("", "efac"), "J0000+0000_efac");
    }
    #[test]
    fn params_and_masks() {
        let psr = Psr;
        let selection = Selection::new(SplitBackends, &psr);
        let (params, masks) = selection.params("efac", |name| name.to_string()).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(
            params.keys().cloned().collect::<Vec<_>>(),
            vec!["J0000+0000_ASP_efac", "J0000+0000_GUPPI_efac"]
        );
        assert_eq!(
            masks["J0000+0000_GUPPI_efac"],
            Mask::from(vec![true, false, true])
        );
        assert_eq!(params["J0000+0000_ASP_efac"], "J0000+0000_ASP_efac");
    }
    #[test]
    fn scaled_params() {
        let psr = Psr;
        let selection = Selection::new(SplitBackends, &psr);
        let (_, scaled) = selection
            .scaled_params("efac", |name| name.to_string(), &[0.1, 0.2, 0.3])
            .unwrap();
        assert_eq!(scaled["J0000+0000_GUPPI_efac"], vec![0.1, 0.0, 0.3]);
        assert_eq!(scaled["J0000+0000_ASP_efac"], vec![0.0, 0.2, 0.0]);
    }
    #[test]
    fn scaled_params_shape_mismatch() {
        let psr = Psr;
        let selection = Selection::new(SplitBackends, &psr);
        let err = selection
            .scaled_params("efac", |name| name.to_string(), &[0.1, 0.2])
            .unwrap_err();
        assert_eq!(err, BindingError::Mask(MaskError::ShapeMismatch(3, 2)));
    }
    #[test]
    fn empty_partition_is_not_an_error() {
        let psr = Psr;
        let selection = Selection::new(Empty, &psr);
        let (params, masks) = selection.params("efac", |name| name.to_string()).unwrap();
        assert!(params.is_empty());
        assert!(masks.is_empty());
    }
}

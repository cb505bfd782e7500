//! Flag-value selection functions.
use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{
    attribute::Attribute,
    binding::{Error, Partition, PartitionMap},
    catalog::{arg, labels, table},
    mask::Mask,
};

/// Reserved [FilterSpec::PerKey] key addressing the primary
/// backend flag column rather than the flag table.
pub const BACKEND_KEY: &str = "backend";

/// Backends operated by the NANOGrav collaboration, matched as
/// unanchored substrings of the backend flag value.
pub const NANOGRAV_BACKENDS: [&str; 5] = ["ASP", "GASP", "GUPPI", "PUPPI", "YUPPI"];

/// Distinct values of `values` in sorted order, optionally restricted
/// to those containing at least one `allowed` token as a substring.
fn distinct_values(values: &[String], allowed: Option<&[String]>) -> Vec<String> {
    values
        .iter()
        .unique()
        .sorted()
        .filter(|val| match allowed {
            Some(list) => list.iter().any(|token| val.contains(token.as_str())),
            None => true,
        })
        .cloned()
        .collect()
}

/// One partition per distinct value of `values`, each mask flagging
/// the observations carrying that value.
fn by_values(values: &[String], allowed: Option<&[String]>) -> PartitionMap {
    distinct_values(values, allowed)
        .into_iter()
        .map(|val| {
            let mask: Mask = values.iter().map(|v| *v == val).collect();
            (val, mask)
        })
        .collect()
}

/// Splits by backend: one partition per distinct backend flag value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByBackend;

impl Partition for ByBackend {
    fn args(&self) -> &[&'static str] {
        &["backend_flags"]
    }
    fn evaluate(&self, args: &[Attribute]) -> Result<PartitionMap, Error> {
        let flags = labels(args, 0, "backend_flags")?;
        Ok(by_values(flags, None))
    }
}

/// Splits by observatory: one partition per distinct telescope value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByTelescope;

impl Partition for ByTelescope {
    fn args(&self) -> &[&'static str] {
        &["telescope"]
    }
    fn evaluate(&self, args: &[Attribute]) -> Result<PartitionMap, Error> {
        let telescopes = labels(args, 0, "telescope")?;
        Ok(by_values(telescopes, None))
    }
}

/// Splits by one flag-table column: one partition per distinct value
/// found under `key` in the dataset flag table.
#[derive(Debug, Clone, Default)]
pub struct ByFlag {
    /// Flag table column to split on.
    pub key: String,
}

impl ByFlag {
    /// Split on an arbitrary flag column.
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }
    /// Split by PPTA frequency band, the `-B` flag.
    pub fn band() -> Self {
        Self::new("B")
    }
    /// Split by frontend (receiver), the `-fe` flag.
    pub fn frontend() -> Self {
        Self::new("fe")
    }
}

impl Partition for ByFlag {
    fn args(&self) -> &[&'static str] {
        &["flags"]
    }
    fn evaluate(&self, args: &[Attribute]) -> Result<PartitionMap, Error> {
        let flags = table(args, 0, "flags")?;
        let column = flags
            .get(&self.key)
            .ok_or_else(|| Error::MissingArgument(self.key.clone()))?;
        Ok(by_values(column, None))
    }
}

/// Splits by backend, retaining NANOGrav backends only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NanogravBackends;

impl Partition for NanogravBackends {
    fn args(&self) -> &[&'static str] {
        &["backend_flags"]
    }
    fn evaluate(&self, args: &[Attribute]) -> Result<PartitionMap, Error> {
        let flags = labels(args, 0, "backend_flags")?;
        let allowed: Vec<String> = NANOGRAV_BACKENDS.iter().map(|s| s.to_string()).collect();
        Ok(by_values(flags, Some(&allowed)))
    }
}

/// Splits by backend, restricted to a configured substring
/// allow-list. `allowed: None` recovers [ByBackend].
#[derive(Debug, Clone, Default)]
pub struct CustomBackends {
    /// Substring allow-list; None keeps every distinct backend.
    pub allowed: Option<Vec<String>>,
}

impl CustomBackends {
    /// Keeps every distinct backend value.
    pub fn all() -> Self {
        Self { allowed: None }
    }
    /// Keeps backend values containing at least one of `tokens`.
    pub fn matching<S: ToString>(tokens: &[S]) -> Self {
        Self {
            allowed: Some(tokens.iter().map(|t| t.to_string()).collect()),
        }
    }
}

impl Partition for CustomBackends {
    fn args(&self) -> &[&'static str] {
        &["backend_flags"]
    }
    fn evaluate(&self, args: &[Attribute]) -> Result<PartitionMap, Error> {
        let flags = labels(args, 0, "backend_flags")?;
        Ok(by_values(flags, self.allowed.as_deref()))
    }
}

/// [FilterSpec] describes which flag values a [CustomFlags] selection
/// retains.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FilterSpec {
    /// Filtering disabled: every distinct backend value is kept
    /// (recovers [ByBackend]).
    NoFilter,
    /// Substring allow-list against the backend flag
    /// (recovers [NanogravBackends] with the matching token list).
    AllowList(Vec<String>),
    /// Per-key filtering. Each entry addresses one flag-table column,
    /// the reserved [BACKEND_KEY] addressing the backend flag itself.
    /// A None allow-list keeps every distinct value of that column.
    PerKey(BTreeMap<String, Option<Vec<String>>>),
    /// Degenerate filter: the single catch-all partition, every
    /// observation selected (recovers [crate::NoSelection]).
    /// This mirrors the historical behavior for filter descriptions
    /// that are not a recognizable filter.
    CatchAll,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::NoFilter
    }
}

impl From<&str> for FilterSpec {
    fn from(token: &str) -> Self {
        Self::AllowList(vec![token.to_string()])
    }
}

impl From<Vec<String>> for FilterSpec {
    fn from(tokens: Vec<String>) -> Self {
        Self::AllowList(tokens)
    }
}

/// Splits by flag values according to a [FilterSpec], possibly
/// combining several flag columns into one partition mapping.
#[derive(Debug, Clone, Default)]
pub struct CustomFlags {
    /// Retention rules, see [FilterSpec].
    pub filter: FilterSpec,
}

impl CustomFlags {
    /// Builds a [CustomFlags] selection from any [FilterSpec] form.
    pub fn new<F: Into<FilterSpec>>(filter: F) -> Self {
        Self {
            filter: filter.into(),
        }
    }
}

impl Partition for CustomFlags {
    fn args(&self) -> &[&'static str] {
        &["backend_flags", "flags", "toas"]
    }
    fn evaluate(&self, args: &[Attribute]) -> Result<PartitionMap, Error> {
        match &self.filter {
            FilterSpec::NoFilter => {
                let backends = labels(args, 0, "backend_flags")?;
                Ok(by_values(backends, None))
            },
            FilterSpec::AllowList(tokens) => {
                let backends = labels(args, 0, "backend_flags")?;
                Ok(by_values(backends, Some(tokens)))
            },
            FilterSpec::PerKey(keys) => {
                let mut map = PartitionMap::new();
                for (key, allowed) in keys {
                    let column: &[String] = if key == BACKEND_KEY {
                        labels(args, 0, "backend_flags")?
                    } else {
                        table(args, 1, "flags")?
                            .get(key)
                            .ok_or_else(|| Error::MissingArgument(key.clone()))?
                    };
                    map.extend(by_values(column, allowed.as_deref()));
                }
                Ok(map)
            },
            FilterSpec::CatchAll => {
                let len = arg(args, 2, "toas")?
                    .len()
                    .ok_or_else(|| Error::AttributeKind("toas".to_string()))?;
                let mut map = PartitionMap::new();
                map.insert(String::new(), Mask::ones(len));
                Ok(map)
            },
        }
    }
}

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod attribute;
mod binding;
mod catalog;
mod mask;
mod selection;

pub use attribute::{Attribute, FlagTable, TimingData};
pub use binding::{Bound, Error as BindingError, Partition, PartitionMap};
pub use catalog::{
    ByBackend, ByFlag, ByTelescope, CustomBackends, CustomFlags, CutHalf, FilterSpec,
    NanogravBackends, NoSelection, BACKEND_KEY, NANOGRAV_BACKENDS,
};
pub use mask::{Error as MaskError, Mask};
pub use selection::Selection;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

//! Catalog of ready-made [crate::Partition] functions.
mod flags;
mod time;

pub use flags::{
    ByBackend, ByFlag, ByTelescope, CustomBackends, CustomFlags, FilterSpec, NanogravBackends,
    BACKEND_KEY, NANOGRAV_BACKENDS,
};
pub use time::{CutHalf, NoSelection};

use crate::{attribute::Attribute, binding::Error};

/// Positional argument access with the natural binding error
/// when the declared arity was not honored.
pub(crate) fn arg<'a>(
    args: &'a [Attribute],
    index: usize,
    name: &'static str,
) -> Result<&'a Attribute, Error> {
    args.get(index)
        .ok_or_else(|| Error::MissingArgument(name.to_string()))
}

pub(crate) fn series<'a>(
    args: &'a [Attribute],
    index: usize,
    name: &'static str,
) -> Result<&'a [f64], Error> {
    arg(args, index, name)?
        .as_series()
        .ok_or_else(|| Error::AttributeKind(name.to_string()))
}

pub(crate) fn labels<'a>(
    args: &'a [Attribute],
    index: usize,
    name: &'static str,
) -> Result<&'a [String], Error> {
    arg(args, index, name)?
        .as_labels()
        .ok_or_else(|| Error::AttributeKind(name.to_string()))
}

pub(crate) fn table<'a>(
    args: &'a [Attribute],
    index: usize,
    name: &'static str,
) -> Result<&'a crate::attribute::FlagTable, Error> {
    arg(args, index, name)?
        .as_table()
        .ok_or_else(|| Error::AttributeKind(name.to_string()))
}

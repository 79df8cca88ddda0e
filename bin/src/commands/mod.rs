//! CLI command implementations.

pub(crate) mod aggregate;
pub(crate) mod intervals;

//! Command implementations

pub mod checksum;
pub(crate) mod common;
pub mod migrate;
pub mod script;
pub mod split;
pub mod status;

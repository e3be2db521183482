//! Helpers shared by the per-kind apply functions.
pub mod fs;

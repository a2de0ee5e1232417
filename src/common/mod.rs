//! Common, shared types.

pub mod diagnostics;
pub mod layers;
pub mod lifecycle;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;

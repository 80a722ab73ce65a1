//! Local deterministic fallback
//!
//! Keyword classification and canned replies used when no remote tier can
//! answer. Neither piece can fail.

mod classifier;
mod simulator;

#[cfg(test)]
mod proptests;

pub use classifier::classify;
pub use simulator::{LocalSimulator, DEFAULT_SIMULATOR_DELAY};

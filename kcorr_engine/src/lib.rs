//! Scatter engine for surfaces following the K-correlation roughness model.
//!
//! The entry point is [`scatter::ScatterEvaluator`], which operates on a strongly-typed
//! [`scatter::record::ScatterRecord`]. Translating to and from whatever layout a host uses
//! is left to the caller.

pub mod core;
pub mod scatter;
pub mod shared;

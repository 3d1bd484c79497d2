//! Middleware wrapped around every portal route, probes included.

pub mod trace;

pub use trace::Trace;

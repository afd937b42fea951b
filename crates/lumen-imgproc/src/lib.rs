#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image statistics module.
pub mod core;

/// image quality metrics module.
pub mod metrics;

/// module containing parallelization utilities.
pub mod parallel;

/// discrete wavelet transforms.
pub mod wavelet;

//! Discrete wavelet transforms.
//!
//! The module implements the separable 2D Haar transform used by the
//! quality metrics:
//!
//! - [`dwt2`] performs one analysis level and returns the four sub-bands.
//! - [`idwt2`] reconstructs a level back into the signal it came from.
//! - [`wavedec2`] chains [`dwt2`] on successive approximation bands.
//!
//! Every band is an [`Image<f32, 1>`](lumen_image::Image) holding
//! ⌈M/2⌉×⌈N/2⌉ coefficients for an M×N input.

mod haar;

pub use haar::{band_energy, dwt2, idwt2, wavedec2};

use lumen_image::Image;

/// Signal extension used when a row or column has an odd number of samples.
///
/// For even lengths the Haar filter never reaches past the border, so both
/// modes produce identical coefficients.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Mirror the border sample, `... x[n-2] x[n-1] | x[n-1] x[n-2] ...`.
    #[default]
    Symmetric,
    /// Wrap around to the start of the signal, `... x[n-1] | x[0] x[1] ...`.
    Periodic,
}

/// The three detail sub-bands of a decomposition level.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailBands {
    /// Horizontal detail: low-pass along rows, high-pass along columns.
    pub ch: Image<f32, 1>,
    /// Vertical detail: high-pass along rows, low-pass along columns.
    pub cv: Image<f32, 1>,
    /// Diagonal detail: high-pass in both directions.
    pub cd: Image<f32, 1>,
}

/// The output of a single [`dwt2`] level.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveletLevel {
    /// Approximation: low-pass in both directions.
    pub ca: Image<f32, 1>,
    /// Horizontal detail.
    pub ch: Image<f32, 1>,
    /// Vertical detail.
    pub cv: Image<f32, 1>,
    /// Diagonal detail.
    pub cd: Image<f32, 1>,
}

impl WaveletLevel {
    /// Split the level into its approximation and detail bands.
    pub fn into_parts(self) -> (Image<f32, 1>, DetailBands) {
        (
            self.ca,
            DetailBands {
                ch: self.ch,
                cv: self.cv,
                cd: self.cd,
            },
        )
    }
}

/// A multi-level decomposition produced by [`wavedec2`].
#[derive(Debug, Clone, PartialEq)]
pub struct WaveletDecomposition {
    /// Approximation band of the coarsest level.
    pub approximation: Image<f32, 1>,
    /// Detail bands ordered from the finest level (`details[0]`) to the coarsest.
    pub details: Vec<DetailBands>,
}

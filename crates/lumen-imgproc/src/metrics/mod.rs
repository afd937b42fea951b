//! Image quality metrics.
//!
//! This module estimates objective, reference-free quality scores of a
//! single image from its luminance:
//!
//! - **Sharpness**: edge energy of the horizontal and vertical Haar detail bands
//! - **Noise level**: energy of the finest diagonal Haar detail band
//! - **Contrast**: standard deviation of the grayscale values
//! - **Brightness**: mean of the grayscale values
//!
//! # Examples
//!
//! ```
//! use lumen_image::{Image, ImageSize};
//! use lumen_imgproc::metrics::extract;
//!
//! let image = Image::<f32, 3>::from_size_val(
//!     ImageSize {
//!         width: 4,
//!         height: 4,
//!     },
//!     255.0,
//! )
//! .unwrap();
//!
//! let record = extract(&image).unwrap();
//! assert_eq!(record.sharpness, 0.0);
//! assert_eq!(record.brightness, 1.0);
//! ```

mod error;
mod quality;

pub use error::QualityError;
pub use quality::{
    extract, extract_batch, extract_interleaved, extract_rgb8, extract_with, noise_level,
    sharpness, MetricRecord, NonFinitePolicy, QualityOptions, BRIGHTNESS_NORM, CONTRAST_NORM,
    DECOMPOSITION_LEVELS, NOISE_SCALE, SHARPNESS_SCALE,
};

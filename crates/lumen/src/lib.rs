#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! ```
//! use lumen::image::{Image, ImageSize};
//! use lumen::imgproc::metrics;
//!
//! let image = Image::<u8, 3>::from_size_val(
//!     ImageSize {
//!         width: 16,
//!         height: 16,
//!     },
//!     128,
//! )
//! .unwrap();
//!
//! let record = metrics::extract_rgb8(&image).unwrap();
//! assert_eq!(record.noise_level, 0.0);
//! ```

#[doc(inline)]
pub use lumen_image as image;

#[doc(inline)]
pub use lumen_imgproc as imgproc;

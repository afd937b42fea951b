use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use lumen_image::{Image, ImageSize};

use crate::color::gray_mean_from_rgb;
use crate::core::std_mean;
use crate::wavelet::{band_energy, wavedec2, BoundaryMode, WaveletDecomposition};

use super::QualityError;

/// Calibration factor applied to the RMS edge energy.
pub const SHARPNESS_SCALE: f64 = 20.0;

/// Calibration factor applied to the RMS diagonal energy.
pub const NOISE_SCALE: f64 = 30.0;

/// Normalization of the grayscale standard deviation.
pub const CONTRAST_NORM: f64 = 128.0;

/// Normalization of the grayscale mean.
pub const BRIGHTNESS_NORM: f64 = 255.0;

/// Number of Haar levels the metrics are computed from.
pub const DECOMPOSITION_LEVELS: usize = 2;

/// What to do with NaN or infinite pixel values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NonFinitePolicy {
    /// Fail with [`QualityError::NonFiniteInput`].
    #[default]
    Reject,
    /// Skip the check; non-finite values flow into the record as NaN or infinity.
    Propagate,
}

/// Options for [`extract_with`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QualityOptions {
    /// Handling of non-finite pixel values.
    pub non_finite: NonFinitePolicy,
    /// Clamp contrast and brightness into `[0, 1]`.
    ///
    /// When unset, contrast exceeds 1 once the grayscale standard deviation is
    /// above 128, and brightness exceeds 1 for values above 255.
    pub clamp_statistics: bool,
    /// Boundary extension of the wavelet transform.
    pub boundary: BoundaryMode,
}

/// The quality scores of an image.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Edge strength, in `[0, 1]`.
    pub sharpness: f32,
    /// High frequency diagonal energy, in `[0, 1]`.
    pub noise_level: f32,
    /// Grayscale standard deviation over 128.
    pub contrast: f32,
    /// Grayscale mean over 255.
    pub brightness: f32,
}

/// Saturate a score at 1, keeping NaN as NaN.
#[inline]
fn saturate(x: f64) -> f64 {
    if x > 1.0 {
        1.0
    } else {
        x
    }
}

fn check_shape(size: ImageSize, channels: usize) -> Result<(), QualityError> {
    let ImageSize { width, height } = size;
    if channels != 3 || width == 0 || height == 0 || width % 4 != 0 || height % 4 != 0 {
        log::debug!("rejecting {}x{}x{} input", width, height, channels);
        return Err(QualityError::InvalidInputShape {
            width,
            height,
            channels,
        });
    }
    Ok(())
}

fn check_finite(data: &[f32]) -> Result<(), QualityError> {
    match data.iter().position(|v| !v.is_finite()) {
        Some(index) => {
            log::debug!("rejecting non-finite value at {}", index);
            Err(QualityError::NonFiniteInput { index })
        }
        None => Ok(()),
    }
}

/// Factor the approximation band can grow by over the decomposition, with one
/// level of margin. Each Haar level at most doubles it.
const HEADROOM: f32 = (1u32 << (DECOMPOSITION_LEVELS + 1)) as f32;

/// Grayscale magnitude above which the decomposition could leave the `f32` range.
const MAX_GRAY_MAGNITUDE: f32 = f32::MAX / HEADROOM;

/// Power of two that brings `gray` under [`MAX_GRAY_MAGNITUDE`], or 1.
fn headroom_scale(gray: &Image<f32, 1>) -> f32 {
    let peak = gray.as_slice().iter().fold(0f32, |peak, v| peak.max(v.abs()));
    if peak > MAX_GRAY_MAGNITUDE {
        1.0 / HEADROOM
    } else {
        1.0
    }
}

fn edge_rms(dec: &WaveletDecomposition) -> f64 {
    let (energy, count) = dec
        .details
        .iter()
        .flat_map(|bands| [&bands.ch, &bands.cv])
        .fold((0f64, 0usize), |(energy, count), band| {
            (energy + band_energy(band), count + band.numel())
        });

    if count == 0 {
        return 0.0;
    }

    (energy / count as f64).sqrt()
}

fn diagonal_rms(dec: &WaveletDecomposition) -> f64 {
    let Some(finest) = dec.details.first() else {
        return 0.0;
    };

    let count = finest.cd.numel();
    if count == 0 {
        return 0.0;
    }

    (band_energy(&finest.cd) / count as f64).sqrt()
}

/// Compute the sharpness score of a decomposition.
///
/// The score is the RMS of the horizontal and vertical detail coefficients of
/// every level, scaled by [`SHARPNESS_SCALE`] and saturated at 1.
pub fn sharpness(dec: &WaveletDecomposition) -> f64 {
    saturate(edge_rms(dec) * SHARPNESS_SCALE)
}

/// Compute the noise score of a decomposition.
///
/// The score is the RMS of the finest diagonal detail coefficients, scaled by
/// [`NOISE_SCALE`] and saturated at 1.
pub fn noise_level(dec: &WaveletDecomposition) -> f64 {
    saturate(diagonal_rms(dec) * NOISE_SCALE)
}

/// Extract the quality metrics of an RGB image with the default options.
///
/// See [`extract_with`].
pub fn extract(image: &Image<f32, 3>) -> Result<MetricRecord, QualityError> {
    extract_with(image, &QualityOptions::default())
}

/// Extract the quality metrics of an RGB image.
///
/// The image is averaged to grayscale and decomposed with a
/// [`DECOMPOSITION_LEVELS`] level Haar transform. Sharpness and noise come
/// from the detail bands, contrast and brightness from the grayscale values.
///
/// # Arguments
///
/// * `image` - The input image with values conventionally in `[0, 255]`.
/// * `options` - The extraction options.
///
/// # Errors
///
/// * [`QualityError::InvalidInputShape`] if the width or height is zero or not
///   divisible by 4.
/// * [`QualityError::NonFiniteInput`] if a value is NaN or infinite and the
///   policy is [`NonFinitePolicy::Reject`].
///
/// # Example
///
/// ```
/// use lumen_image::{Image, ImageSize};
/// use lumen_imgproc::metrics::{extract_with, QualityOptions};
///
/// let image = Image::<f32, 3>::from_size_val(
///     ImageSize {
///         width: 8,
///         height: 4,
///     },
///     0.0,
/// )
/// .unwrap();
///
/// let record = extract_with(&image, &QualityOptions::default()).unwrap();
/// assert_eq!(record.noise_level, 0.0);
/// assert_eq!(record.contrast, 0.0);
/// ```
pub fn extract_with(
    image: &Image<f32, 3>,
    options: &QualityOptions,
) -> Result<MetricRecord, QualityError> {
    check_shape(image.size(), image.num_channels())?;

    if options.non_finite == NonFinitePolicy::Reject {
        check_finite(image.as_slice())?;
    }

    log::trace!("extracting metrics of {}", image.size());

    let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0)?;
    gray_mean_from_rgb(image, &mut gray)?;

    // all scores are linear in the gray values
    let scale = headroom_scale(&gray);
    if scale != 1.0 {
        log::debug!("scaling {} input by {} to fit f32", image.size(), scale);
        gray.as_slice_mut().iter_mut().for_each(|v| *v *= scale);
    }
    let unscale = 1.0 / scale as f64;

    let dec = wavedec2(&gray, DECOMPOSITION_LEVELS, options.boundary)?;
    let ([std], [mean]) = std_mean(&gray)?;

    let mut contrast = std * unscale / CONTRAST_NORM;
    let mut brightness = mean * unscale / BRIGHTNESS_NORM;
    if options.clamp_statistics {
        contrast = contrast.clamp(0.0, 1.0);
        brightness = brightness.clamp(0.0, 1.0);
    }

    let record = MetricRecord {
        sharpness: saturate(edge_rms(&dec) * unscale * SHARPNESS_SCALE) as f32,
        noise_level: saturate(diagonal_rms(&dec) * unscale * NOISE_SCALE) as f32,
        contrast: contrast as f32,
        brightness: brightness as f32,
    };

    log::debug!("{} -> {:?}", image.size(), record);

    Ok(record)
}

/// Extract the quality metrics of an 8-bit RGB image.
///
/// The values are cast to `f32` without rescaling, so they stay in `[0, 255]`.
pub fn extract_rgb8(image: &Image<u8, 3>) -> Result<MetricRecord, QualityError> {
    let image = image.cast::<f32>()?;
    extract(&image)
}

/// Extract the quality metrics of a raw interleaved buffer.
///
/// # Arguments
///
/// * `size` - The size of the image in pixels.
/// * `channels` - The number of interleaved channels, must be 3.
/// * `data` - The pixel values in row-major (H, W, C) order.
///
/// # Errors
///
/// Returns [`QualityError::InvalidInputShape`] for a channel count other than
/// 3, and [`QualityError::Image`] if `data` does not match `size`.
pub fn extract_interleaved(
    size: ImageSize,
    channels: usize,
    data: &[f32],
) -> Result<MetricRecord, QualityError> {
    check_shape(size, channels)?;
    let image = Image::<f32, 3>::new(size, data.to_vec())?;
    extract(&image)
}

/// Extract the quality metrics of several images in parallel.
///
/// Each image is an independent task on the rayon pool. The results are
/// returned in the order of `images`.
pub fn extract_batch(
    images: &[Image<f32, 3>],
    options: &QualityOptions,
) -> Vec<Result<MetricRecord, QualityError>> {
    images
        .par_iter()
        .map(|image| extract_with(image, options))
        .collect()
}

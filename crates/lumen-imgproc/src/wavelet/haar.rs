use std::f32::consts::FRAC_1_SQRT_2;

use rayon::prelude::*;

use lumen_image::{Image, ImageError, ImageSize};

use super::{BoundaryMode, WaveletDecomposition, WaveletLevel};

#[inline]
fn analysis(a: f32, b: f32) -> (f32, f32) {
    let (a, b) = (a * FRAC_1_SQRT_2, b * FRAC_1_SQRT_2);
    (a + b, a - b)
}

#[inline]
fn synthesis(lo: f32, hi: f32) -> (f32, f32) {
    let (lo, hi) = (lo * FRAC_1_SQRT_2, hi * FRAC_1_SQRT_2);
    (lo + hi, lo - hi)
}

/// Index of the sample paired with `i` (always even) in a signal of length `len`.
#[inline]
fn partner(i: usize, len: usize, mode: BoundaryMode) -> usize {
    if i + 1 < len {
        return i + 1;
    }
    match mode {
        BoundaryMode::Symmetric => i,
        BoundaryMode::Periodic => 0,
    }
}

/// Filter and downsample every row of a `rows x cols` buffer.
fn analyze_rows(src: &[f32], cols: usize, mode: BoundaryMode) -> (Vec<f32>, Vec<f32>) {
    let half = cols.div_ceil(2);
    let rows = src.len() / cols;
    let mut lo = vec![0.0; rows * half];
    let mut hi = vec![0.0; rows * half];

    src.par_chunks_exact(cols)
        .zip(lo.par_chunks_exact_mut(half))
        .zip(hi.par_chunks_exact_mut(half))
        .for_each(|((row, lo_row), hi_row)| {
            lo_row
                .iter_mut()
                .zip(hi_row.iter_mut())
                .enumerate()
                .for_each(|(k, (l, h))| {
                    let i = 2 * k;
                    (*l, *h) = analysis(row[i], row[partner(i, cols, mode)]);
                });
        });

    (lo, hi)
}

/// Filter and downsample every column of a `rows x cols` buffer.
fn analyze_cols(src: &[f32], cols: usize, mode: BoundaryMode) -> (Vec<f32>, Vec<f32>) {
    let rows = src.len() / cols;
    let half = rows.div_ceil(2);
    let mut lo = vec![0.0; half * cols];
    let mut hi = vec![0.0; half * cols];

    lo.par_chunks_exact_mut(cols)
        .zip(hi.par_chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(k, (lo_row, hi_row))| {
            let i = 2 * k;
            let p = partner(i, rows, mode);
            let top = &src[i * cols..(i + 1) * cols];
            let bottom = &src[p * cols..(p + 1) * cols];
            lo_row
                .iter_mut()
                .zip(hi_row.iter_mut())
                .zip(top.iter().zip(bottom.iter()))
                .for_each(|((l, h), (&a, &b))| {
                    (*l, *h) = analysis(a, b);
                });
        });

    (lo, hi)
}

/// Interleave two column bands of width `cols` back into twice as many rows.
fn synthesize_cols(lo: &[f32], hi: &[f32], cols: usize) -> Vec<f32> {
    let mut out = vec![0.0; 2 * lo.len()];

    out.par_chunks_exact_mut(2 * cols)
        .zip(lo.par_chunks_exact(cols))
        .zip(hi.par_chunks_exact(cols))
        .for_each(|((pair, lo_row), hi_row)| {
            let (top, bottom) = pair.split_at_mut(cols);
            top.iter_mut()
                .zip(bottom.iter_mut())
                .zip(lo_row.iter().zip(hi_row.iter()))
                .for_each(|((a, b), (&l, &h))| {
                    (*a, *b) = synthesis(l, h);
                });
        });

    out
}

/// Interleave two row bands of width `half` back into rows of width `2 * half`.
fn synthesize_rows(lo: &[f32], hi: &[f32], half: usize) -> Vec<f32> {
    let mut out = vec![0.0; 2 * lo.len()];

    out.par_chunks_exact_mut(2 * half)
        .zip(lo.par_chunks_exact(half))
        .zip(hi.par_chunks_exact(half))
        .for_each(|((row, lo_row), hi_row)| {
            row.chunks_exact_mut(2)
                .zip(lo_row.iter().zip(hi_row.iter()))
                .for_each(|(pair, (&l, &h))| {
                    (pair[0], pair[1]) = synthesis(l, h);
                });
        });

    out
}

/// Single level 2D Haar wavelet decomposition.
///
/// The transform is separable: every row is split into a low-pass
/// `(a + b) / √2` and a high-pass `(a - b) / √2` half, then the same filter
/// pair is applied along the columns of both halves.
///
/// # Arguments
///
/// * `src` - The input single channel image with shape (M, N).
/// * `mode` - The extension applied to odd trailing samples.
///
/// # Returns
///
/// The four sub-bands, each with shape (⌈M/2⌉, ⌈N/2⌉).
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the image is empty.
///
/// # Example
///
/// ```
/// use lumen_image::{Image, ImageSize};
/// use lumen_imgproc::wavelet::{dwt2, BoundaryMode};
///
/// let image = Image::<f32, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     vec![1.0, 2.0, 3.0, 4.0],
/// )
/// .unwrap();
///
/// let level = dwt2(&image, BoundaryMode::Symmetric).unwrap();
/// assert!((level.ca.as_slice()[0] - 5.0).abs() < 1e-5);
/// assert!((level.ch.as_slice()[0] + 2.0).abs() < 1e-5);
/// assert!((level.cv.as_slice()[0] + 1.0).abs() < 1e-5);
/// assert!(level.cd.as_slice()[0].abs() < 1e-5);
/// ```
pub fn dwt2(src: &Image<f32, 1>, mode: BoundaryMode) -> Result<WaveletLevel, ImageError> {
    let (rows, cols) = (src.rows(), src.cols());
    if rows == 0 || cols == 0 {
        return Err(ImageError::InvalidImageSize(cols, rows, 1, 1));
    }

    let (row_lo, row_hi) = analyze_rows(src.as_slice(), cols, mode);

    let half_cols = cols.div_ceil(2);
    let (ca, ch) = analyze_cols(&row_lo, half_cols, mode);
    let (cv, cd) = analyze_cols(&row_hi, half_cols, mode);

    let band_size = ImageSize {
        width: half_cols,
        height: rows.div_ceil(2),
    };

    Ok(WaveletLevel {
        ca: Image::new(band_size, ca)?,
        ch: Image::new(band_size, ch)?,
        cv: Image::new(band_size, cv)?,
        cd: Image::new(band_size, cd)?,
    })
}

/// Single level 2D Haar wavelet reconstruction.
///
/// Inverts [`dwt2`] for signals with even width and height.
///
/// # Arguments
///
/// * `level` - The four sub-bands of the level.
/// * `size` - The size of the reconstructed image, twice the band size.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the bands differ in size or if
/// `size` is not twice the band size.
pub fn idwt2(level: &WaveletLevel, size: ImageSize) -> Result<Image<f32, 1>, ImageError> {
    let band = level.ca.size();

    for detail in [&level.ch, &level.cv, &level.cd] {
        if detail.size() != band {
            return Err(ImageError::InvalidImageSize(
                band.width,
                band.height,
                detail.width(),
                detail.height(),
            ));
        }
    }

    if band.area() == 0 || size.width != 2 * band.width || size.height != 2 * band.height {
        return Err(ImageError::InvalidImageSize(
            size.width,
            size.height,
            2 * band.width,
            2 * band.height,
        ));
    }

    let row_lo = synthesize_cols(level.ca.as_slice(), level.ch.as_slice(), band.width);
    let row_hi = synthesize_cols(level.cv.as_slice(), level.cd.as_slice(), band.width);

    Image::new(size, synthesize_rows(&row_lo, &row_hi, band.width))
}

/// Multi-level 2D Haar wavelet decomposition.
///
/// The first level decomposes `src`; each further level decomposes the
/// approximation band of the previous one.
///
/// # Arguments
///
/// * `src` - The input single channel image.
/// * `levels` - The number of decomposition levels, at least 1.
/// * `mode` - The extension applied to odd trailing samples.
///
/// # Errors
///
/// Returns [`ImageError::InvalidLevel`] if `levels` is zero and propagates the
/// errors of [`dwt2`].
///
/// # Example
///
/// ```
/// use lumen_image::{Image, ImageSize};
/// use lumen_imgproc::wavelet::{wavedec2, BoundaryMode};
///
/// let image = Image::<f32, 1>::from_size_val(
///     ImageSize {
///         width: 8,
///         height: 8,
///     },
///     1.0,
/// )
/// .unwrap();
///
/// let dec = wavedec2(&image, 2, BoundaryMode::default()).unwrap();
/// assert_eq!(dec.details.len(), 2);
/// assert_eq!(dec.details[0].cd.size().width, 4);
/// assert_eq!(dec.approximation.size().width, 2);
/// ```
pub fn wavedec2(
    src: &Image<f32, 1>,
    levels: usize,
    mode: BoundaryMode,
) -> Result<WaveletDecomposition, ImageError> {
    if levels == 0 {
        return Err(ImageError::InvalidLevel(levels));
    }

    let mut details = Vec::with_capacity(levels);

    let (mut approximation, bands) = dwt2(src, mode)?.into_parts();
    log::trace!("haar level 1: {} -> {}", src.size(), approximation.size());
    details.push(bands);

    for level in 2..=levels {
        let (ca, bands) = dwt2(&approximation, mode)?.into_parts();
        log::trace!(
            "haar level {}: {} -> {}",
            level,
            approximation.size(),
            ca.size()
        );
        approximation = ca;
        details.push(bands);
    }

    Ok(WaveletDecomposition {
        approximation,
        details,
    })
}

/// Sum of squared coefficients of a band.
///
/// The sum is accumulated serially in `f64`, so the result does not depend on
/// thread scheduling.
pub fn band_energy(band: &Image<f32, 1>) -> f64 {
    band.as_slice()
        .iter()
        .map(|&c| (c as f64) * (c as f64))
        .sum()
}

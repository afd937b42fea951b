use lumen_image::{Image, ImageError};

/// Compute the per-channel standard deviation and mean of an image.
///
/// Both statistics are accumulated in one serial pass with Welford's update,
/// in `f64`. The standard deviation is the population one (divides by `n`),
/// and a constant channel yields exactly `0.0`.
///
/// # Arguments
///
/// * `image` - The input image to compute the mean and standard deviation.
///
/// # Returns
///
/// A tuple containing the standard deviation and the mean of each channel,
/// in this order.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the image is empty.
///
/// # Example
///
/// ```
/// use lumen_image::{Image, ImageSize};
/// use lumen_imgproc::core::std_mean;
///
/// let image = Image::<f32, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     vec![2.0, 4.0, 4.0, 6.0],
/// )
/// .unwrap();
///
/// let (std, mean) = std_mean(&image).unwrap();
///
/// assert!((mean[0] - 4.0).abs() < 1e-12);
/// assert!((std[0] - 2f64.sqrt()).abs() < 1e-12);
/// ```
pub fn std_mean<const C: usize>(
    image: &Image<f32, C>,
) -> Result<([f64; C], [f64; C]), ImageError> {
    if image.numel() == 0 {
        return Err(ImageError::InvalidImageSize(image.width(), image.height(), 1, 1));
    }

    let mut mean = [0f64; C];
    let mut m2 = [0f64; C];

    for (k, pixel) in image.as_slice().chunks_exact(C).enumerate() {
        let n = (k + 1) as f64;
        for ((&val, mean), m2) in pixel.iter().zip(mean.iter_mut()).zip(m2.iter_mut()) {
            let val = val as f64;
            let delta = val - *mean;
            *mean += delta / n;
            *m2 += delta * (val - *mean);
        }
    }

    let n = image.size().area() as f64;
    let std = m2.map(|m| (m / n).sqrt());

    Ok((std, mean))
}

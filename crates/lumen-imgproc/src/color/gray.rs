use crate::parallel;
use lumen_image::{Image, ImageError};

/// Convert an RGB image to grayscale by averaging the channels:
///
/// Y = (R + G + B) / 3
///
/// Unlike a perceptual luma, every channel carries the same weight. Each
/// channel is divided before the sum, so any finite input gives a finite mean.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use lumen_image::{Image, ImageSize};
/// use lumen_imgproc::color::gray_mean_from_rgb;
///
/// let image = Image::<f32, 3>::new(
///     ImageSize {
///         width: 1,
///         height: 2,
///     },
///     vec![0.0, 3.0, 6.0, 255.0, 255.0, 255.0],
/// )
/// .unwrap();
///
/// let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// gray_mean_from_rgb(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[3.0, 255.0]);
/// ```
pub fn gray_mean_from_rgb<T>(src: &Image<T, 3>, dst: &mut Image<T, 1>) -> Result<(), ImageError>
where
    T: Send + Sync + num_traits::Float,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let three = T::from(3.0).ok_or(ImageError::CastError)?;

    // parallelize the grayscale conversion by rows
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = src_pixel[0] / three + src_pixel[1] / three + src_pixel[2] / three;
    });

    Ok(())
}

use lumen_image::ImageError;

/// Errors raised while extracting quality metrics.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum QualityError {
    /// The image cannot go through a two level decomposition.
    #[error(
        "Invalid input shape {width}x{height}x{channels}: expected 3 channels and sides divisible by 4"
    )]
    InvalidInputShape {
        /// Width of the rejected image.
        width: usize,
        /// Height of the rejected image.
        height: usize,
        /// Number of channels of the rejected image.
        channels: usize,
    },

    /// The image holds a NaN or infinite value.
    #[error("Non-finite value at index {index}")]
    NonFiniteInput {
        /// Flat index of the first offending value.
        index: usize,
    },

    /// Error from the underlying image operations.
    #[error(transparent)]
    Image(#[from] ImageError),
}

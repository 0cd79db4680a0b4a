use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while loading an image or naming a color.
///
/// An image without any counted pixels is not an error; it produces an empty [`crate::Palette`].
#[derive(Debug, Error)]
pub enum Error {
    /// The image source could not be read into memory.
    #[error("failed to read image: {0}")]
    Read(#[from] std::io::Error),
    /// The image bytes could not be decoded into pixel data.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    /// A raw RGBA buffer didn't match its stated dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected} for the given dimensions")]
    BufferSize { expected: usize, actual: usize },
    /// A color string wasn't a valid hex color.
    #[error("invalid hex color: {0}")]
    InvalidHex(#[from] palette::rgb::FromHexError),
}

impl Error {
    /// Whether the error came from the byte source rather than from the image data.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::Read(_))
    }

    /// Whether the error means the source couldn't be turned into pixel data.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::BufferSize { .. })
    }
}

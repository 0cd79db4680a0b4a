pub const DEFAULT_ALPHA_THRESHOLD: u8 = 128;

/// A trait used to implement filters for the pixel counting process.
///
/// Before a pixel is placed into a color bucket, every filter is asked whether the pixel should be counted at all.
/// Rejected pixels are left out of the extraction entirely; they don't count towards any bucket and don't affect
/// the percentages. This trait allows the library consumer to implement custom filters.
///
/// See [`crate::PaletteBuilder::add_filter`] on how to add filters to the extraction process.
pub trait Filter {
    /// Return whether a given pixel should be counted or not. The pixel is given as its unquantized sRGB color and
    /// its alpha channel.
    fn is_allowed(&self, rgb: (u8, u8, u8), alpha: u8) -> bool;
}

/// The default filter included in every [`crate::PaletteBuilder`] by default.
///
/// This filter disallows pixels that are more transparent than opaque, i.e. pixels whose alpha is below the
/// threshold (128 by default).
#[derive(Debug, Clone, Copy)]
pub struct OpaqueFilter {
    threshold: u8,
}

impl OpaqueFilter {
    pub fn with_threshold(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(self) -> u8 {
        self.threshold
    }
}

impl Default for OpaqueFilter {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_ALPHA_THRESHOLD)
    }
}

impl Filter for OpaqueFilter {
    fn is_allowed(&self, _: (u8, u8, u8), alpha: u8) -> bool {
        alpha >= self.threshold
    }
}

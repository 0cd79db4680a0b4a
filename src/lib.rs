// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to extract the dominant colors from an image and label them with human-readable names.
//!
//! The image is scaled down so its longest side is at most 200 pixels, every sufficiently opaque pixel is rounded
//! into a coarse color bucket, and the most populous buckets become the palette. Each palette color is then named
//! after the closest entry in a small table of common colors (see [`REFERENCE_COLORS`]).
//!
//! ```no_run
//! let palette = palettescope::Palette::from_path("photo.jpg")?.generate();
//!
//! for color in palette.colors() {
//!     println!("{} {} {}%", color.name(), color.hex(), color.percentage());
//! }
//! # Ok::<(), palettescope::Error>(())
//! ```

mod bucket_quantizer;
mod color;
mod error;
mod filter;
mod names;
mod swatch;

pub const DEFAULT_MAXIMUM_COLOR_COUNT: usize = 12;
pub const DEFAULT_MAX_DIMENSION: u32 = 200;
pub const DEFAULT_BUCKET_SIZE: u8 = 15;

pub use crate::{
    bucket_quantizer::quantize_channel,
    color::{to_hex, ExtractedColor},
    error::{Error, Result},
    filter::{Filter, OpaqueFilter, DEFAULT_ALPHA_THRESHOLD},
    names::{distance, name_for, nearest_name, nearest_reference, ReferenceColor, REFERENCE_COLORS},
    swatch::Swatch,
};
pub use image;
pub use palette;

use bucket_quantizer::BucketQuantizer;
use image::{ImageBuffer, Rgba, RgbaImage};
use log::{debug, warn};
use palette::IntoColor;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Palette {
    colors: Vec<ExtractedColor>,
    stats: ExtractionStats,
}

/// Counts gathered while extracting a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtractionStats {
    /// Width of the image that was scanned, after scaling down.
    pub width: u32,
    /// Height of the image that was scanned, after scaling down.
    pub height: u32,
    pub total_pixels: u64,
    /// Pixels every filter allowed, i.e. the ones placed into a bucket.
    pub counted_pixels: u64,
    pub filtered_pixels: u64,
    pub unique_buckets: usize,
}

pub struct PaletteBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>,
    maximum_color_count: usize,
    max_dimension: u32,
    bucket_size: u8,
    filters: Vec<Box<dyn Filter>>,
}

impl Palette {
    pub fn from_image<P>(image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>) -> PaletteBuilder<P>
    where
        P: image::Pixel<Subpixel = u8> + 'static,
    {
        PaletteBuilder::from_image(image)
    }

    /// Start building a palette from a raw buffer of RGBA bytes, four per pixel, row by row.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<PaletteBuilder<Rgba<u8>>> {
        PaletteBuilder::from_rgba(width, height, pixels)
    }

    /// Start building a palette from an encoded image in any format the `image` crate can decode.
    pub fn from_bytes(bytes: &[u8]) -> Result<PaletteBuilder<Rgba<u8>>> {
        PaletteBuilder::from_bytes(bytes)
    }

    /// Start building a palette from an image file.
    pub fn from_path<T: AsRef<Path>>(path: T) -> Result<PaletteBuilder<Rgba<u8>>> {
        PaletteBuilder::from_path(path)
    }

    /// The extracted colors, most prominent first.
    pub fn colors(&self) -> &[ExtractedColor] {
        &self.colors
    }

    pub fn into_colors(self) -> Vec<ExtractedColor> {
        self.colors
    }

    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }

    /// Whether no colors were found, e.g. because the image is fully transparent.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn dominant_color(&self) -> Option<&ExtractedColor> {
        self.colors.first()
    }

    /// Render the palette as tab-separated text with a header line: name, hex code and percentage per color.
    pub fn to_tab_separated(&self) -> String {
        let mut lines = vec![String::from("Color Name\tHex Code\tPercentage")];
        lines.extend(
            self.colors
                .iter()
                .map(|color| format!("{}\t{}\t{}%", color.name(), color.hex(), color.percentage())),
        );

        lines.join("\n")
    }

    fn generate(swatches: Vec<Swatch>, stats: ExtractionStats) -> Palette {
        // percentages are relative to the retained swatches only, not to every counted pixel
        let retained: u64 = swatches.iter().map(|swatch| swatch.population() as u64).sum();

        let colors = swatches
            .into_iter()
            .map(|swatch| ExtractedColor::new(swatch, percentage(swatch.population(), retained)))
            .collect();

        Self { colors, stats }
    }
}

impl PaletteBuilder<Rgba<u8>> {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let actual = pixels.len();
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|area| area.checked_mul(4))
            .ok_or(Error::BufferSize {
                expected: usize::MAX,
                actual,
            })?;

        if actual != expected {
            return Err(Error::BufferSize { expected, actual });
        }

        let image = RgbaImage::from_raw(width, height, pixels).ok_or(Error::BufferSize { expected, actual })?;
        Ok(Self::from_image(image))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_image(image.to_rgba8()))
    }

    pub fn from_path<T: AsRef<Path>>(path: T) -> Result<Self> {
        // read and decode separately so a missing file isn't reported as a broken image
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

impl<P> PaletteBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    pub fn from_image(image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>) -> Self {
        Self {
            image,
            maximum_color_count: DEFAULT_MAXIMUM_COLOR_COUNT,
            max_dimension: DEFAULT_MAX_DIMENSION,
            bucket_size: DEFAULT_BUCKET_SIZE,
            filters: vec![Box::new(OpaqueFilter::default())],
        }
    }

    pub fn maximum_color_count(self, maximum_color_count: usize) -> Self {
        Self {
            maximum_color_count,
            ..self
        }
    }

    /// Scale the image down so its longest side is at most this many pixels before counting colors. Zero disables
    /// scaling.
    pub fn max_dimension(self, max_dimension: u32) -> Self {
        Self { max_dimension, ..self }
    }

    /// Round every channel to the nearest multiple of this value. Zero is treated as one.
    pub fn bucket_size(self, bucket_size: u8) -> Self {
        Self {
            bucket_size: bucket_size.max(1),
            ..self
        }
    }

    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn clear_filters(self) -> Self {
        Self {
            filters: Vec::new(),
            ..self
        }
    }

    pub fn generate(mut self) -> Palette {
        self.scale_image_down();

        let (width, height) = self.image.dimensions();
        let pixels: Vec<P> = self.image.pixels().copied().collect();
        let total_pixels = pixels.len() as u64;

        debug!("Scanning {}x{} image, {} pixels", width, height, total_pixels);

        let quantizer = BucketQuantizer::new(pixels, self.bucket_size, self.maximum_color_count, self.filters);
        let quantized = quantizer.get_quantized_colors();

        debug!(
            "Pixel analysis: {} counted, {} filtered",
            quantized.counted_pixels, quantized.filtered_pixels
        );
        debug!("Unique colors found: {}", quantized.unique_buckets);

        if quantized.swatches.is_empty() {
            warn!("No countable pixels found in image");
        }

        let stats = ExtractionStats {
            width,
            height,
            total_pixels,
            counted_pixels: quantized.counted_pixels,
            filtered_pixels: quantized.filtered_pixels,
            unique_buckets: quantized.unique_buckets,
        };

        Palette::generate(quantized.swatches, stats)
    }

    fn scale_image_down(&mut self) -> bool {
        let (width, height) = self.image.dimensions();
        let longest = width.max(height);

        if self.max_dimension == 0 || longest <= self.max_dimension {
            return false;
        }

        // the longest side lands exactly on the maximum, the other keeps the aspect ratio
        let scale = |side: u32| ((side as f64 * self.max_dimension as f64 / longest as f64).round() as u32).max(1);
        let (scaled_width, scaled_height) = (scale(width), scale(height));

        self.image = image::imageops::resize(
            &self.image,
            scaled_width,
            scaled_height,
            image::imageops::FilterType::Nearest,
        );

        true
    }
}

/// Extract up to 12 dominant colors from a raw RGBA buffer using the default settings.
///
/// An empty result means the image had no opaque pixels.
pub fn extract_colors(pixels: &[u8], width: u32, height: u32) -> Result<Vec<ExtractedColor>> {
    Ok(Palette::from_rgba(width, height, pixels.to_vec())?.generate().into_colors())
}

fn percentage(population: u32, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }

    (population as f64 / total as f64 * 100.0).round() as u8
}

fn rgb_to_hsl(rgb: (u8, u8, u8)) -> (f32, f32, f32) {
    let raw = palette::Srgb::from_components(rgb);
    let raw_float: palette::Srgb<f32> = raw.into_format();
    let hsl: palette::Hsl = raw_float.into_color();
    let (h, s, l) = hsl.into_components();

    (h.into_positive_degrees(), s, l)
}

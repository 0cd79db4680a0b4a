use crate::{filter::Filter, swatch::Swatch};
use std::collections::HashMap;

pub struct BucketQuantizer<P>
where
    P: image::Pixel<Subpixel = u8>,
{
    pixels: Vec<P>,
    bucket_size: u8,
    max_colors: usize,
    filters: Vec<Box<dyn Filter>>,
}

/// The outcome of one quantization pass.
#[derive(Debug)]
pub struct Quantized {
    /// The retained buckets, most populous first.
    pub swatches: Vec<Swatch>,
    pub counted_pixels: u64,
    pub filtered_pixels: u64,
    pub unique_buckets: usize,
}

impl<P> BucketQuantizer<P>
where
    P: image::Pixel<Subpixel = u8>,
{
    pub fn new(pixels: Vec<P>, bucket_size: u8, max_colors: usize, filters: Vec<Box<dyn Filter>>) -> Self {
        Self {
            pixels,
            bucket_size: bucket_size.max(1),
            max_colors,
            filters,
        }
    }

    pub fn get_quantized_colors(self) -> Quantized {
        // begin by generating a histogram of quantized pixel values. the buckets are kept in the order they're first
        // seen in, the map only points into them
        let mut index: HashMap<u32, usize> = HashMap::new();
        let mut buckets: Vec<((u8, u8, u8), u32)> = Vec::new();
        let mut filtered_pixels = 0;

        for pixel in self.pixels.iter() {
            let (rgb, alpha) = pixel_to_rgba(pixel);

            if self.should_ignore_pixel(rgb, alpha) {
                filtered_pixels += 1;
                continue;
            }

            let key = self.quantize(rgb);
            match index.get(&pack(key)) {
                Some(&i) => buckets[i].1 += 1,
                None => {
                    index.insert(pack(key), buckets.len());
                    buckets.push((key, 1));
                }
            }
        }

        let counted_pixels = self.pixels.len() as u64 - filtered_pixels;
        let unique_buckets = buckets.len();

        Quantized {
            swatches: self.rank(buckets),
            counted_pixels,
            filtered_pixels,
            unique_buckets,
        }
    }

    fn rank(&self, mut buckets: Vec<((u8, u8, u8), u32)>) -> Vec<Swatch> {
        // the sort is stable, so buckets with an equal count stay in the order they were first seen in
        buckets.sort_by(|(_, lhs), (_, rhs)| rhs.cmp(lhs));

        if self.max_colors == 0 {
            // nothing would be retained even though pixels may have been counted; fall back to the single most
            // populous bucket, which the sort put first
            buckets.truncate(1);
        } else {
            buckets.truncate(self.max_colors);
        }

        buckets
            .into_iter()
            .map(|(rgb, count)| Swatch::new(rgb, count))
            .collect()
    }

    fn quantize(&self, (r, g, b): (u8, u8, u8)) -> (u8, u8, u8) {
        (
            quantize_channel(r, self.bucket_size),
            quantize_channel(g, self.bucket_size),
            quantize_channel(b, self.bucket_size),
        )
    }

    fn should_ignore_pixel(&self, rgb: (u8, u8, u8), alpha: u8) -> bool {
        self.filters.iter().any(|filter| !filter.is_allowed(rgb, alpha))
    }
}

/// Round a channel to the nearest multiple of the bucket size, halves rounding up. Values that would land above 255
/// are clamped to it.
pub fn quantize_channel(value: u8, bucket_size: u8) -> u8 {
    let step = bucket_size.max(1) as u32;
    let rounded = (value as u32 * 2 + step) / (step * 2) * step;

    rounded.min(u8::MAX as u32) as u8
}

fn pack((r, g, b): (u8, u8, u8)) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

fn pixel_to_rgba<P>(pixel: &P) -> ((u8, u8, u8), u8)
where
    P: image::Pixel<Subpixel = u8>,
{
    let rgba = pixel.to_rgba();
    ((rgba.0[0], rgba.0[1], rgba.0[2]), rgba.0[3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::OpaqueFilter;
    use image::Rgba;

    fn quantizer(pixels: Vec<Rgba<u8>>, max_colors: usize) -> BucketQuantizer<Rgba<u8>> {
        BucketQuantizer::new(pixels, 15, max_colors, vec![Box::new(OpaqueFilter::default())])
    }

    #[test]
    fn quantize_rounds_to_nearest_step() {
        assert_eq!(quantize_channel(0, 15), 0);
        assert_eq!(quantize_channel(7, 15), 0);
        assert_eq!(quantize_channel(8, 15), 15);
        assert_eq!(quantize_channel(22, 15), 15);
        assert_eq!(quantize_channel(23, 15), 30);
        assert_eq!(quantize_channel(248, 15), 255);
        assert_eq!(quantize_channel(255, 15), 255);
    }

    #[test]
    fn quantize_is_idempotent_on_multiples() {
        for step in [1u8, 5, 15, 17, 51] {
            for multiple in (0..=255u32).step_by(step as usize) {
                let value = multiple as u8;
                assert_eq!(quantize_channel(value, step), value);
                assert_eq!(quantize_channel(quantize_channel(value, step), step), value);
            }
        }
    }

    #[test]
    fn quantize_clamps_past_the_top() {
        // 250 / 20 = 12.5, rounds up to 260
        assert_eq!(quantize_channel(250, 20), 255);
        assert_eq!(quantize_channel(9, 0), 9);
    }

    #[test]
    fn transparent_pixels_are_not_counted() {
        let pixels = vec![Rgba([255, 0, 0, 255]), Rgba([0, 0, 255, 0]), Rgba([0, 0, 255, 127])];
        let quantized = quantizer(pixels, 12).get_quantized_colors();

        assert_eq!(quantized.counted_pixels, 1);
        assert_eq!(quantized.filtered_pixels, 2);
        assert_eq!(quantized.swatches, vec![Swatch::new((255, 0, 0), 1)]);
    }

    #[test]
    fn fully_transparent_yields_nothing() {
        let pixels = vec![Rgba([10, 20, 30, 0]); 16];
        let quantized = quantizer(pixels, 12).get_quantized_colors();

        assert!(quantized.swatches.is_empty());
        assert_eq!(quantized.unique_buckets, 0);
    }

    #[test]
    fn ranks_by_count_then_scan_order() {
        let a = Rgba([0, 0, 0, 255]);
        let b = Rgba([255, 255, 255, 255]);
        let c = Rgba([255, 0, 0, 255]);
        let pixels = vec![a, b, c, c, b, c];

        let quantized = quantizer(pixels, 12).get_quantized_colors();
        let order: Vec<_> = quantized.swatches.iter().map(|s| s.rgb()).collect();

        assert_eq!(order, vec![(255, 0, 0), (255, 255, 255), (0, 0, 0)]);

        // a tie keeps first-seen order
        let quantized = quantizer(vec![b, a, a, b], 12).get_quantized_colors();
        let order: Vec<_> = quantized.swatches.iter().map(|s| s.rgb()).collect();

        assert_eq!(order, vec![(255, 255, 255), (0, 0, 0)]);
    }

    #[test]
    fn similar_colors_share_a_bucket() {
        let pixels = vec![Rgba([100, 100, 100, 255]), Rgba([104, 98, 101, 255])];
        let quantized = quantizer(pixels, 12).get_quantized_colors();

        assert_eq!(quantized.swatches, vec![Swatch::new((105, 105, 105), 2)]);
    }

    #[test]
    fn truncates_to_max_colors() {
        let pixels = (0..20u8).map(|i| Rgba([i * 12, 0, 0, 255])).collect();
        let quantized = quantizer(pixels, 4).get_quantized_colors();

        assert_eq!(quantized.swatches.len(), 4);
        assert!(quantized.unique_buckets > 4);
    }

    #[test]
    fn zero_max_colors_falls_back_to_most_populous() {
        let pixels = vec![Rgba([0, 0, 0, 255]), Rgba([0, 0, 255, 255]), Rgba([0, 0, 255, 255])];
        let quantized = quantizer(pixels, 0).get_quantized_colors();

        assert_eq!(quantized.swatches, vec![Swatch::new((0, 0, 255), 2)]);
    }
}

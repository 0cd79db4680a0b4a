use crate::swatch::Swatch;

/// One color of an extracted palette: its hex code, nearest reference name and share of the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtractedColor {
    hex: String,
    name: &'static str,
    percentage: u8,
    #[cfg_attr(feature = "serde", serde(skip))]
    swatch: Swatch,
}

impl ExtractedColor {
    pub(crate) fn new(swatch: Swatch, percentage: u8) -> Self {
        Self {
            hex: swatch.hex(),
            name: crate::names::nearest_name(swatch.rgb()),
            percentage,
            swatch,
        }
    }

    /// The color as an uppercase `#RRGGBB` string.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// The name of the closest reference color.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The share of this color among the retained palette colors, rounded to a whole percent.
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        self.swatch.rgb()
    }

    pub fn hsl(&self) -> (f32, f32, f32) {
        self.swatch.hsl()
    }

    /// The number of counted pixels that fell into this color's bucket.
    pub fn population(&self) -> u32 {
        self.swatch.population()
    }

    pub fn swatch(&self) -> Swatch {
        self.swatch
    }
}

/// Format a color as an uppercase `#RRGGBB` string.
pub fn to_hex((red, green, blue): (u8, u8, u8)) -> String {
    format!("#{red:02X}{green:02X}{blue:02X}")
}

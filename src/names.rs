//! Nearest-name lookup against a small, fixed table of common colors.

use crate::error::Result;
use std::str::FromStr;

/// A named color in the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceColor {
    name: &'static str,
    rgb: (u8, u8, u8),
}

impl ReferenceColor {
    pub const fn new(name: &'static str, rgb: (u8, u8, u8)) -> Self {
        Self { name, rgb }
    }

    pub fn name(self) -> &'static str {
        self.name
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        self.rgb
    }

    pub fn hex(self) -> String {
        crate::color::to_hex(self.rgb)
    }
}

/// The reference colors used for naming, in lookup order.
///
/// Some colors appear under more than one name (Green and Lime, Cyan and Aqua). The earlier entry always wins.
pub const REFERENCE_COLORS: [ReferenceColor; 35] = [
    ReferenceColor::new("Black", (0, 0, 0)),
    ReferenceColor::new("White", (255, 255, 255)),
    ReferenceColor::new("Red", (255, 0, 0)),
    ReferenceColor::new("Green", (0, 255, 0)),
    ReferenceColor::new("Blue", (0, 0, 255)),
    ReferenceColor::new("Yellow", (255, 255, 0)),
    ReferenceColor::new("Cyan", (0, 255, 255)),
    ReferenceColor::new("Magenta", (255, 0, 255)),
    ReferenceColor::new("Silver", (192, 192, 192)),
    ReferenceColor::new("Gray", (128, 128, 128)),
    ReferenceColor::new("Maroon", (128, 0, 0)),
    ReferenceColor::new("Olive", (128, 128, 0)),
    ReferenceColor::new("Lime", (0, 255, 0)),
    ReferenceColor::new("Aqua", (0, 255, 255)),
    ReferenceColor::new("Teal", (0, 128, 128)),
    ReferenceColor::new("Navy", (0, 0, 128)),
    ReferenceColor::new("Purple", (128, 0, 128)),
    ReferenceColor::new("Orange", (255, 165, 0)),
    ReferenceColor::new("Pink", (255, 192, 203)),
    ReferenceColor::new("Brown", (165, 42, 42)),
    ReferenceColor::new("Beige", (245, 245, 220)),
    ReferenceColor::new("Tan", (210, 180, 140)),
    ReferenceColor::new("Peach", (255, 218, 185)),
    ReferenceColor::new("Lavender", (230, 230, 250)),
    ReferenceColor::new("Turquoise", (64, 224, 208)),
    ReferenceColor::new("Gold", (255, 215, 0)),
    ReferenceColor::new("Indigo", (75, 0, 130)),
    ReferenceColor::new("Violet", (238, 130, 238)),
    ReferenceColor::new("Coral", (255, 127, 80)),
    ReferenceColor::new("Salmon", (250, 128, 114)),
    ReferenceColor::new("Khaki", (240, 230, 140)),
    ReferenceColor::new("Crimson", (220, 20, 60)),
    ReferenceColor::new("Sky Blue", (135, 206, 235)),
    ReferenceColor::new("Forest Green", (34, 139, 34)),
    ReferenceColor::new("Chocolate", (210, 105, 30)),
];

/// Return the name of the reference color closest to the given hex color string.
///
/// The string may be in `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` form, in either case.
pub fn name_for(hex: &str) -> Result<&'static str> {
    let color = palette::Srgb::<u8>::from_str(hex)?;
    Ok(nearest_name((color.red, color.green, color.blue)))
}

/// Return the name of the reference color closest to the given color.
pub fn nearest_name(rgb: (u8, u8, u8)) -> &'static str {
    nearest_reference(rgb).name
}

/// Return the reference color with the smallest Euclidean distance to the given color in RGB space.
pub fn nearest_reference(rgb: (u8, u8, u8)) -> ReferenceColor {
    let mut closest = REFERENCE_COLORS[0];
    let mut min_distance = u32::MAX;

    // strictly less-than so the first listed entry wins a tie
    for reference in REFERENCE_COLORS {
        let distance = distance_squared(rgb, reference.rgb);

        if distance < min_distance {
            min_distance = distance;
            closest = reference;
        }
    }

    closest
}

/// Euclidean distance between two colors in RGB space.
pub fn distance(lhs: (u8, u8, u8), rhs: (u8, u8, u8)) -> f32 {
    (distance_squared(lhs, rhs) as f32).sqrt()
}

// the square root is monotonic, so the squared distance orders (and ties) exactly like the real one
fn distance_squared((r1, g1, b1): (u8, u8, u8), (r2, g2, b2): (u8, u8, u8)) -> u32 {
    let dr = r1 as i32 - r2 as i32;
    let dg = g1 as i32 - g2 as i32;
    let db = b1 as i32 - b2 as i32;

    (dr * dr + dg * dg + db * db) as u32
}

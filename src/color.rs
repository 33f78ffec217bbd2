use std::fmt;

use palette::{Hsl, IntoColor, Srgb};
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Rgb – UI-independent colour
// ---------------------------------------------------------------------------

/// An sRGB colour. Serialises as `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Title and axis text colour (CSS `RebeccaPurple`).
pub const FONT_COLOR: Rgb = Rgb::from_hex(0x663399);

/// Fill of single-series bar charts.
pub const DEFAULT_BAR_COLOR: Rgb = Rgb::from_hex(0x636efa);

/// Used for companies without a fixed colour.
pub const FALLBACK_COLOR: Rgb = Rgb::from_hex(0x7f7f7f);

/// Fixed colour of each known company in the time series.
pub fn company_color(company: &str) -> Option<Rgb> {
    match company {
        "Hapvida" => Some(Rgb::from_hex(0xff7f0e)),
        "Ibyte" => Some(Rgb::from_hex(0x2ca02c)),
        "Nagem" => Some(Rgb::from_hex(0x1f77b4)),
        _ => None,
    }
}

/// ColorBrewer "Set1" qualitative palette.
const SET1: [Rgb; 9] = [
    Rgb::from_hex(0xe41a1c),
    Rgb::from_hex(0x377eb8),
    Rgb::from_hex(0x4daf4a),
    Rgb::from_hex(0x984ea3),
    Rgb::from_hex(0xff7f00),
    Rgb::from_hex(0xffff33),
    Rgb::from_hex(0xa65628),
    Rgb::from_hex(0xf781bf),
    Rgb::from_hex(0x999999),
];

// ---------------------------------------------------------------------------
// Palette generators
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            Rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

/// `n` categorical colours: Set1 first, generated hues after it runs out.
pub fn qualitative(n: usize) -> Vec<Rgb> {
    let mut colors: Vec<Rgb> = SET1.iter().copied().take(n).collect();
    if n > SET1.len() {
        colors.extend(generate_palette(n - SET1.len()));
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting() {
        assert_eq!(Rgb::from_hex(0xff7f0e).to_string(), "#ff7f0e");
        assert_eq!(serde_json::to_string(&FONT_COLOR).unwrap(), "\"#663399\"");
    }

    #[test]
    fn qualitative_extends_past_set1() {
        let colors = qualitative(12);
        assert_eq!(colors.len(), 12);
        assert_eq!(colors[0], Rgb::from_hex(0xe41a1c));
        assert_eq!(qualitative(3).len(), 3);
    }

    #[test]
    fn known_companies_have_fixed_colors() {
        assert_eq!(company_color("Nagem"), Some(Rgb::from_hex(0x1f77b4)));
        assert_eq!(company_color("Outra"), None);
    }
}

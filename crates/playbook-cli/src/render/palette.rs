//! Colors and colormaps.

use playbook_core::types::HexColor;
use plotters::style::RGBColor;

/// Line colors for the backtest portfolios, in portfolio order.
pub const SERIES: [RGBColor; 6] = [
    RGBColor(0x1F, 0x77, 0xB4),
    RGBColor(0xFF, 0x7F, 0x0E),
    RGBColor(0x2C, 0xA0, 0x2C),
    RGBColor(0xD6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xBD),
    RGBColor(0x8C, 0x56, 0x4B),
];

/// Light grid color.
pub const GRID: RGBColor = RGBColor(0xB0, 0xB0, 0xB0);

/// Insight box fill.
pub const LIGHT_YELLOW: RGBColor = RGBColor(0xFF, 0xFF, 0xE0);

/// Insight box border.
pub const ORANGE: RGBColor = RGBColor(0xFF, 0xA5, 0x00);

/// YlGnBu control points, light to dark.
const YL_GN_BU: [(u8, u8, u8); 9] = [
    (0xFF, 0xFF, 0xD9),
    (0xED, 0xF8, 0xB1),
    (0xC7, 0xE9, 0xB4),
    (0x7F, 0xCD, 0xBB),
    (0x41, 0xB6, 0xC4),
    (0x1D, 0x91, 0xC0),
    (0x22, 0x5E, 0xA8),
    (0x25, 0x34, 0x94),
    (0x08, 0x1D, 0x58),
];

/// Cycles through [`SERIES`].
pub fn series(index: usize) -> RGBColor {
    SERIES[index % SERIES.len()]
}

/// Converts a domain color to a plotters color.
pub fn rgb(color: HexColor) -> RGBColor {
    let (r, g, b) = color.rgb();
    RGBColor(r, g, b)
}

/// Samples the YlGnBu colormap at `t` in `[0, 1]` (clamped).
pub fn yl_gn_bu(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (YL_GN_BU.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(YL_GN_BU.len() - 1);
    let frac = scaled - lo as f64;

    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
    let (a, b) = (YL_GN_BU[lo], YL_GN_BU[hi]);
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Black or white, whichever reads better on `background`.
pub fn text_on(background: RGBColor) -> RGBColor {
    let RGBColor(r, g, b) = background;
    let luminance = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    if luminance > 140.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(0xFF, 0xFF, 0xFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colormap_endpoints() {
        assert_eq!(yl_gn_bu(0.0), RGBColor(0xFF, 0xFF, 0xD9));
        assert_eq!(yl_gn_bu(1.0), RGBColor(0x08, 0x1D, 0x58));
        assert_eq!(yl_gn_bu(-3.0), yl_gn_bu(0.0));
        assert_eq!(yl_gn_bu(f64::NAN), yl_gn_bu(0.0));
    }

    #[test]
    fn test_text_contrast() {
        assert_eq!(text_on(yl_gn_bu(0.0)), RGBColor(0, 0, 0));
        assert_eq!(text_on(yl_gn_bu(1.0)), RGBColor(0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn test_hex_conversion() {
        assert_eq!(rgb(HexColor::new(0xF7, 0x93, 0x1A)), RGBColor(0xF7, 0x93, 0x1A));
        assert_eq!(series(7), SERIES[1]);
    }
}

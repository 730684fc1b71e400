//! Readable text colour for a background
//!
//! Uses WCAG relative luminance: sRGB channels are linearised, weighted
//! 0.2126/0.7152/0.0722, and backgrounds below 0.5 get white text.

/// Text colour used on dark backgrounds
pub const LIGHT_TEXT: &str = "#ffffff";

/// Text colour used on light backgrounds, and for unparseable colours
pub const DARK_TEXT: &str = "#0f172a";

/// Luminance below which text switches to [`LIGHT_TEXT`]
pub const LUMINANCE_THRESHOLD: f64 = 0.5;

/// Parse `#RRGGBB` or `#RGB` (leading `#` optional)
pub fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some([channel(0)?, channel(2)?, channel(4)?])
        }
        3 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some([channel(0)?, channel(1)?, channel(2)?])
        }
        _ => None,
    }
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in `0.0..=1.0`
pub fn relative_luminance([r, g, b]: [u8; 3]) -> f64 {
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Text colour that stays readable on `background`
pub fn text_color_for(background: &str) -> &'static str {
    match parse_hex(background) {
        Some(rgb) if relative_luminance(rgb) < LUMINANCE_THRESHOLD => LIGHT_TEXT,
        _ => DARK_TEXT,
    }
}

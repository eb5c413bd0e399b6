use crate::weights::DEFAULT_SIMILARITY_THRESHOLD;

/// 24-bit RGB color parsed from a 6-hex-digit string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses `#RRGGBB` or `RRGGBB`, case-insensitive.
    ///
    /// Returns `None` for anything else. Catalog color data is dirty, so a
    /// bad value must never abort a scoring run.
    pub fn parse(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Euclidean distance in RGB space. Maximum is sqrt(3 * 255^2), about 441.7.
    pub fn distance(self, other: Self) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// Whether two hex colors are close enough to count as a match.
///
/// RGB distance under a deliberately loose threshold, not perceptual color
/// science: moderately different shades of the same color still pass.
/// Unparseable input is never similar.
pub fn colors_similar(a: &str, b: &str) -> bool {
    similar_within(a, b, DEFAULT_SIMILARITY_THRESHOLD)
}

pub(crate) fn similar_within(a: &str, b: &str, threshold: f64) -> bool {
    let (Some(a), Some(b)) = (Rgb::parse(a), Rgb::parse(b)) else {
        return false;
    };
    a.distance(b) < threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_with_and_without_hash_prefix() {
        let expected = Rgb { r: 0xff, g: 0x00, b: 0x50 };
        assert_eq!(Rgb::parse("#FF0050"), Some(expected));
        assert_eq!(Rgb::parse("ff0050"), Some(expected));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Rgb::parse(""), None);
        assert_eq!(Rgb::parse("#FFF"), None);
        assert_eq!(Rgb::parse("#GG0000"), None);
        assert_eq!(Rgb::parse("#FF0000AA"), None);
        assert_eq!(Rgb::parse("red"), None);
    }

    #[test]
    fn identical_colors_are_similar() {
        assert!(colors_similar("#FF0000", "#FF0000"));
    }

    #[test]
    fn black_and_white_are_not_similar() {
        assert!(!colors_similar("#000000", "#FFFFFF"));
    }

    #[test]
    fn nearby_shades_pass_the_threshold() {
        // Distance is exactly 80, under the 100.0 cutoff.
        assert!(colors_similar("#FF0000", "#FF0050"));
    }

    #[test]
    fn unparseable_input_is_never_similar() {
        assert!(!colors_similar("not-a-color", "#FF0000"));
        assert!(!colors_similar("#FF0000", "not-a-color"));
    }
}

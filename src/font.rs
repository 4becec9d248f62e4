//! Font selection and metrics for text measurement

#[cfg(feature = "ttf-parser")]
use crate::constants::DEFAULT_CHAR_WIDTH_RATIO;

/// Trait for measuring text dimensions.
///
/// Widths are returned in points at the given font size. Implement this trait
/// to replace the built-in width estimates with real glyph metrics.
pub trait FontMetrics {
    /// Width of a single character in points at the given font size
    fn char_width(&self, ch: char, font_size: f32) -> f32;

    /// Total width of a string in points at the given font size
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }
}

/// A font request: family name as configured plus weight
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub family: String,
    pub bold: bool,
}

impl FontSpec {
    pub fn new<S: Into<String>>(family: S, bold: bool) -> Self {
        Self {
            family: family.into(),
            bold,
        }
    }
}

/// The PDF base-14 faces the lopdf backend can draw without embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    /// Resolve a configured family name. Arial is metric-compatible with
    /// Helvetica and maps onto it.
    pub fn resolve(spec: &FontSpec) -> Option<Self> {
        let family = spec.family.trim().to_ascii_lowercase();
        let font = match (family.as_str(), spec.bold) {
            ("helvetica" | "arial", false) => Self::Helvetica,
            ("helvetica" | "arial", true) => Self::HelveticaBold,
            ("times" | "times-roman" | "times new roman", false) => Self::TimesRoman,
            ("times" | "times-roman" | "times new roman", true) => Self::TimesBold,
            ("courier" | "courier new", false) => Self::Courier,
            ("courier" | "courier new", true) => Self::CourierBold,
            _ => return None,
        };
        Some(font)
    }

    /// PostScript name written to the font dictionary
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
        }
    }

    /// Resource name used by the `Tf` operator
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Helvetica => "F1",
            Self::HelveticaBold => "F1-Bold",
            Self::TimesRoman => "F2",
            Self::TimesBold => "F2-Bold",
            Self::Courier => "F3",
            Self::CourierBold => "F3-Bold",
        }
    }
}

/// Width estimates for the standard faces, by character class.
///
/// Values are average advance widths (fraction of the font size) taken from
/// the base-14 AFM tables for digits, capitals, lowercase and narrow
/// punctuation, which covers the identifiers printed on wire labels.
#[derive(Debug, Clone, Copy)]
pub struct EstimatedMetrics {
    digit: f32,
    upper: f32,
    lower: f32,
    narrow: f32,
    hyphen: f32,
    other: f32,
}

impl EstimatedMetrics {
    pub fn for_font(font: StandardFont) -> Self {
        match font {
            StandardFont::Helvetica => Self {
                digit: 0.556,
                upper: 0.667,
                lower: 0.5,
                narrow: 0.278,
                hyphen: 0.333,
                other: 0.556,
            },
            StandardFont::HelveticaBold => Self {
                digit: 0.556,
                upper: 0.722,
                lower: 0.556,
                narrow: 0.278,
                hyphen: 0.333,
                other: 0.584,
            },
            StandardFont::TimesRoman => Self {
                digit: 0.5,
                upper: 0.667,
                lower: 0.444,
                narrow: 0.25,
                hyphen: 0.333,
                other: 0.5,
            },
            StandardFont::TimesBold => Self {
                digit: 0.5,
                upper: 0.722,
                lower: 0.5,
                narrow: 0.25,
                hyphen: 0.333,
                other: 0.5,
            },
            StandardFont::Courier | StandardFont::CourierBold => Self {
                digit: 0.6,
                upper: 0.6,
                lower: 0.6,
                narrow: 0.6,
                hyphen: 0.6,
                other: 0.6,
            },
        }
    }
}

impl FontMetrics for EstimatedMetrics {
    fn char_width(&self, ch: char, font_size: f32) -> f32 {
        let ratio = match ch {
            '0'..='9' => self.digit,
            'A'..='Z' => self.upper,
            'a'..='z' => self.lower,
            ' ' | '.' | ',' | ':' | ';' | '/' | '!' | '|' | '\'' => self.narrow,
            '-' => self.hyphen,
            _ => self.other,
        };
        ratio * font_size
    }
}

/// TrueType font metrics using ttf-parser for accurate glyph measurement.
///
/// This struct owns the font data and parses it on demand for measurements.
/// It only measures; glyphs are still drawn with the standard face the
/// metrics are registered for.
#[cfg(feature = "ttf-parser")]
pub struct TtfFontMetrics {
    font_data: Vec<u8>,
    units_per_em: f32,
}

#[cfg(feature = "ttf-parser")]
impl TtfFontMetrics {
    /// Create new font metrics from raw TTF/TTC font data.
    ///
    /// Validates the font by parsing it and extracting units_per_em.
    pub fn new(font_data: Vec<u8>) -> std::result::Result<Self, crate::error::BackendError> {
        let face = ttf_parser::Face::parse(&font_data, 0).map_err(|e| {
            crate::error::BackendError::Measurement(format!("Failed to parse font: {e}"))
        })?;
        let units_per_em = face.units_per_em() as f32;
        Ok(Self {
            font_data,
            units_per_em,
        })
    }

    fn advance(&self, face: &ttf_parser::Face<'_>, ch: char, font_size: f32) -> f32 {
        face.glyph_index(ch)
            .and_then(|gid| face.glyph_hor_advance(gid))
            .map(|advance| advance as f32 / self.units_per_em * font_size)
            .unwrap_or(font_size * DEFAULT_CHAR_WIDTH_RATIO)
    }
}

#[cfg(feature = "ttf-parser")]
impl FontMetrics for TtfFontMetrics {
    fn char_width(&self, ch: char, font_size: f32) -> f32 {
        match ttf_parser::Face::parse(&self.font_data, 0) {
            Ok(face) => self.advance(&face, ch, font_size),
            Err(_) => font_size * DEFAULT_CHAR_WIDTH_RATIO,
        }
    }

    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        match ttf_parser::Face::parse(&self.font_data, 0) {
            Ok(face) => text
                .chars()
                .map(|ch| self.advance(&face, ch, font_size))
                .sum(),
            Err(_) => text.chars().count() as f32 * font_size * DEFAULT_CHAR_WIDTH_RATIO,
        }
    }
}

#[cfg(feature = "ttf-parser")]
impl std::fmt::Debug for TtfFontMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfFontMetrics")
            .field("units_per_em", &self.units_per_em)
            .field("font_data_len", &self.font_data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(
            StandardFont::resolve(&FontSpec::new("Arial", true)),
            Some(StandardFont::HelveticaBold)
        );
        assert_eq!(
            StandardFont::resolve(&FontSpec::new(" times ", false)),
            Some(StandardFont::TimesRoman)
        );
        assert_eq!(StandardFont::resolve(&FontSpec::new("Verdana", false)), None);
    }

    #[test]
    fn test_courier_is_monospaced() {
        let metrics = EstimatedMetrics::for_font(StandardFont::Courier);
        assert_eq!(metrics.text_width("W-1", 10.0), metrics.text_width("i.i", 10.0));
        assert!((metrics.text_width("ABCD", 10.0) - 24.0).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = EstimatedMetrics::for_font(StandardFont::Helvetica);
        let bold = EstimatedMetrics::for_font(StandardFont::HelveticaBold);
        assert!(bold.text_width("WIRE-A", 8.0) > regular.text_width("WIRE-A", 8.0));
    }

    #[test]
    fn test_width_scales_with_size() {
        let metrics = EstimatedMetrics::for_font(StandardFont::Helvetica);
        let small = metrics.text_width("W-102", 6.0);
        let large = metrics.text_width("W-102", 12.0);
        assert!((large - small * 2.0).abs() < 1e-4);
    }
}

#[cfg(test)]
#[cfg(feature = "ttf-parser")]
mod ttf_tests {
    use super::*;

    fn load_test_font() -> Option<Vec<u8>> {
        // Try common system font paths
        let paths = [
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];
        for path in &paths {
            if let Ok(data) = std::fs::read(path) {
                return Some(data);
            }
        }
        None
    }

    #[test]
    fn test_ttf_font_metrics_invalid_data() {
        let result = TtfFontMetrics::new(vec![0, 1, 2, 3]);
        assert!(result.is_err());
    }

    #[test]
    fn test_ttf_text_width_sums_char_widths() {
        let Some(font_data) = load_test_font() else {
            eprintln!("Skipping test: no system font found");
            return;
        };
        let metrics = TtfFontMetrics::new(font_data).unwrap();
        let single = metrics.char_width('A', 12.0);
        let triple = metrics.text_width("AAA", 12.0);
        assert!(single > 0.0);
        assert!(
            (triple - single * 3.0).abs() < 0.01,
            "text_width should equal sum of char_widths"
        );
    }
}

//! Decoding and encoding of style-string values
//!
//! Recognized encodings, dispatched on the leading characters:
//! - hex color: `#fff` or `#ffffff` (single-digit channels duplicate, so
//!   `f` reads as `0xff`)
//! - functional color: `rgb(r, g, b)` or `rgba(r, g, b, a)`
//! - scalar: a number with an optional unit suffix, `16px`, `1.5`, `50%`

use ember_core::{EmberError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded visual value.
///
/// A single animated property uses exactly one variant across all its
/// keyframes; mixing variants within one list is a contract violation
/// caught at animator construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StyleValue {
    /// A number with a unit suffix (empty unit for bare numbers)
    Scalar { magnitude: f32, unit: String },
    /// An RGBA color with 8-bit channels and fractional alpha
    Color { r: u8, g: u8, b: u8, a: f32 },
}

impl StyleValue {
    pub fn scalar(magnitude: f32, unit: impl Into<String>) -> Self {
        Self::Scalar {
            magnitude,
            unit: unit.into(),
        }
    }

    pub const fn color(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::Color { r, g, b, a }
    }

    pub fn is_color(&self) -> bool {
        matches!(self, Self::Color { .. })
    }

    /// Variant name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar { .. } => "scalar",
            Self::Color { .. } => "color",
        }
    }

    /// Parse a style string into a normalized value.
    ///
    /// Malformed input is a `Decode` error, never a silent zero.
    pub fn decode(input: &str) -> Result<Self> {
        let s = input.trim();
        if s.is_empty() {
            return Err(EmberError::Decode("empty style value".into()));
        }
        if let Some(hex) = s.strip_prefix('#') {
            return decode_hex(hex, input);
        }
        if s.starts_with("rgb") {
            return decode_functional(s, input);
        }
        decode_scalar(s, input)
    }

    /// Serialize back to a style string.
    ///
    /// Colors always come out as `rgba(r, g, b, a)` with integer channels;
    /// scalars as `magnitude` + `unit` with no separator. Whole numbers
    /// print without a fractional part, so `decode(encode(v)) == v` for
    /// every valid `v`.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar { magnitude, unit } => {
                write!(f, "{}{}", Number(*magnitude), unit)
            }
            Self::Color { r, g, b, a } => {
                write!(f, "rgba({}, {}, {}, {})", r, g, b, Number(*a))
            }
        }
    }
}

/// Prints whole floats without a trailing `.0` (`16` rather than `16.0`)
struct Number(f32);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e9 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn decode_hex(digits: &str, input: &str) -> Result<StyleValue> {
    let nibble = |c: char| c.to_digit(16).map(|d| d as u8);
    let chars: Vec<u8> = digits
        .chars()
        .map(nibble)
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| EmberError::Decode(format!("invalid hex color: {input:?}")))?;

    let (r, g, b) = match chars.as_slice() {
        // Single-digit channels duplicate: #fa0 == #ffaa00
        [r, g, b] => (r * 0x11, g * 0x11, b * 0x11),
        [r1, r0, g1, g0, b1, b0] => (r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0),
        _ => {
            return Err(EmberError::Decode(format!(
                "hex color must have 3 or 6 digits: {input:?}"
            )))
        }
    };
    Ok(StyleValue::color(r, g, b, 1.0))
}

fn decode_functional(s: &str, input: &str) -> Result<StyleValue> {
    let bad = || EmberError::Decode(format!("invalid functional color: {input:?}"));

    let (head, rest) = s.split_once('(').ok_or_else(bad)?;
    let has_alpha = match head.trim() {
        "rgb" => false,
        "rgba" => true,
        _ => return Err(bad()),
    };
    let body = rest.trim_end().strip_suffix(')').ok_or_else(bad)?;
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != if has_alpha { 4 } else { 3 } {
        return Err(bad());
    }

    let channel = |p: &str| p.parse::<u8>().map_err(|_| bad());
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = if has_alpha {
        let a: f32 = parts[3].parse().map_err(|_| bad())?;
        if !(0.0..=1.0).contains(&a) {
            return Err(bad());
        }
        a
    } else {
        1.0
    };
    Ok(StyleValue::color(r, g, b, a))
}

fn decode_scalar(s: &str, input: &str) -> Result<StyleValue> {
    let digits_end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let (num, unit) = s.split_at(digits_end);

    let magnitude: f32 = num
        .parse()
        .map_err(|_| EmberError::Decode(format!("not a recognized style value: {input:?}")))?;
    if !unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%') {
        return Err(EmberError::Decode(format!(
            "invalid unit suffix in: {input:?}"
        )));
    }
    Ok(StyleValue::scalar(magnitude, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_short_hex() {
        assert_eq!(
            StyleValue::decode("#fff").unwrap(),
            StyleValue::color(255, 255, 255, 1.0)
        );
        assert_eq!(
            StyleValue::decode("#fa0").unwrap(),
            StyleValue::color(0xff, 0xaa, 0x00, 1.0)
        );
    }

    #[test]
    fn decode_long_hex() {
        assert_eq!(
            StyleValue::decode("#ff8844").unwrap(),
            StyleValue::color(0xff, 0x88, 0x44, 1.0)
        );
    }

    #[test]
    fn decode_hex_rejects_bad_lengths() {
        assert!(StyleValue::decode("#ffff").is_err());
        assert!(StyleValue::decode("#f").is_err());
        assert!(StyleValue::decode("#gggggg").is_err());
    }

    #[test]
    fn decode_rgb_defaults_alpha() {
        assert_eq!(
            StyleValue::decode("rgb(255, 0, 10)").unwrap(),
            StyleValue::color(255, 0, 10, 1.0)
        );
    }

    #[test]
    fn decode_rgba() {
        assert_eq!(
            StyleValue::decode("rgba(1,2,3,0.5)").unwrap(),
            StyleValue::color(1, 2, 3, 0.5)
        );
    }

    #[test]
    fn decode_functional_rejects_malformed() {
        assert!(StyleValue::decode("rgb(1, 2)").is_err());
        assert!(StyleValue::decode("rgba(1, 2, 3)").is_err());
        assert!(StyleValue::decode("rgb(300, 0, 0)").is_err());
        assert!(StyleValue::decode("rgba(1, 2, 3, 1.5)").is_err());
        assert!(StyleValue::decode("rgbx(1, 2, 3)").is_err());
    }

    #[test]
    fn decode_scalar_with_unit() {
        assert_eq!(
            StyleValue::decode("16px").unwrap(),
            StyleValue::scalar(16.0, "px")
        );
        assert_eq!(
            StyleValue::decode("50%").unwrap(),
            StyleValue::scalar(50.0, "%")
        );
    }

    #[test]
    fn decode_bare_number() {
        assert_eq!(
            StyleValue::decode("1.5").unwrap(),
            StyleValue::scalar(1.5, "")
        );
        assert_eq!(
            StyleValue::decode("-4px").unwrap(),
            StyleValue::scalar(-4.0, "px")
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(StyleValue::decode("notacolor").is_err());
        assert!(StyleValue::decode("").is_err());
        assert!(StyleValue::decode("px16").is_err());
    }

    #[test]
    fn encode_normalizes() {
        assert_eq!(StyleValue::color(255, 0, 10, 1.0).encode(), "rgba(255, 0, 10, 1)");
        assert_eq!(StyleValue::color(1, 2, 3, 0.5).encode(), "rgba(1, 2, 3, 0.5)");
        assert_eq!(StyleValue::scalar(16.0, "px").encode(), "16px");
        assert_eq!(StyleValue::scalar(1.5, "").encode(), "1.5");
    }

    #[test]
    fn round_trip() {
        for s in ["#fff", "#ff8844", "rgb(12, 34, 56)", "rgba(1, 2, 3, 0.25)", "16px", "0.5", "100%"] {
            let v = StyleValue::decode(s).unwrap();
            let back = StyleValue::decode(&v.encode()).unwrap();
            assert_eq!(v, back, "round trip failed for {s:?}");
        }
    }
}

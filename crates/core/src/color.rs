//! Color values exchanged between engines and the renderer.
//!
//! Engines build [`Color`] values in the channel scale they think in (RGB
//! 0-255, or HSB with hue in degrees) and hand them to the renderer untouched.
//! Only the renderer resolves them to [`Srgb`] plus alpha.

use crate::error::EngineError;
use serde::{Serialize, Serializer};

/// Upper bound of 8-bit style channels (RGB components and alpha).
pub const CHANNEL_MAX: f64 = 255.0;
/// Upper bound of HSB saturation and brightness.
pub const PERCENT_MAX: f64 = 100.0;

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `EngineError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 hex digits, got '{hex}'"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f64 / CHANNEL_MAX)
                .map_err(|e| EngineError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Quantizes to 8-bit channels with clamping and rounding.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * CHANNEL_MAX).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Converts HSB (hue in degrees, saturation and brightness in [0, 1]) to sRGB.
///
/// Hue wraps modulo 360; saturation and brightness are clamped.
pub fn hsb_to_srgb(hue: f64, saturation: f64, brightness: f64) -> Srgb {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let v = brightness.clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Srgb {
        r: r + m,
        g: g + m,
        b: b + m,
    }
}

/// Opaque color value produced by engines.
///
/// Channels are stored exactly as constructed; out-of-range values are only
/// resolved (clamped, hue wrapped) by [`Color::to_srgb`] and [`Color::opacity`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// RGB with channels and alpha on a 0-255 scale.
    Rgb { r: f64, g: f64, b: f64, alpha: f64 },
    /// Hue in degrees, saturation and brightness 0-100, alpha 0-255.
    Hsb {
        hue: f64,
        saturation: f64,
        brightness: f64,
        alpha: f64,
    },
}

impl Color {
    /// RGB color with channels and alpha in 0-255.
    pub fn rgb(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Color::Rgb { r, g, b, alpha }
    }

    /// HSB color: hue in degrees, saturation and brightness in 0-100,
    /// alpha in 0-255.
    pub fn hsb(hue: f64, saturation: f64, brightness: f64, alpha: f64) -> Self {
        Color::Hsb {
            hue,
            saturation,
            brightness,
            alpha,
        }
    }

    /// Alpha as constructed, on the 0-255 scale.
    pub fn alpha(&self) -> f64 {
        match *self {
            Color::Rgb { alpha, .. } | Color::Hsb { alpha, .. } => alpha,
        }
    }

    /// Alpha normalized to [0, 1].
    pub fn opacity(&self) -> f64 {
        (self.alpha() / CHANNEL_MAX).clamp(0.0, 1.0)
    }

    /// Resolves the color to sRGB, discarding alpha.
    pub fn to_srgb(&self) -> Srgb {
        match *self {
            Color::Rgb { r, g, b, .. } => Srgb {
                r: (r / CHANNEL_MAX).clamp(0.0, 1.0),
                g: (g / CHANNEL_MAX).clamp(0.0, 1.0),
                b: (b / CHANNEL_MAX).clamp(0.0, 1.0),
            },
            Color::Hsb {
                hue,
                saturation,
                brightness,
                ..
            } => hsb_to_srgb(hue, saturation / PERCENT_MAX, brightness / PERCENT_MAX),
        }
    }
}

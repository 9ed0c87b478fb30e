use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Visible frame height in scene units.
pub const FRAME_HEIGHT: f64 = 8.0;
/// Visible frame width in scene units (16:9).
pub const FRAME_WIDTH: f64 = FRAME_HEIGHT * 16.0 / 9.0;

/// A point in 3D scene space. Only the point-cloud scene uses depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Depth coordinate.
    pub z: f64,
}

impl Point3 {
    /// Create a point from its three coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Drop the depth coordinate.
    pub fn xy(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Absolute 0-based frame index in scene timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Frame index at which a timeline instant starts, rounded to the nearest frame.
    ///
    /// Rounding (rather than flooring) keeps cue boundaries from drifting when many fractional
    /// durations are summed.
    pub fn frame_at(self, secs: f64) -> FrameIndex {
        FrameIndex((secs * self.as_f64()).round().max(0.0) as u64)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Pixels per scene unit, derived from the fixed frame height.
    pub fn pixels_per_unit(self) -> f64 {
        f64::from(self.height) / FRAME_HEIGHT
    }

    /// Affine mapping scene space (origin at center, y up) into pixel space (origin top-left).
    pub fn scene_to_pixels(self) -> Affine {
        let s = self.pixels_per_unit();
        Affine::new([
            s,
            0.0,
            0.0,
            -s,
            f64::from(self.width) / 2.0,
            f64::from(self.height) / 2.0,
        ])
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque color from its three channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (case-insensitive, `#` optional).
    pub fn from_hex(s: &str) -> ReelResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> ReelResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| ReelError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(ReelError::validation("hex color must be ASCII"));
        }
        match s.len() {
            6 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: 255,
            }),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err(ReelError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            )),
        }
    }

    /// Lowercase `#rrggbb` form; alpha is carried separately as an opacity.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a `[0, 1]` opacity.
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.a == 255 {
            serializer.serialize_str(&self.to_hex_rgb())
        } else {
            serializer.serialize_str(&format!("{}{:02x}", self.to_hex_rgb(), self.a))
        }
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// The fixed palette the scripts draw with.
pub mod palette {
    use super::Rgba8;

    /// `#FFFFFF`
    pub const WHITE: Rgba8 = Rgba8::rgb(0xFF, 0xFF, 0xFF);
    /// `#58C4DD`
    pub const BLUE: Rgba8 = Rgba8::rgb(0x58, 0xC4, 0xDD);
    /// `#58C4DD`, the mid shade of the blue ramp.
    pub const BLUE_C: Rgba8 = Rgba8::rgb(0x58, 0xC4, 0xDD);
    /// `#FFFF00`
    pub const YELLOW: Rgba8 = Rgba8::rgb(0xFF, 0xFF, 0x00);
    /// `#83C167`
    pub const GREEN: Rgba8 = Rgba8::rgb(0x83, 0xC1, 0x67);
    /// `#FC6255`
    pub const RED: Rgba8 = Rgba8::rgb(0xFC, 0x62, 0x55);
    /// `#FF862F`
    pub const ORANGE: Rgba8 = Rgba8::rgb(0xFF, 0x86, 0x2F);
    /// `#1E1E1E`, the background shared by every scene.
    pub const BACKGROUND: Rgba8 = Rgba8::rgb(0x1E, 0x1E, 0x1E);
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

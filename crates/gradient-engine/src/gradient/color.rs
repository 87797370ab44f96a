/// Straight-alpha RGBA color.
///
/// Channels are nominally in [0, 1] but are not clamped; the ramp pass writes
/// whatever the GPU target format can represent.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn from_array([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Component-wise linear blend; `t = 0` yields `self`, `t = 1` yields `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Channels as whole 0–255 values, truncating like an inspector readout.
    ///
    /// Out-of-range channels saturate.
    pub fn channel_bytes(self) -> [u8; 4] {
        self.to_array().map(|c| (c * 255.0) as u8)
    }
}

/// Color channels as delivered by a platform color type.
///
/// Platform colors report a variable number of components depending on their
/// color space; this enum names the shapes the editor accepts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ColorComponents {
    /// Single luminance channel, opaque.
    Gray(f32),
    GrayAlpha(f32, f32),
    Rgb(f32, f32, f32),
    Rgba(f32, f32, f32, f32),
}

impl ColorComponents {
    /// Classifies a raw component slice. Returns `None` for empty or
    /// over-long slices.
    pub fn from_slice(components: &[f32]) -> Option<Self> {
        match *components {
            [v] => Some(Self::Gray(v)),
            [v, a] => Some(Self::GrayAlpha(v, a)),
            [r, g, b] => Some(Self::Rgb(r, g, b)),
            [r, g, b, a] => Some(Self::Rgba(r, g, b, a)),
            _ => None,
        }
    }
}

/// Expands any supported component layout into straight RGBA.
pub fn extract_rgba(components: ColorComponents) -> Rgba {
    match components {
        ColorComponents::Gray(v) => Rgba::new(v, v, v, 1.0),
        ColorComponents::GrayAlpha(v, a) => Rgba::new(v, v, v, a),
        ColorComponents::Rgb(r, g, b) => Rgba::new(r, g, b, 1.0),
        ColorComponents::Rgba(r, g, b, a) => Rgba::new(r, g, b, a),
    }
}

impl From<ColorComponents> for Rgba {
    #[inline]
    fn from(components: ColorComponents) -> Self {
        extract_rgba(components)
    }
}

/// Converts a raw component slice, falling back to transparent black for
/// layouts that are not recognised.
pub fn rgba_from_components(components: &[f32]) -> Rgba {
    ColorComponents::from_slice(components).map_or(Rgba::TRANSPARENT, extract_rgba)
}

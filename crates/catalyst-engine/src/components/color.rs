/// Linear RGB color, each channel 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl ElementColor {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional). Returns None on anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let h = hex.trim().trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&h[0..2], 16).ok()?;
        let g = u8::from_str_radix(&h[2..4], 16).ok()?;
        let b = u8::from_str_radix(&h[4..6], 16).ok()?;
        Some(Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0))
    }

    /// Channel-wise average of two colors.
    pub fn mix(self, other: Self) -> Self {
        Self::new(
            (self.r + other.r) * 0.5,
            (self.g + other.g) * 0.5,
            (self.b + other.b) * 0.5,
        )
    }
}

impl Default for ElementColor {
    fn default() -> Self {
        Self { r: 0.7, g: 0.7, b: 0.7 }
    }
}

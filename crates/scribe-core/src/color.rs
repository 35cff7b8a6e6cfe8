/// Linear RGBA vertex color, each channel in `0.0..=1.0`.
///
/// ```
/// use scribe_core::Color;
///
/// // The stock selection highlight: translucent blue.
/// let highlight = Color::from_rgba_u8(0, 0, 255, 100);
/// assert_eq!(highlight.to_array()[2], 1.0);
/// assert_eq!(Color::from_hex(0x00FF00), Color::GREEN);
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    /// Opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from 8-bit channels, `255` mapping to `1.0`.
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let [r, g, b, a] = [r, g, b, a].map(|c| f32::from(c) / 255.0);
        Self { r, g, b, a }
    }

    /// Opaque color from `0xRRGGBB`. The top byte is ignored.
    pub fn from_hex(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self::from_rgba_u8(r, g, b, u8::MAX)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Channels in vertex order.
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8_channels() {
        let c = Color::from_rgba_u8(255, 0, 51, 100);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert!((c.a - 100.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_hex_ignores_top_byte() {
        assert_eq!(Color::from_hex(0xAB00_00FF), Color::BLUE);
        let orange = Color::from_hex(0xFF8000);
        assert!((orange.g - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_alpha_and_arrays() {
        let c = Color::RED.with_alpha(0.5);
        let arr: [f32; 4] = c.into();
        assert_eq!(arr, [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(Color::from(arr), c);
    }
}

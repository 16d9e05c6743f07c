use std::ops::{Add, AddAssign, Mul};

/// Linear RGB, left unclamped until it is packed into a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const GREY: Color = Color::new(0.5, 0.5, 0.5);

    pub const fn new(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    pub const fn splat(v: f64) -> Color {
        Color { r: v, g: v, b: v }
    }

    pub fn lerp(self, other: Color, t: f64) -> Color {
        return self * (1.0 - t) + other * t;
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Clamps each channel to [0, 1] and packs as `0x00RRGGBB`.
    pub fn to_pixel(self) -> u32 {
        let r = to_byte(self.r);
        let g = to_byte(self.g);
        let b = to_byte(self.b);
        return (r << 16) | (g << 8) | b;
    }

    pub fn from_pixel(pixel: u32) -> Color {
        let channel = |shift: u32| ((pixel >> shift) & 0xff) as f64 / 255.0;
        Color::new(channel(16), channel(8), channel(0))
    }
}

fn to_byte(c: f64) -> u32 {
    // NaN casts to 0
    (c.clamp(0.0, 1.0) * 255.0) as u32
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        rhs * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_clamps_out_of_range_channels() {
        assert_eq!(Color::new(2.0, -1.0, 0.5).to_pixel(), 0x00ff_007f);
        assert_eq!(Color::BLACK.to_pixel(), 0);
        assert_eq!(Color::WHITE.to_pixel(), 0x00ff_ffff);
    }

    #[test]
    fn nan_packs_to_zero() {
        assert_eq!(Color::new(f64::NAN, 1.0, 0.0).to_pixel(), 0x0000_ff00);
    }

    #[test]
    fn arithmetic_is_componentwise() {
        let a = Color::new(0.2, 0.4, 0.6);
        let b = Color::new(0.5, 0.5, 2.0);
        assert_eq!(a * b, Color::new(0.1, 0.2, 1.2));
        assert_eq!(a + b, Color::new(0.7, 0.9, 2.6));
        assert_eq!(2.0 * a, Color::new(0.4, 0.8, 1.2));
        assert_eq!(a.lerp(b, 0.0), a);
    }

    #[test]
    fn unpack_inverts_pack_for_bytes() {
        let pixel = 0x0012_34ab;
        assert_eq!(Color::from_pixel(pixel).to_pixel(), pixel);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Unit vector pointing at `angle` radians, measured from +x towards +y.
    pub fn from_angle(angle: f64) -> Self {
        Vector2D::new(angle.cos(), angle.sin())
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }

    pub fn add(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Linear blend towards `other`; `t = 0` keeps `self`, `t = 1` yields `other`.
    pub fn interpolated(&self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn with_alpha(&self, a: u8) -> Rgba {
        Rgba { r: self.r, g: self.g, b: self.b, a }
    }

    pub fn is_black(&self) -> bool {
        *self == Rgb::BLACK
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

/// Maps a cyclic hue index to a fully saturated color.
///
/// The index wraps, so `rainbow(0.0) == rainbow(1.0)`. The wheel runs
/// red, yellow, green, cyan, blue, magenta and back to red.
pub fn rainbow(hue: f64) -> Rgb {
    let scaled = wrap_hue(hue) * 6.0;
    let segment = scaled.floor() as u8;
    let rising = ((scaled - scaled.floor()) * 255.0).round() as u8;
    let falling = 255 - rising;
    match segment {
        0 => Rgb::new(255, rising, 0),
        1 => Rgb::new(falling, 255, 0),
        2 => Rgb::new(0, 255, rising),
        3 => Rgb::new(0, falling, 255),
        4 => Rgb::new(rising, 0, 255),
        _ => Rgb::new(255, 0, falling),
    }
}

/// Wraps a hue index into `[0, 1)`.
pub fn wrap_hue(hue: f64) -> f64 {
    let wrapped = hue.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rainbow_is_cyclic() {
        assert_eq!(rainbow(0.0), rainbow(1.0));
        assert_eq!(rainbow(0.25), rainbow(1.25));
        assert_eq!(rainbow(-0.5), rainbow(0.5));
    }

    #[test]
    fn rainbow_hits_primaries() {
        assert_eq!(rainbow(0.0), Rgb::new(255, 0, 0));
        assert_eq!(rainbow(1.0 / 3.0), Rgb::new(0, 255, 0));
        assert_eq!(rainbow(2.0 / 3.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn interpolation_endpoints() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(110, 220, 130);
        assert_eq!(a.interpolated(b, 0.0), a);
        assert_eq!(a.interpolated(b, 1.0), b);
        assert_eq!(a.interpolated(b, 0.5), Rgb::new(60, 120, 80));
        assert_eq!(a.interpolated(b, 7.0), b);
    }

    #[test]
    fn white_blend_lightens() {
        let blended = Rgb::new(255, 0, 0).interpolated(Rgb::WHITE, 0.3);
        assert_eq!(blended.r, 255);
        assert_eq!(blended.g, blended.b);
        assert!((76..=77).contains(&blended.g));
    }

    #[test]
    fn wrap_hue_stays_in_unit_interval() {
        for hue in [-1.0e-18, -0.05, 0.0, 0.999, 1.0, 1.3, -2.7] {
            let wrapped = wrap_hue(hue);
            assert!((0.0..1.0).contains(&wrapped), "{} wrapped to {}", hue, wrapped);
        }
    }

    #[test]
    fn unit_vectors_have_unit_length() {
        for i in 0..8 {
            let v = Vector2D::from_angle(i as f64 * 0.7);
            assert!((v.x.hypot(v.y) - 1.0).abs() < 1e-12);
        }
    }
}

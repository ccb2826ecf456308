//! Color space conversions between 8-bit sRGB and CIE L*a*b* (D65).

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

/// D65 reference white.
const XN: f64 = 0.95047;
const YN: f64 = 1.0;
const ZN: f64 = 1.08883;

fn gamma(x: f64) -> f64 {
    if x < 0.0031308 {
        12.92 * x
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    }
}

fn gamma_inv(x: f64) -> f64 {
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > 0.008856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn lab_f_inv(t: f64) -> f64 {
    if t > 0.206893 {
        t * t * t
    } else {
        (t - 16.0 / 116.0) / 7.787
    }
}

fn to_channel(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

/// An 8-bit sRGB color, as stored in an image buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_linear(self) -> LinearRgb {
        LinearRgb {
            r: gamma_inv(self.r as f64 / 255.0),
            g: gamma_inv(self.g as f64 / 255.0),
            b: gamma_inv(self.b as f64 / 255.0),
        }
    }

    pub fn to_lab(self) -> Lab {
        self.to_linear().to_xyz().to_lab()
    }

    /// Formats the color as `#rrggbb`.
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseRgbError {
    #[error("expected 6 hex digits, got {0:?}")]
    Length(String),
    #[error("expected only hex digits, got {0:?}")]
    Digit(String),
}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return Err(ParseRgbError::Length(s.to_owned()));
        }
        // `from_str_radix` alone would let a sign through.
        if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseRgbError::Digit(s.to_owned()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ParseRgbError::Digit(s.to_owned()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl From<Lab> for Rgb {
    fn from(lab: Lab) -> Self {
        lab.to_rgb()
    }
}

/// sRGB with the transfer curve removed. Components are nominally in `[0, 1]` but may leave that
/// range when coming back from an out-of-gamut [`Lab`] color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl LinearRgb {
    /// Re-applies the transfer curve, then rounds and clamps each channel into `0..=255`.
    pub fn to_rgb(self) -> Rgb {
        Rgb {
            r: to_channel(gamma(self.r)),
            g: to_channel(gamma(self.g)),
            b: to_channel(gamma(self.b)),
        }
    }

    #[allow(clippy::excessive_precision)]
    pub fn to_xyz(self) -> Xyz {
        Xyz {
            x: 0.4124564 * self.r + 0.3575761 * self.g + 0.1804375 * self.b,
            y: 0.2126729 * self.r + 0.7151522 * self.g + 0.0721750 * self.b,
            z: 0.0193339 * self.r + 0.1191920 * self.g + 0.9503041 * self.b,
        }
    }
}

/// CIE 1931 XYZ, relative to the D65 white point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    pub fn to_lab(self) -> Lab {
        let fx = lab_f(self.x / XN);
        let fy = lab_f(self.y / YN);
        let fz = lab_f(self.z / ZN);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    #[allow(clippy::excessive_precision)]
    pub fn to_linear(self) -> LinearRgb {
        LinearRgb {
            r: 3.2404542 * self.x - 1.5371385 * self.y - 0.4985314 * self.z,
            g: -0.9692660 * self.x + 1.8760108 * self.y + 0.0415560 * self.z,
            b: 0.0556434 * self.x - 0.2040259 * self.y + 1.0572252 * self.z,
        }
    }
}

/// CIE L*a*b*. `l` is lightness in `[0, 100]`, `a` runs green to red and `b` blue to yellow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub fn to_xyz(self) -> Xyz {
        let fy = (self.l + 16.0) / 116.0;
        let fx = self.a / 500.0 + fy;
        let fz = fy - self.b / 200.0;

        Xyz {
            x: XN * lab_f_inv(fx),
            y: YN * lab_f_inv(fy),
            z: ZN * lab_f_inv(fz),
        }
    }

    /// Converts back to 8-bit sRGB. Out-of-gamut colors are clamped, never rejected.
    pub fn to_rgb(self) -> Rgb {
        self.to_xyz().to_linear().to_rgb()
    }

    /// Hue angle in radians, in `[-π, π]`. Exactly `-π` comes out when `b` is `-0.0` and `a` is
    /// negative.
    pub fn hue(self) -> f64 {
        self.b.atan2(self.a)
    }

    pub fn distance_squared(self, other: Lab) -> f64 {
        let dl = other.l - self.l;
        let da = other.a - self.a;
        let db = other.b - self.b;
        dl * dl + da * da + db * db
    }
}

impl From<Rgb> for Lab {
    fn from(rgb: Rgb) -> Self {
        rgb.to_lab()
    }
}

#[cfg(test)]
mod tests {
    use nanorand::{Rng, WyRand};

    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 0.01, "{a} != {b}");
    }

    #[test]
    fn primaries_match_reference_values() {
        let red = Rgb::new(255, 0, 0).to_lab();
        assert_close(red.l, 53.241);
        assert_close(red.a, 80.092);
        assert_close(red.b, 67.203);

        let blue = Rgb::new(0, 0, 255).to_lab();
        assert_close(blue.l, 32.297);
        assert_close(blue.a, 79.188);
        assert_close(blue.b, -107.860);
    }

    #[test]
    fn black_and_white_hit_lightness_extremes() {
        let black = Rgb::new(0, 0, 0).to_lab();
        assert_close(black.l, 0.0);
        let white = Rgb::new(255, 255, 255).to_lab();
        assert_close(white.l, 100.0);
        assert!(white.a.abs() < 0.01 && white.b.abs() < 0.01);
    }

    #[test]
    fn grays_round_trip_exactly() {
        for v in 0..=255 {
            let gray = Rgb::new(v, v, v);
            assert_eq!(gray.to_lab().to_rgb(), gray);
        }
    }

    #[test]
    fn colors_round_trip_within_one_step() {
        let mut rng = WyRand::new_seed(2137);
        for _ in 0..20_000 {
            let color = Rgb::new(rng.generate(), rng.generate(), rng.generate());
            let back = color.to_lab().to_rgb();
            for (x, y) in color.to_array().into_iter().zip(back.to_array()) {
                assert!(x.abs_diff(y) <= 1, "{color} came back as {back}");
            }
        }
    }

    #[test]
    fn out_of_gamut_is_clamped() {
        let lab = Lab {
            l: 50.0,
            a: 400.0,
            b: -400.0,
        };
        assert_eq!(lab.to_rgb(), Rgb::new(0, 0, 255));

        let too_bright = Lab {
            l: 150.0,
            a: 0.0,
            b: 0.0,
        };
        assert_eq!(too_bright.to_rgb(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn distance_is_sum_of_squares() {
        let a = Lab {
            l: 1.0,
            a: 2.0,
            b: 3.0,
        };
        let b = Lab {
            l: 4.0,
            a: 6.0,
            b: 3.0,
        };
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance_squared(a), 0.0);
    }

    #[test]
    fn hex_formatting_and_parsing() {
        let color = Rgb::new(255, 8, 0);
        assert_eq!(color.to_hex(), "#ff0800");
        assert_eq!("#ff0800".parse::<Rgb>().unwrap(), color);
        assert_eq!("FF0800".parse::<Rgb>().unwrap(), color);
        assert!("#ff08".parse::<Rgb>().is_err());
        assert!(matches!(
            "#gg0800".parse::<Rgb>(),
            Err(ParseRgbError::Digit(_))
        ));
        assert!(matches!(
            "#+f+f+f".parse::<Rgb>(),
            Err(ParseRgbError::Digit(_))
        ));
        assert!(matches!(
            "-f0800".parse::<Rgb>(),
            Err(ParseRgbError::Digit(_))
        ));
        assert!(matches!(
            "#ff08é".parse::<Rgb>(),
            Err(ParseRgbError::Digit(_))
        ));
    }

    #[test]
    fn negative_zero_b_gives_minus_pi() {
        let lab = Lab {
            l: 60.0,
            a: -30.0,
            b: -0.0,
        };
        assert_eq!(lab.hue(), -std::f64::consts::PI);
    }
}

//! Classification of Lab colors into fixed perceptual buckets.
//!
//! Buckets are fixed regions of (lightness, hue angle) space rather than centroids found from the
//! image, so the same color always lands in the same bucket regardless of what else is in the
//! picture.

use std::{f64::consts::PI, fmt};

use rayon::prelude::*;
use serde::Serialize;

use crate::{colorspace::Lab, image::Image};

/// Colors whose `a` and `b` both lie within this distance of zero are achromatic.
const ACHROMATIC_CHROMA: f64 = 20.0;
const BLACK_BELOW: f64 = 20.0;
const WHITE_ABOVE: f64 = 80.0;
/// Lightness splitting the dark hue wheel from the light one.
const DARK_BELOW: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    Black,
    Gray,
    White,
    Brown,
    DarkRed,
    DarkPurple,
    DarkAqua,
    LightGreen,
    DarkGreen,
    Red,
    Pink,
    Orange,
    Yellow,
    Cyan,
    DarkBlue,
}

impl Bucket {
    pub const COUNT: usize = 15;

    /// Every bucket, in palette order.
    pub const ALL: [Bucket; Self::COUNT] = [
        Bucket::Black,
        Bucket::Gray,
        Bucket::White,
        Bucket::Brown,
        Bucket::DarkRed,
        Bucket::DarkPurple,
        Bucket::DarkAqua,
        Bucket::LightGreen,
        Bucket::DarkGreen,
        Bucket::Red,
        Bucket::Pink,
        Bucket::Orange,
        Bucket::Yellow,
        Bucket::Cyan,
        Bucket::DarkBlue,
    ];

    /// Position of this bucket within [`Bucket::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Bucket::Black => "black",
            Bucket::Gray => "gray",
            Bucket::White => "white",
            Bucket::Brown => "brown",
            Bucket::DarkRed => "dark-red",
            Bucket::DarkPurple => "dark-purple",
            Bucket::DarkAqua => "dark-aqua",
            Bucket::LightGreen => "light-green",
            Bucket::DarkGreen => "dark-green",
            Bucket::Red => "red",
            Bucket::Pink => "pink",
            Bucket::Orange => "orange",
            Bucket::Yellow => "yellow",
            Bucket::Cyan => "cyan",
            Bucket::DarkBlue => "dark-blue",
        }
    }

    /// Assigns a color to its bucket.
    pub fn classify(color: Lab) -> Bucket {
        let achromatic = -ACHROMATIC_CHROMA..=ACHROMATIC_CHROMA;
        if achromatic.contains(&color.a) && achromatic.contains(&color.b) {
            return if color.l < BLACK_BELOW {
                Bucket::Black
            } else if color.l > WHITE_ABOVE {
                Bucket::White
            } else {
                Bucket::Gray
            };
        }

        let hue = color.hue();
        if color.l < DARK_BELOW {
            classify_dark_hue(hue)
        } else {
            classify_light_hue(hue)
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Hue bands are tested in order and the first match wins. A hue of exactly -π is treated like +π
// and lands in the green band that wraps around the negative axis.

fn classify_dark_hue(hue: f64) -> Bucket {
    if hue > 3.0 * PI / 4.0 || hue < -3.0 * PI / 4.0 {
        Bucket::DarkGreen
    } else if hue < -PI / 4.0 {
        Bucket::Brown
    } else if hue < PI / 4.0 {
        Bucket::DarkRed
    } else if hue < 4.0 * PI / 7.0 {
        Bucket::DarkPurple
    } else if hue < 3.0 * PI / 5.0 {
        Bucket::DarkBlue
    } else {
        Bucket::DarkAqua
    }
}

fn classify_light_hue(hue: f64) -> Bucket {
    let in_band = |from: f64, to: f64| hue >= from && hue < to;

    if hue >= 3.0 * PI / 4.0 || hue < -3.0 * PI / 5.0 {
        Bucket::LightGreen
    } else if in_band(-3.0 * PI / 5.0, -3.0 * PI / 7.0) {
        Bucket::Yellow
    } else if in_band(-3.0 * PI / 7.0, 3.0 * PI / 10.0) {
        Bucket::Orange
    } else if in_band(3.0 * PI / 10.0, PI / 8.0) {
        // The lower edge sits above the upper one, so this band is empty and light reds are
        // claimed by orange and pink.
        Bucket::Red
    } else if in_band(PI / 8.0, 2.0 * PI / 5.0) {
        Bucket::Pink
    } else if in_band(2.0 * PI / 5.0, 3.0 * PI / 4.0) {
        Bucket::Cyan
    } else {
        // Only reachable for a NaN hue.
        Bucket::LightGreen
    }
}

/// The cells assigned to each bucket, as `(x, y)` coordinates in row-major order.
#[derive(Debug, Clone, Default)]
pub struct Membership {
    members: [Vec<(usize, usize)>; Bucket::COUNT],
}

impl Membership {
    pub fn classify(image: &Image<Lab>) -> Self {
        let buckets: Vec<Bucket> = image
            .pixels
            .par_iter()
            .map(|&color| Bucket::classify(color))
            .collect();

        let mut membership = Self::default();
        for (index, bucket) in buckets.into_iter().enumerate() {
            membership.members[bucket.index()].push(image.position(index));
        }
        membership
    }

    pub fn members(&self, bucket: Bucket) -> &[(usize, usize)] {
        &self.members[bucket.index()]
    }

    /// Iterates over buckets that have at least one member, in palette order.
    pub fn occupied(&self) -> impl Iterator<Item = (Bucket, &[(usize, usize)])> + '_ {
        Bucket::ALL
            .into_iter()
            .map(|bucket| (bucket, self.members(bucket)))
            .filter(|(_, members)| !members.is_empty())
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }
}

#[cfg(test)]
mod tests {
    use nanorand::{Rng, WyRand};

    use super::*;
    use crate::colorspace::Rgb;

    /// A color of the given lightness whose hue is `angle`, with enough chroma to not be gray.
    fn at_angle(l: f64, angle: f64) -> Lab {
        Lab {
            l,
            a: 60.0 * angle.cos(),
            b: 60.0 * angle.sin(),
        }
    }

    #[test]
    fn all_is_in_index_order() {
        for (index, bucket) in Bucket::ALL.into_iter().enumerate() {
            assert_eq!(bucket.index(), index);
        }
    }

    #[test]
    fn names_are_kebab_case() {
        assert_eq!(Bucket::DarkPurple.name(), "dark-purple");
        assert_eq!(Bucket::LightGreen.to_string(), "light-green");
    }

    #[test]
    fn achromatic_by_lightness() {
        let gray = |l| Lab { l, a: 20.0, b: -20.0 };
        assert_eq!(Bucket::classify(gray(0.0)), Bucket::Black);
        assert_eq!(Bucket::classify(gray(19.9)), Bucket::Black);
        assert_eq!(Bucket::classify(gray(20.0)), Bucket::Gray);
        assert_eq!(Bucket::classify(gray(80.0)), Bucket::Gray);
        assert_eq!(Bucket::classify(gray(80.1)), Bucket::White);
        assert_eq!(Bucket::classify(gray(100.0)), Bucket::White);
    }

    #[test]
    fn chroma_on_one_axis_is_enough() {
        let color = Lab {
            l: 10.0,
            a: 20.5,
            b: 0.0,
        };
        assert_eq!(Bucket::classify(color), Bucket::DarkRed);
    }

    #[test]
    fn dark_band_edges() {
        let dark = classify_dark_hue;
        assert_eq!(dark(PI), Bucket::DarkGreen);
        assert_eq!(dark(-PI), Bucket::DarkGreen);
        assert_eq!(dark(3.0 * PI / 4.0), Bucket::DarkAqua);
        assert_eq!(dark(-3.0 * PI / 4.0), Bucket::Brown);
        assert_eq!(dark(-PI / 4.0), Bucket::DarkRed);
        assert_eq!(dark(0.0), Bucket::DarkRed);
        assert_eq!(dark(PI / 4.0), Bucket::DarkPurple);
        assert_eq!(dark(4.0 * PI / 7.0), Bucket::DarkBlue);
        assert_eq!(dark(3.0 * PI / 5.0), Bucket::DarkAqua);
    }

    #[test]
    fn light_band_edges() {
        let light = classify_light_hue;
        assert_eq!(light(PI), Bucket::LightGreen);
        assert_eq!(light(-PI), Bucket::LightGreen);
        assert_eq!(light(3.0 * PI / 4.0), Bucket::LightGreen);
        assert_eq!(light(-3.0 * PI / 5.0), Bucket::Yellow);
        assert_eq!(light(-3.0 * PI / 7.0), Bucket::Orange);
        assert_eq!(light(0.0), Bucket::Orange);
        assert_eq!(light(PI / 8.0), Bucket::Orange);
        assert_eq!(light(3.0 * PI / 10.0), Bucket::Pink);
        assert_eq!(light(2.0 * PI / 5.0), Bucket::Cyan);
        assert_eq!(light(f64::NAN), Bucket::LightGreen);
    }

    #[test]
    fn light_red_band_is_never_hit() {
        let steps = 10_000;
        for i in 0..=steps {
            let angle = -PI + 2.0 * PI * i as f64 / steps as f64;
            assert_ne!(classify_light_hue(angle), Bucket::Red);
        }
    }

    #[test]
    fn lightness_picks_the_wheel() {
        assert_eq!(Bucket::classify(at_angle(49.9, 0.0)), Bucket::DarkRed);
        assert_eq!(Bucket::classify(at_angle(50.0, 0.0)), Bucket::Orange);
    }

    #[test]
    fn reference_colors() {
        let classify = |r, g, b| Bucket::classify(Rgb::new(r, g, b).to_lab());
        assert_eq!(classify(0, 0, 0), Bucket::Black);
        assert_eq!(classify(128, 128, 128), Bucket::Gray);
        assert_eq!(classify(255, 255, 255), Bucket::White);
        assert_eq!(classify(255, 0, 0), Bucket::Orange);
        assert_eq!(classify(128, 0, 0), Bucket::DarkRed);
        assert_eq!(classify(0, 255, 0), Bucket::LightGreen);
        assert_eq!(classify(0, 0, 255), Bucket::Brown);
        assert_eq!(classify(255, 255, 0), Bucket::Cyan);
    }

    #[test]
    fn every_color_gets_a_bucket() {
        let mut rng = WyRand::new_seed(2137);
        for _ in 0..20_000 {
            let color = Lab {
                l: rng.generate_range(0_u32..=100) as f64,
                a: rng.generate_range(0_u32..=1000) as f64 - 500.0,
                b: rng.generate_range(0_u32..=1000) as f64 - 500.0,
            };
            assert!(Bucket::ALL.contains(&Bucket::classify(color)));
        }
    }

    #[test]
    fn membership_groups_coordinates() {
        let black = Rgb::new(0, 0, 0).to_lab();
        let white = Rgb::new(255, 255, 255).to_lab();
        let image = Image::from_fn(3, 2, |x, _| if x == 1 { white } else { black });

        let membership = Membership::classify(&image);
        assert_eq!(
            membership.members(Bucket::Black),
            &[(0, 0), (2, 0), (0, 1), (2, 1)]
        );
        assert_eq!(membership.members(Bucket::White), &[(1, 0), (1, 1)]);
        assert!(membership.members(Bucket::Gray).is_empty());
        assert_eq!(membership.occupied_count(), 2);

        let order: Vec<_> = membership.occupied().map(|(bucket, _)| bucket).collect();
        assert_eq!(order, [Bucket::Black, Bucket::White]);
    }
}

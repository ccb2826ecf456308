//! Per-bucket averaging and palette extraction.

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    bucket::{Bucket, Membership},
    colorspace::{Lab, Rgb},
    image::Image,
};

/// One palette entry: the mean color of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub bucket: Bucket,
    pub color: Rgb,
}

/// The colors of a quantized image, one per occupied bucket, in [`Bucket::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Palette {
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Swatch> {
        self.swatches.iter()
    }

    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.swatches.iter().map(|swatch| swatch.color)
    }

    pub fn get(&self, bucket: Bucket) -> Option<Rgb> {
        self.swatches
            .iter()
            .find(|swatch| swatch.bucket == bucket)
            .map(|swatch| swatch.color)
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.colors().map(Rgb::to_hex).collect()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Swatch;
    type IntoIter = std::slice::Iter<'a, Swatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Arithmetic mean of the colors at `members`. Sums run in member order so the result does not
/// depend on how buckets are scheduled.
fn mean(image: &Image<Lab>, members: &[(usize, usize)]) -> Lab {
    let [l, a, b] = members
        .iter()
        .map(|&position| image[position])
        .fold([0.0; 3], |[l, a, b], color| {
            [l + color.l, a + color.a, b + color.b]
        });
    let count = members.len() as f64;
    Lab {
        l: l / count,
        a: a / count,
        b: b / count,
    }
}

/// Replaces every pixel with the mean of its bucket and collects those means into a palette.
///
/// The input image is left untouched; the averaged copy is returned alongside the palette.
pub fn reduce(image: &Image<Lab>, membership: &Membership) -> (Image<Lab>, Palette) {
    let means: Vec<(Bucket, Lab)> = Bucket::ALL
        .par_iter()
        .filter_map(|&bucket| {
            let members = membership.members(bucket);
            (!members.is_empty()).then(|| (bucket, mean(image, members)))
        })
        .collect();

    let mut averaged = image.clone();
    for &(bucket, mean) in &means {
        tracing::trace!(%bucket, members = membership.members(bucket).len(), ?mean);
        for &position in membership.members(bucket) {
            averaged[position] = mean;
        }
    }

    let palette = Palette {
        swatches: means
            .into_iter()
            .map(|(bucket, mean)| Swatch {
                bucket,
                color: mean.to_rgb(),
            })
            .collect(),
    };

    (averaged, palette)
}

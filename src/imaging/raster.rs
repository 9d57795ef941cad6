//! Packed black/white raster used for every figure comparison
//!
//! Figures are binarized on load: a pixel is either ink (black) or
//! background (white). Pixels are stored row-major in a bit vector so that
//! set operations and counts stay cheap during transform search.

use bitvec::prelude::*;
use image::{DynamicImage, GrayImage, Luma};
use std::borrow::Cow;
use std::fmt;

/// Binary figure image with row-major bit storage (1 = black)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryImage {
    width: usize,
    height: usize,
    bits: BitVec,
}

impl BinaryImage {
    /// Create an all-white image
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: bitvec![0; width * height],
        }
    }

    /// Create an image by evaluating `is_black(x, y)` for every pixel
    pub fn from_fn<F>(width: usize, height: usize, mut is_black: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut bits = BitVec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                bits.push(is_black(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Build an image from text rows where `#` marks a black pixel
    ///
    /// Rows shorter than the longest row are padded with white.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        Self::from_fn(width, rows.len(), |x, y| {
            rows.get(y)
                .and_then(|row| row.chars().nth(x))
                .is_some_and(|c| c == '#')
        })
    }

    /// Binarize a grayscale image
    pub fn from_luma(image: &GrayImage, threshold: u8) -> Self {
        Self::from_fn(image.width() as usize, image.height() as usize, |x, y| {
            image
                .get_pixel_checked(x as u32, y as u32)
                .is_some_and(|pixel| pixel.0[0] < threshold)
        })
    }

    /// Binarize a decoded image, treating fully transparent pixels as white
    pub fn from_dynamic(image: &DynamicImage, threshold: u8) -> Self {
        let rgba = image.to_rgba8();
        Self::from_fn(rgba.width() as usize, rgba.height() as usize, |x, y| {
            rgba.get_pixel_checked(x as u32, y as u32)
                .is_some_and(|pixel| {
                    let [r, g, b, a] = pixel.0;
                    if a == 0 {
                        return false;
                    }
                    let luma =
                        (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
                    luma < u32::from(threshold)
                })
        })
    }

    /// Render as a grayscale image (black = 0, white = 255)
    pub fn to_luma(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            if self.is_black(x as usize, y as usize) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }

    /// Image width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Image dimensions as (width, height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of pixels
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of black pixels
    pub fn black_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Share of the image that is black, in percent
    pub fn black_percent(&self) -> f64 {
        if self.pixel_count() == 0 {
            return 0.0;
        }
        self.black_count() as f64 * 100.0 / self.pixel_count() as f64
    }

    /// Test a pixel; out-of-bounds coordinates read as white
    pub fn is_black(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits.get(y * self.width + x).as_deref() == Some(&true)
    }

    /// Set a pixel; out-of-bounds coordinates are ignored
    pub fn set(&mut self, x: usize, y: usize, black: bool) {
        if x < self.width && y < self.height {
            self.bits.set(y * self.width + x, black);
        }
    }

    /// Coordinates of every black pixel in row-major order
    pub fn black_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.bits
            .iter_ones()
            .map(move |index| (index % width, index / width))
    }

    /// Raw pixel bits in row-major order
    pub fn bits(&self) -> &BitSlice {
        &self.bits
    }

    /// Nearest-neighbour resample to the given dimensions
    #[must_use]
    pub fn resampled(&self, width: usize, height: usize) -> Self {
        if (width, height) == self.dimensions() {
            return self.clone();
        }
        if self.width == 0 || self.height == 0 {
            return Self::blank(width, height);
        }
        Self::from_fn(width, height, |x, y| {
            self.is_black(x * self.width / width, y * self.height / height)
        })
    }

    /// Borrow `self` if it already matches `reference`, otherwise resample to it
    pub fn aligned_to(&self, reference: &Self) -> Cow<'_, Self> {
        if self.dimensions() == reference.dimensions() {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(self.resampled(reference.width, reference.height))
        }
    }

    /// Pixels black in either image
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let other = other.aligned_to(self);
        let mut bits = self.bits.clone();
        bits |= &other.bits;
        self.with_bits(bits)
    }

    /// Pixels black in both images
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let other = other.aligned_to(self);
        let mut bits = self.bits.clone();
        bits &= &other.bits;
        self.with_bits(bits)
    }

    /// Pixels black in `self` but not in `other`
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let other = other.aligned_to(self);
        let mut bits = !other.bits.clone();
        bits &= &self.bits;
        self.with_bits(bits)
    }

    fn with_bits(&self, bits: BitVec) -> Self {
        Self {
            width: self.width,
            height: self.height,
            bits,
        }
    }
}

impl fmt::Display for BinaryImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BinaryImage({}x{}, {} black)",
            self.width,
            self.height,
            self.black_count()
        )
    }
}

//! Pixel-level comparison primitives between binary figures
//!
//! Every comparison first aligns the second image to the first image's
//! dimensions, so rotated figures of non-square puzzles remain comparable.

use crate::imaging::raster::BinaryImage;
use ndarray::Array2;

/// Resample every image to the dimensions of the first one
pub fn normalize(images: &[BinaryImage]) -> Vec<BinaryImage> {
    let Some(reference) = images.first() else {
        return Vec::new();
    };
    images
        .iter()
        .map(|image| image.aligned_to(reference).into_owned())
        .collect()
}

/// Similarity of two images in `[0, 1]`, higher meaning more alike
///
/// The exact score is the intersection-over-union of black pixels. The
/// fuzzy score treats a black pixel as matched when the other image has a
/// black pixel within `fuzzy_radius` (Chebyshev distance), and divides the
/// matched pixels of both images by their combined black pixels. Two blank
/// images always score 1.0.
pub fn match_score(a: &BinaryImage, b: &BinaryImage, fuzzy: Option<usize>) -> f64 {
    let b = b.aligned_to(a);
    match fuzzy {
        None => intersection_over_union(a, &b),
        Some(radius) => fuzzy_overlap(a, &b, radius),
    }
}

/// Exact pixel equality, including dimensions
pub fn images_equal(a: &BinaryImage, b: &BinaryImage) -> bool {
    a == b
}

/// Black pixels gained going from `a` to `b`
pub fn pixel_count_delta(a: &BinaryImage, b: &BinaryImage) -> i64 {
    let b = b.aligned_to(a);
    b.black_count() as i64 - a.black_count() as i64
}

/// Share of `a`'s black pixels that are still black in `b`
///
/// A blank `a` yields 1.0 when `b` is also blank and 0.0 otherwise.
pub fn match_rate(a: &BinaryImage, b: &BinaryImage) -> f64 {
    let b = b.aligned_to(a);
    let own = a.black_count();
    if own == 0 {
        return if b.black_count() == 0 { 1.0 } else { 0.0 };
    }
    a.intersection(&b).black_count() as f64 / own as f64
}

fn intersection_over_union(a: &BinaryImage, b: &BinaryImage) -> f64 {
    let union = a.union(b).black_count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(b).black_count() as f64 / union as f64
}

fn fuzzy_overlap(a: &BinaryImage, b: &BinaryImage, radius: usize) -> f64 {
    let total = a.black_count() + b.black_count();
    if total == 0 {
        return 1.0;
    }

    let table_a = summed_area_table(a);
    let table_b = summed_area_table(b);

    let matched_a = a
        .black_pixels()
        .filter(|&(x, y)| window_count(&table_b, x, y, radius) > 0)
        .count();
    let matched_b = b
        .black_pixels()
        .filter(|&(x, y)| window_count(&table_a, x, y, radius) > 0)
        .count();

    (matched_a + matched_b) as f64 / total as f64
}

/// Cumulative black counts; entry `(y, x)` covers pixels `[0, x) × [0, y)`
fn summed_area_table(image: &BinaryImage) -> Array2<u32> {
    let (width, height) = image.dimensions();
    let mut table = Array2::<u32>::zeros((height + 1, width + 1));

    for y in 0..height {
        let mut row_sum = 0u32;
        for x in 0..width {
            row_sum += u32::from(image.is_black(x, y));
            let above = table.get((y, x + 1)).copied().unwrap_or(0);
            if let Some(cell) = table.get_mut((y + 1, x + 1)) {
                *cell = above + row_sum;
            }
        }
    }

    table
}

/// Black pixels in the square window of `radius` around `(x, y)`, clamped to the image
fn window_count(table: &Array2<u32>, x: usize, y: usize, radius: usize) -> u32 {
    let (rows, cols) = table.dim();
    let x0 = x.saturating_sub(radius);
    let y0 = y.saturating_sub(radius);
    let x1 = (x + radius + 1).min(cols.saturating_sub(1));
    let y1 = (y + radius + 1).min(rows.saturating_sub(1));
    if x0 >= x1 || y0 >= y1 {
        return 0;
    }

    let at = |row: usize, col: usize| table.get((row, col)).copied().unwrap_or(0);
    (at(y1, x1) + at(y0, x0)) - (at(y0, x1) + at(y1, x0))
}

//! Catalog of primitive figure operations, tagged with the search order they unlock at
//!
//! Lower orders are cheaper hypotheses and are tried first. All primitives of
//! one order are considered together before the search moves to the next.

use crate::imaging::BinaryImage;
use bitvec::prelude::*;
use std::collections::VecDeque;
use std::fmt;

/// Primitive operation mapping one figure to another
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StaticTransform {
    /// Mirror across the vertical axis (left becomes right)
    MirrorHorizontal,
    /// Mirror across the horizontal axis (top becomes bottom)
    MirrorVertical,
    /// Rotate a quarter turn clockwise
    Rotate90,
    /// Rotate a half turn
    Rotate180,
    /// Rotate three quarter turns clockwise
    Rotate270,
    /// Reflect across the main diagonal
    Transpose,
    /// Reflect across the anti-diagonal
    AntiTranspose,
    /// Paint every white region not connected to the border black
    Fill,
    /// Keep only black pixels that touch white or the border
    Hollow,
}

impl StaticTransform {
    /// Every primitive, in catalog order
    pub const ALL: [Self; 9] = [
        Self::MirrorHorizontal,
        Self::MirrorVertical,
        Self::Rotate90,
        Self::Rotate180,
        Self::Rotate270,
        Self::Transpose,
        Self::AntiTranspose,
        Self::Fill,
        Self::Hollow,
    ];

    /// Search depth at which this primitive is introduced
    pub const fn order(self) -> usize {
        match self {
            Self::MirrorHorizontal | Self::MirrorVertical => 0,
            Self::Rotate90 | Self::Rotate180 | Self::Rotate270 => 1,
            Self::Transpose | Self::AntiTranspose => 2,
            Self::Fill | Self::Hollow => 3,
        }
    }

    /// Short stable name used in logs
    pub const fn name(self) -> &'static str {
        match self {
            Self::MirrorHorizontal => "mirror-horizontal",
            Self::MirrorVertical => "mirror-vertical",
            Self::Rotate90 => "rotate-90",
            Self::Rotate180 => "rotate-180",
            Self::Rotate270 => "rotate-270",
            Self::Transpose => "transpose",
            Self::AntiTranspose => "anti-transpose",
            Self::Fill => "fill",
            Self::Hollow => "hollow",
        }
    }

    /// Apply the primitive, producing a new image
    ///
    /// Quarter turns and diagonal reflections swap width and height.
    pub fn apply(self, image: &BinaryImage) -> BinaryImage {
        let (w, h) = image.dimensions();
        match self {
            Self::MirrorHorizontal => {
                BinaryImage::from_fn(w, h, |x, y| image.is_black(w - 1 - x, y))
            }
            Self::MirrorVertical => {
                BinaryImage::from_fn(w, h, |x, y| image.is_black(x, h - 1 - y))
            }
            Self::Rotate90 => BinaryImage::from_fn(h, w, |x, y| image.is_black(y, h - 1 - x)),
            Self::Rotate180 => {
                BinaryImage::from_fn(w, h, |x, y| image.is_black(w - 1 - x, h - 1 - y))
            }
            Self::Rotate270 => BinaryImage::from_fn(h, w, |x, y| image.is_black(w - 1 - y, x)),
            Self::Transpose => BinaryImage::from_fn(h, w, |x, y| image.is_black(y, x)),
            Self::AntiTranspose => {
                BinaryImage::from_fn(h, w, |x, y| image.is_black(w - 1 - y, h - 1 - x))
            }
            Self::Fill => fill_enclosed(image),
            Self::Hollow => hollow(image),
        }
    }
}

impl fmt::Display for StaticTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered set of primitives available to the search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformCatalog {
    transforms: Vec<StaticTransform>,
}

impl Default for TransformCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TransformCatalog {
    /// Catalog containing every primitive
    pub fn standard() -> Self {
        Self::new(StaticTransform::ALL.to_vec())
    }

    /// Catalog restricted to the given primitives, kept in the given order
    pub const fn new(transforms: Vec<StaticTransform>) -> Self {
        Self { transforms }
    }

    /// All primitives in catalog order
    pub fn transforms(&self) -> &[StaticTransform] {
        &self.transforms
    }

    /// Primitives introduced at exactly `order`
    pub fn of_order(&self, order: usize) -> impl Iterator<Item = StaticTransform> + '_ {
        self.transforms
            .iter()
            .copied()
            .filter(move |transform| transform.order() == order)
    }

    /// Highest order in the catalog, bounding the iterative deepening
    pub fn max_order(&self) -> usize {
        self.transforms
            .iter()
            .map(|transform| transform.order())
            .max()
            .unwrap_or(0)
    }
}

fn fill_enclosed(image: &BinaryImage) -> BinaryImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return image.clone();
    }

    // White pixels reachable from the border through white
    let mut outside = bitvec![0; w * h];
    let mut queue = VecDeque::new();

    let visit = |x: usize, y: usize, outside: &mut BitVec, queue: &mut VecDeque<(usize, usize)>| {
        let index = y * w + x;
        if !image.is_black(x, y) && outside.get(index).as_deref() == Some(&false) {
            outside.set(index, true);
            queue.push_back((x, y));
        }
    };

    for x in 0..w {
        visit(x, 0, &mut outside, &mut queue);
        visit(x, h - 1, &mut outside, &mut queue);
    }
    for y in 0..h {
        visit(0, y, &mut outside, &mut queue);
        visit(w - 1, y, &mut outside, &mut queue);
    }

    while let Some((x, y)) = queue.pop_front() {
        if x > 0 {
            visit(x - 1, y, &mut outside, &mut queue);
        }
        if x + 1 < w {
            visit(x + 1, y, &mut outside, &mut queue);
        }
        if y > 0 {
            visit(x, y - 1, &mut outside, &mut queue);
        }
        if y + 1 < h {
            visit(x, y + 1, &mut outside, &mut queue);
        }
    }

    BinaryImage::from_fn(w, h, |x, y| {
        image.is_black(x, y) || outside.get(y * w + x).as_deref() != Some(&true)
    })
}

fn hollow(image: &BinaryImage) -> BinaryImage {
    let (w, h) = image.dimensions();
    BinaryImage::from_fn(w, h, |x, y| {
        image.is_black(x, y)
            && (x == 0
                || y == 0
                || x + 1 == w
                || y + 1 == h
                || !image.is_black(x - 1, y)
                || !image.is_black(x + 1, y)
                || !image.is_black(x, y - 1)
                || !image.is_black(x, y + 1))
    })
}

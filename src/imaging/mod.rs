//! Binary figure rasters and the pixel primitives the solver compares them with

/// Pixel comparison primitives (match scores, counts, normalization)
pub mod compare;
/// Packed black/white raster type
pub mod raster;

pub use raster::BinaryImage;

//! Figure loading and diagnostic image export

use crate::imaging::BinaryImage;
use crate::imaging::compare::normalize;
use crate::io::configuration::{BLACK_LUMA_THRESHOLD, PREDICTION_FRAME_DELAY_MS};
use crate::io::error::{Result, SolverError, file_system};
use crate::io::problem::Problem;
use crate::solver::orchestrator::PuzzleImages;
use image::{DynamicImage, Frame};
use std::path::Path;

/// Decode a figure file and binarize it
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_figure(path: &Path) -> Result<BinaryImage> {
    let decoded = image::open(path).map_err(|source| SolverError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BinaryImage::from_dynamic(&decoded, BLACK_LUMA_THRESHOLD))
}

/// Load every figure of a problem, resampled to a common size
///
/// Grid cells and answers are normalized together against the first grid cell.
///
/// # Errors
///
/// Returns an error if:
/// - A figure required by the problem shape is missing
/// - A figure cannot be decoded
pub fn load_puzzle(problem: &Problem) -> Result<PuzzleImages> {
    let shape = problem.shape();
    let keys: Vec<&str> = shape
        .grid_keys()
        .iter()
        .chain(shape.answer_keys())
        .copied()
        .collect();

    let raw = keys
        .iter()
        .map(|key| problem.figure(key).and_then(load_figure))
        .collect::<Result<Vec<_>>>()?;

    let mut images = normalize(&raw);
    let answers = images.split_off(shape.grid_keys().len().min(images.len()));
    PuzzleImages::new(problem.name(), shape, images, answers)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
    }
    Ok(())
}

/// Save a binary image as a black-on-white PNG
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image cannot be saved
pub fn export_binary_png(image: &BinaryImage, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    image
        .to_luma()
        .save(path)
        .map_err(|source| SolverError::ImageExport {
            path: path.to_path_buf(),
            source,
        })
}

/// Save a sequence of binary images as an animated GIF
///
/// # Errors
///
/// Returns an error if:
/// - No frames are given
/// - File system operations fail
/// - GIF encoding fails
pub fn export_predictions_gif(frames: &[BinaryImage], path: &Path, delay_ms: u32) -> Result<()> {
    if frames.is_empty() {
        return Err(crate::io::error::invalid_parameter(
            "frames",
            &0,
            &"at least one frame is required",
        ));
    }

    let encoded: Vec<Frame> = frames
        .iter()
        .map(|frame| {
            let rgba = DynamicImage::ImageLuma8(frame.to_luma()).to_rgba8();
            Frame::from_parts(
                rgba,
                0,
                0,
                image::Delay::from_numer_denom_ms(delay_ms, 1),
            )
        })
        .collect();

    ensure_parent(path)?;
    let file = std::fs::File::create(path).map_err(file_system(path, "create file"))?;

    let mut encoder = image::codecs::gif::GifEncoder::new(file);
    encoder
        .encode_frames(encoded)
        .map_err(|source| SolverError::ImageExport {
            path: path.to_path_buf(),
            source,
        })
}

/// Write the diagnostics of a solving attempt into `dir`
///
/// Produces `start.png`, one `solution_<n>.png` per prediction and
/// `predictions.gif` cycling through the predictions.
///
/// # Errors
///
/// Returns an error if any file cannot be written
pub fn export_attempt(dir: &Path, start: &BinaryImage, predictions: &[BinaryImage]) -> Result<()> {
    export_binary_png(start, &dir.join("start.png"))?;
    for (index, prediction) in predictions.iter().enumerate() {
        export_binary_png(prediction, &dir.join(format!("solution_{}.png", index + 1)))?;
    }
    if !predictions.is_empty() {
        export_predictions_gif(
            predictions,
            &dir.join("predictions.gif"),
            PREDICTION_FRAME_DELAY_MS,
        )?;
    }
    tracing::debug!(
        dir = %dir.display(),
        predictions = predictions.len(),
        "exported attempt diagnostics"
    );
    Ok(())
}

//! Problem loading, figure I/O, configuration, errors and the command-line front end

/// Batch command-line interface
pub mod cli;
/// Constants and runtime solver settings
pub mod configuration;
/// Error type and helpers
pub mod error;
/// Figure decoding and diagnostic export
pub mod image;
/// Problem descriptions and directory layout
pub mod problem;
/// Progress display for problem batches
pub mod progress;

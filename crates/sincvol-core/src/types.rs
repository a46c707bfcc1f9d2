//! Core types for the volumetric sinc pipeline
//!
//! Defines the single-precision complex voxel used throughout the grid,
//! plus the error type shared by every stage. All cell data is stored as
//! interleaved `f32` real/imaginary pairs, matching the wire layout of the
//! raster pipeline.

use num_complex::Complex32;

/// A single complex-valued grid cell (single precision).
pub type Voxel = Complex32;

/// Result type for volume pipeline operations.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Errors that can occur in the volume pipeline.
///
/// Every variant is fatal: the pipeline has no retry or degraded path,
/// so callers surface these to the top level and abort.
#[derive(Debug, thiserror::Error)]
pub enum VolumeError {
    #[error("invalid grid dimensions {nx}x{ny}x{nz}: {reason}")]
    InvalidDimensions {
        nx: usize,
        ny: usize,
        nz: usize,
        reason: String,
    },

    #[error("slice depth {z0} out of range for grid depth {nz}")]
    SliceOutOfRange { z0: usize, nz: usize },

    #[error("transform planned for {planned:?} but grid is {grid:?}")]
    PlanMismatch {
        planned: (usize, usize, usize),
        grid: (usize, usize, usize),
    },

    #[error("raster has {actual} pixels, expected {expected}")]
    RasterSizeMismatch { expected: usize, actual: usize },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

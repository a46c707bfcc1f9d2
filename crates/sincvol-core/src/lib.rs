//! # sincvol-core
//!
//! Volumetric numerical-kernel demo: synthesize a Hamming-windowed,
//! checkerboard-sign-modulated sinc on a dense complex 256³ grid, run an
//! in-place forward 3D FFT over it, and render one constant-depth slice as
//! a normalized 8-bit PGM raster.
//!
//! ## Signal Flow
//!
//! ```text
//! SincKernel ──fill──▶ VolumeGrid ──forward──▶ VolumeGrid (spectrum)
//!                                                   │
//!                                   render_slice ◀──┘
//!                                        │
//!                                   write_pgm ──▶ o.pgm
//! ```
//!
//! The checkerboard sign pre-shifts the spectrum so the transform's zero
//! frequency lands at the grid midpoint, which makes the rendered slice a
//! centered view of the kernel's spherical-shell spectrum.
//!
//! ## Example
//!
//! ```rust
//! use sincvol_core::{render_slice, SincKernel, SoftwareFft, VolumeGrid, VolumeTransform};
//!
//! let n = 8;
//! let mut grid = VolumeGrid::new(n, n, n).unwrap();
//! SincKernel::new(1.0).fill(&mut grid);
//! SoftwareFft::new(n, n, n).forward(&mut grid).unwrap();
//!
//! let raster = render_slice(&grid, n / 2, 0.0).unwrap();
//! assert_eq!(raster.len(), n * n);
//! ```

pub mod config;
pub mod fft_volume;
pub mod logging;
pub mod pgm_sink;
pub mod pipeline;
pub mod sinc_kernel;
pub mod slice_render;
pub mod types;
pub mod volume;

pub use config::PipelineConfig;
pub use fft_volume::{SoftwareFft, VolumeTransform};
pub use pipeline::{run, PipelineReport};
pub use sinc_kernel::SincKernel;
pub use slice_render::render_slice;
pub use types::{Voxel, VolumeError, VolumeResult};
pub use volume::VolumeGrid;

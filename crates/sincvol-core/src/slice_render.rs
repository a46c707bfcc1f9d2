//! Slice Renderer — constant-depth cross-section to 8-bit intensity
//!
//! Extracts the z = z0 plane of a (transformed) [`VolumeGrid`] and tone-maps
//! it to one byte per pixel, in `x + y*nx` order, ready for a PGM header.
//!
//! Two mutually exclusive modes, selected by `scale`:
//!
//! - **Magnitude mode** (`scale == 0`): per-cell complex magnitude,
//!   auto-ranged linearly so the slice minimum maps to 0 and the maximum
//!   to 255, truncating to integers. A flat slice (max == min) renders as
//!   all zeros rather than dividing by zero.
//! - **Scaled-real mode** (`scale != 0`): `scale · sign · re` clamped to
//!   [0, 255] and truncated, where `sign` is the generator's checkerboard
//!   rule with the depth fixed at z0. Visualizes raw sign-corrected field
//!   values at an analyst-chosen gain instead of an auto-ranged magnitude.

use crate::sinc_kernel::checker_sign;
use crate::types::{VolumeError, VolumeResult};
use crate::volume::VolumeGrid;

/// Render the z = z0 slice of `grid` as `nx*ny` intensity bytes.
///
/// Never panics for a valid grid; the only failure is `z0` out of range,
/// which is caught before any work is done.
pub fn render_slice(grid: &VolumeGrid, z0: usize, scale: f32) -> VolumeResult<Vec<u8>> {
    let (_, _, nz) = grid.dims();
    if z0 >= nz {
        return Err(VolumeError::SliceOutOfRange { z0, nz });
    }

    if scale == 0.0 {
        Ok(render_magnitude(grid, z0))
    } else {
        Ok(render_scaled_real(grid, z0, scale))
    }
}

fn render_magnitude(grid: &VolumeGrid, z0: usize) -> Vec<u8> {
    let (nx, ny, _) = grid.dims();

    let mut magnitudes = vec![0.0f32; nx * ny];
    for y in 0..ny {
        for x in 0..nx {
            magnitudes[x + y * nx] = grid.voxel(x, y, z0).norm();
        }
    }

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &m in &magnitudes {
        min = min.min(m);
        max = max.max(m);
    }

    let mut raster = vec![0u8; nx * ny];
    if max > min {
        let range = max - min;
        for (byte, &m) in raster.iter_mut().zip(&magnitudes) {
            *byte = (255.0 * (m - min) / range) as u8;
        }
    }
    // max == min: flat slice stays all zeros.
    raster
}

fn render_scaled_real(grid: &VolumeGrid, z0: usize, scale: f32) -> Vec<u8> {
    let (nx, ny, _) = grid.dims();

    let mut raster = vec![0u8; nx * ny];
    for y in 0..ny {
        for x in 0..nx {
            let sign = checker_sign(x + y + z0);
            let value = scale * sign * grid.voxel(x, y, z0).re;
            raster[x + y * nx] = (value as i32).clamp(0, 255) as u8;
        }
    }
    raster
}

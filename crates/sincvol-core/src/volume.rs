//! Volume Grid — dense 3D complex buffer with a fixed linearization
//!
//! Owns the lattice every pipeline stage reads or writes (a 256³ cube in
//! the canonical run; the layer itself is per-axis general). The linear
//! index of cell (x, y, z) is `z + y*nz + x*nz*ny`, so z is the contiguous
//! axis. That ordering is part of the slice-extraction contract and must
//! not change.
//!
//! ```text
//!   data[idx]            idx = z + y*nz + x*nz*ny
//!   ┌──────────────┐
//!   │ x = 0 plane  │  ny*nz cells, z fastest
//!   ├──────────────┤
//!   │ x = 1 plane  │
//!   ├──────────────┤
//!   │     ...      │
//!   └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sincvol_core::volume::VolumeGrid;
//! use sincvol_core::types::Voxel;
//!
//! let mut grid = VolumeGrid::new(4, 4, 4).unwrap();
//! grid.set_voxel(1, 2, 3, Voxel::new(1.0, -1.0));
//! assert_eq!(grid.index(1, 2, 3), 3 + 2 * 4 + 1 * 16);
//! assert_eq!(grid.voxel(1, 2, 3), Voxel::new(1.0, -1.0));
//! ```

use std::fmt;

use crate::types::{Voxel, VolumeError, VolumeResult};

/// Dense 3D complex grid, allocated once and owned for the pipeline's
/// whole lifetime.
pub struct VolumeGrid {
    nx: usize,
    ny: usize,
    nz: usize,
    data: Vec<Voxel>,
}

impl fmt::Debug for VolumeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeGrid")
            .field("nx", &self.nx)
            .field("ny", &self.ny)
            .field("nz", &self.nz)
            .finish()
    }
}

impl VolumeGrid {
    /// Allocate a zero-initialized grid of `nx*ny*nz` cells.
    ///
    /// Fails on zero dimensions or a cell count that overflows `usize`.
    pub fn new(nx: usize, ny: usize, nz: usize) -> VolumeResult<Self> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(VolumeError::InvalidDimensions {
                nx,
                ny,
                nz,
                reason: "all dimensions must be positive".to_string(),
            });
        }
        let cells = nx
            .checked_mul(ny)
            .and_then(|xy| xy.checked_mul(nz))
            .ok_or_else(|| VolumeError::InvalidDimensions {
                nx,
                ny,
                nz,
                reason: "cell count overflows usize".to_string(),
            })?;

        Ok(Self {
            nx,
            ny,
            nz,
            data: vec![Voxel::new(0.0, 0.0); cells],
        })
    }

    /// Grid dimensions as (nx, ny, nz).
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Linear index of cell (x, y, z): `z + y*nz + x*nz*ny`.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        z + y * self.nz + x * self.nz * self.ny
    }

    /// Read one cell.
    #[inline]
    pub fn voxel(&self, x: usize, y: usize, z: usize) -> Voxel {
        self.data[self.index(x, y, z)]
    }

    /// Write one cell.
    #[inline]
    pub fn set_voxel(&mut self, x: usize, y: usize, z: usize, value: Voxel) {
        let idx = self.index(x, y, z);
        self.data[idx] = value;
    }

    /// The whole buffer in linearization order.
    pub fn as_slice(&self) -> &[Voxel] {
        &self.data
    }

    /// Mutable view of the whole buffer in linearization order.
    pub fn as_mut_slice(&mut self) -> &mut [Voxel] {
        &mut self.data
    }

    /// Total energy: sum of squared magnitudes over all cells.
    ///
    /// Accumulates in f64 so the 256³ canonical grid does not lose
    /// precision. Used as a Parseval-style regression oracle around the
    /// forward transform.
    pub fn total_energy(&self) -> f64 {
        self.data.iter().map(|v| v.norm_sqr() as f64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_is_zero_initialized() {
        let grid = VolumeGrid::new(3, 4, 5).unwrap();
        assert_eq!(grid.len(), 60);
        assert!(grid.as_slice().iter().all(|v| v.re == 0.0 && v.im == 0.0));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            VolumeGrid::new(0, 4, 4),
            Err(VolumeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            VolumeGrid::new(4, 4, 0),
            Err(VolumeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_overflowing_cell_count_rejected() {
        let huge = usize::MAX / 2;
        assert!(matches!(
            VolumeGrid::new(huge, huge, 2),
            Err(VolumeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_linearization_is_z_fastest() {
        let grid = VolumeGrid::new(2, 3, 4).unwrap();
        let (nx, ny, nz) = grid.dims();

        // Walking x, then y, then z innermost must visit cells in linear
        // order exactly once.
        let mut expected = 0;
        for x in 0..nx {
            for y in 0..ny {
                for z in 0..nz {
                    assert_eq!(grid.index(x, y, z), expected);
                    expected += 1;
                }
            }
        }
        assert_eq!(expected, grid.len());
    }

    #[test]
    fn test_voxel_round_trip() {
        let mut grid = VolumeGrid::new(4, 4, 4).unwrap();
        grid.set_voxel(3, 1, 2, Voxel::new(0.5, -2.0));
        assert_eq!(grid.voxel(3, 1, 2), Voxel::new(0.5, -2.0));
        assert_eq!(grid.as_slice()[2 + 4 + 3 * 16], Voxel::new(0.5, -2.0));
    }

    #[test]
    fn test_total_energy() {
        let mut grid = VolumeGrid::new(2, 2, 2).unwrap();
        grid.set_voxel(0, 0, 0, Voxel::new(3.0, 4.0)); // |v|² = 25
        grid.set_voxel(1, 1, 1, Voxel::new(1.0, 0.0)); // |v|² = 1
        assert_relative_eq!(grid.total_energy(), 26.0, epsilon = 1e-12);
    }
}

//! Pipeline — fill → transform → render → write, strictly in sequence
//!
//! Orchestrates one complete run. The grid is exclusively owned here for
//! its whole lifetime; each stage completes fully before the next reads,
//! so no locking is needed. Every failure is fatal and propagates to the
//! caller, which is expected to log it and terminate.

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::config::PipelineConfig;
use crate::fft_volume::{SoftwareFft, VolumeTransform};
use crate::pgm_sink::write_pgm;
use crate::sinc_kernel::SincKernel;
use crate::slice_render::render_slice;
use crate::types::VolumeResult;
use crate::volume::VolumeGrid;

/// Summary of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub dims: (usize, usize, usize),
    pub radius: f32,
    pub slice_depth: usize,
    /// Grid energy after the kernel fill
    pub signal_energy: f64,
    /// Grid energy after the forward transform
    pub spectrum_energy: f64,
    pub output: PathBuf,
    pub bytes_written: usize,
}

/// Run the full pipeline once with the given configuration.
///
/// The caller should have validated the configuration; the stages still
/// re-check the contracts they own (grid dimensions, slice depth range,
/// raster size) and fail with a typed error on violation.
pub fn run(config: &PipelineConfig) -> VolumeResult<PipelineReport> {
    let (nx, ny, nz) = (config.grid.nx, config.grid.ny, config.grid.nz);

    let mut grid = VolumeGrid::new(nx, ny, nz)?;
    info!(nx, ny, nz, cells = grid.len(), "allocated volume grid");

    let kernel = SincKernel::with_alpha(config.kernel.radius, config.kernel.window_alpha);
    let started = Instant::now();
    kernel.fill(&mut grid);
    let signal_energy = grid.total_energy();
    info!(
        radius = config.kernel.radius,
        elapsed_ms = started.elapsed().as_millis() as u64,
        energy = signal_energy,
        "filled windowed sinc kernel"
    );

    let mut engine = SoftwareFft::new(nx, ny, nz);
    let started = Instant::now();
    engine.forward(&mut grid)?;
    let spectrum_energy = grid.total_energy();
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        energy = spectrum_energy,
        "forward transform complete"
    );

    let slice_depth = config.slice_depth();
    let raster = render_slice(&grid, slice_depth, config.render.scale)?;
    write_pgm(&config.output, nx, ny, &raster)?;
    info!(
        path = %config.output.display(),
        width = nx,
        height = ny,
        slice_depth,
        scale = config.render.scale,
        "wrote raster"
    );

    Ok(PipelineReport {
        dims: (nx, ny, nz),
        radius: config.kernel.radius,
        slice_depth,
        signal_energy,
        spectrum_energy,
        output: config.output.clone(),
        bytes_written: raster.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridConfig, KernelConfig, RenderConfig};
    use crate::sinc_kernel::checker_sign;

    fn small_config(n: usize, scale: f32, file_tag: &str) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.grid = GridConfig {
            nx: n,
            ny: n,
            nz: n,
        };
        config.kernel = KernelConfig {
            radius: 1.0,
            window_alpha: 0.54,
        };
        config.render = RenderConfig {
            slice_depth: Some(n / 2),
            scale,
        };
        config.output = std::env::temp_dir().join(format!("sincvol_test_{}.pgm", file_tag));
        config
    }

    #[test]
    fn test_end_to_end_magnitude_mode_small_cube() {
        let config = small_config(4, 0.0, "e2e_mag");
        let report = run(&config).unwrap();

        assert_eq!(report.dims, (4, 4, 4));
        assert_eq!(report.slice_depth, 2);
        assert_eq!(report.bytes_written, 16);

        let bytes = std::fs::read(&config.output).unwrap();
        let header = b"P5\n4 4\n255\n";
        assert_eq!(&bytes[..header.len()], header);

        let raster = &bytes[header.len()..];
        assert_eq!(raster.len(), 16);
        // Auto-ranged slice with distinct magnitudes must span the byte
        // range exactly.
        assert!(raster.contains(&0));
        assert!(raster.contains(&255));

        std::fs::remove_file(&config.output).ok();
    }

    #[test]
    fn test_end_to_end_scaled_real_matches_renderer_formula() {
        let config = small_config(4, 10.0, "e2e_real");
        let report = run(&config).unwrap();

        // Re-derive the transformed grid independently and check every
        // byte against the scaled-real tone map.
        let mut grid = VolumeGrid::new(4, 4, 4).unwrap();
        SincKernel::with_alpha(1.0, 0.54).fill(&mut grid);
        SoftwareFft::new(4, 4, 4).forward(&mut grid).unwrap();

        let bytes = std::fs::read(&config.output).unwrap();
        let raster = &bytes[b"P5\n4 4\n255\n".len()..];
        let z0 = report.slice_depth;
        for y in 0..4 {
            for x in 0..4 {
                let value = 10.0 * checker_sign(x + y + z0) * grid.voxel(x, y, z0).re;
                let expected = (value as i32).clamp(0, 255) as u8;
                assert_eq!(raster[x + y * 4], expected, "pixel ({}, {})", x, y);
            }
        }

        std::fs::remove_file(&config.output).ok();
    }

    #[test]
    fn test_energy_scales_by_cell_count() {
        let config = small_config(4, 0.0, "e2e_energy");
        let report = run(&config).unwrap();

        let factor = 64.0;
        let relative =
            (report.spectrum_energy - factor * report.signal_energy).abs()
                / (factor * report.signal_energy);
        assert!(relative < 1e-4, "Parseval factor off by {:.2e}", relative);

        std::fs::remove_file(&config.output).ok();
    }

    #[test]
    fn test_unwritable_output_is_fatal() {
        let mut config = small_config(4, 0.0, "unused");
        config.output = PathBuf::from("/definitely/not/a/real/directory/o.pgm");
        assert!(run(&config).is_err());
    }
}

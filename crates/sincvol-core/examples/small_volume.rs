//! # Small Volume Example
//!
//! Runs the whole pipeline on an 8×8×8 grid and prints what each stage
//! produced. Useful for eyeballing the numbers without waiting on the
//! full 256³ canonical run.
//!
//! Run with: cargo run --example small_volume

use sincvol_core::{render_slice, SincKernel, SoftwareFft, VolumeGrid, VolumeTransform};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let n = 8;
    let radius = 1.0;

    let mut grid = VolumeGrid::new(n, n, n)?;
    SincKernel::new(radius).fill(&mut grid);

    println!("=== Windowed Sinc Volume ===");
    println!("Grid: {}x{}x{} ({} cells)", n, n, n, grid.len());
    println!("Radius: {}", radius);
    let signal_energy = grid.total_energy();
    println!("Signal energy: {:.6}", signal_energy);
    println!(
        "Center cell: {:.4} + {:.4}i",
        grid.voxel(n / 2, n / 2, n / 2).re,
        grid.voxel(n / 2, n / 2, n / 2).im
    );
    println!();

    SoftwareFft::new(n, n, n).forward(&mut grid)?;
    let spectrum_energy = grid.total_energy();
    println!("Spectrum energy: {:.6}", spectrum_energy);
    println!(
        "Energy ratio: {:.1} (expected {} for the unnormalized transform)",
        spectrum_energy / signal_energy,
        n * n * n
    );
    println!();

    let raster = render_slice(&grid, n / 2, 0.0)?;
    let min = raster.iter().min().unwrap();
    let max = raster.iter().max().unwrap();
    println!("Mid-depth slice, magnitude mode: {} bytes", raster.len());
    println!("Intensity range: [{}, {}]", min, max);

    println!();
    println!("Slice as a {}x{} intensity map:", n, n);
    for y in 0..n {
        for x in 0..n {
            print!("{:>4}", raster[x + y * n]);
        }
        println!();
    }

    Ok(())
}

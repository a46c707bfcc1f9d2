//! PGM Sink — binary P5 grayscale raster output
//!
//! Writes the rendered slice as a self-contained portable graymap: a
//! 3-line text header (`P5`, dimensions, maximum value 255) followed by
//! `width*height` raw bytes in `x + y*width` order.
//!
//! ## Example
//!
//! ```rust
//! use sincvol_core::pgm_sink::write_pgm;
//!
//! let tmp = std::env::temp_dir().join("sincvol_doc_example.pgm");
//! write_pgm(&tmp, 2, 2, &[0, 85, 170, 255]).unwrap();
//! let bytes = std::fs::read(&tmp).unwrap();
//! assert_eq!(&bytes[..9], b"P5\n2 2\n25");
//! std::fs::remove_file(&tmp).ok();
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::types::{VolumeError, VolumeResult};

/// Write `pixels` as a binary P5 graymap at `path` (truncates existing).
///
/// The pixel count must equal `width*height`; a mismatch is rejected
/// before anything is created on disk.
pub fn write_pgm(path: &Path, width: usize, height: usize, pixels: &[u8]) -> VolumeResult<()> {
    if pixels.len() != width * height {
        return Err(VolumeError::RasterSizeMismatch {
            expected: width * height,
            actual: pixels.len(),
        });
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write!(writer, "P5\n{} {}\n255\n", width, height)?;
    writer.write_all(pixels)?;
    writer.flush()?;
    Ok(())
}

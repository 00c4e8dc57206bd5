//! Image files in and out
//!
//! Input images of any format the `image` crate decodes are reduced to 8-bit
//! grayscale. Output images are encoded next to their final path and moved into place
//! only once fully written.

mod contrast;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, RgbImage};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::{HalftoneError, Result};

pub use contrast::{enhance_contrast, DEFAULT_CLIP_LIMIT, DEFAULT_TILES};

/// Decode `path` and convert it to 8-bit luma
pub fn load_grayscale(path: &Path) -> Result<GrayImage> {
    let decoded = image::open(path).map_err(|source| HalftoneError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    let gray = decoded.into_luma8();
    if gray.width() == 0 || gray.height() == 0 {
        return Err(HalftoneError::EmptyImage(path.to_path_buf()));
    }
    debug!(path = %path.display(), width = gray.width(), height = gray.height(), "image loaded");
    Ok(gray)
}

/// `out-<file name>` in the input's directory
pub fn output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("out-{name}"))
}

/// Encode `image` to `path`, choosing the format from the extension.
///
/// The data goes to a temporary file in the destination directory first, which is then
/// renamed over `path`; an interrupted run leaves no partial output behind.
pub fn save_rgb(path: &Path, image: &RgbImage) -> Result<()> {
    let encode_error = |source| HalftoneError::ImageEncode {
        path: path.to_path_buf(),
        source,
    };
    let format = ImageFormat::from_path(path).map_err(encode_error)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image.write_to(&mut writer, format).map_err(encode_error)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| HalftoneError::Io(e.error))?;

    info!(path = %path.display(), width = image.width(), height = image.height(), "image saved");
    Ok(())
}

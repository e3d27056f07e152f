use crate::io::error::LoadError;
use image::{ImageBuffer, Rgb, RgbImage};
use log::info;
use std::path::{Path, PathBuf};

/// Converts a packed `0xFFRRGGBB` buffer into an RGB image.
pub fn buffer_to_image(buffer: &[u32], width: usize, height: usize) -> RgbImage {
    ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        let idx = (y as usize) * width + (x as usize);
        let color = buffer.get(idx).copied().unwrap_or(0);
        Rgb([(color >> 16) as u8, (color >> 8) as u8, color as u8])
    })
}

/// Saves a packed `0xFFRRGGBB` buffer; the format follows the file extension.
pub fn save_buffer_to_image<P: AsRef<Path>>(
    buffer: &[u32],
    width: usize,
    height: usize,
    path: P,
) -> Result<(), LoadError> {
    let path = path.as_ref();
    buffer_to_image(buffer, width, height)
        .save(path)
        .map_err(|source| LoadError::Image {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Saved frame to {:?}", path);
    Ok(())
}

/// Output path of frame `index` out of `frame_count`.
///
/// A single frame keeps `base` unchanged; otherwise the index is appended to
/// the file stem, e.g. `out.png` becomes `out_3.png`.
pub fn frame_path(base: &Path, index: usize, frame_count: usize) -> PathBuf {
    if frame_count <= 1 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let file_name = match base.extension() {
        Some(ext) => format!("{}_{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{}", stem, index),
    };
    base.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_channels() {
        let img = buffer_to_image(&[0xFF10_2030, 0xFFFF_FFFF], 2, 1);
        assert_eq!(img.get_pixel(0, 0), &Rgb([0x10, 0x20, 0x30]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn frame_paths_are_numbered_only_for_sequences() {
        let base = Path::new("renders/out.png");
        assert_eq!(frame_path(base, 0, 1), PathBuf::from("renders/out.png"));
        assert_eq!(frame_path(base, 3, 10), PathBuf::from("renders/out_3.png"));
        assert_eq!(frame_path(Path::new("raw"), 1, 2), PathBuf::from("raw_1"));
    }
}

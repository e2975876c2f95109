//! PNG output.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::finalize::RgbImage;

/// Encode `image` as an 8-bit RGB PNG. `optimize` trades speed for the
/// smallest file the encoder can produce.
pub fn encode_png(image: &RgbImage, optimize: bool) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width, image.height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(if optimize {
            png::Compression::Best
        } else {
            png::Compression::Default
        });
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.data)?;
        writer.finish()?;
    }
    Ok(buf)
}

/// Write `image` to `path`, creating the parent directory if needed.
/// Returns the file size in bytes.
pub fn write_png(image: &RgbImage, path: &Path, optimize: bool) -> Result<u64> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let bytes = encode_png(image, optimize)?;
    fs::write(path, &bytes)?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> RgbImage {
        let (width, height) = (6u32, 4u32);
        let data = (0..width * height)
            .flat_map(|i| if i % 2 == 0 { [255, 0, 0] } else { [0, 0, 255] })
            .collect();
        RgbImage { width, height, data }
    }

    #[test]
    fn test_encode_decodes_back() {
        let img = checker();
        let bytes = encode_png(&img, false).unwrap();
        let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut out = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut out).unwrap();
        assert_eq!((info.width, info.height), (6, 4));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(&out[..info.buffer_size()], &img.data[..]);
    }

    #[test]
    fn test_write_creates_parent_dir() {
        let dir = std::env::temp_dir().join(format!("listing-render-out-{}", std::process::id()));
        let path = dir.join("nested").join("out.png");
        let size = write_png(&checker(), &path, true).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), size);
        fs::remove_dir_all(&dir).unwrap();
    }
}

//! Image processor: decode, scale by target width, re-encode as JPEG.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::ScaleTarget;
use crate::error::{IndexError, IndexResult};
use crate::utils::config::OUTPUT_JPEG_QUALITY;

/// Destination size for a `src_w` x `src_h` raster scaled by `scale`. Never below 1x1.
pub fn scaled_dimensions(src_w: u32, src_h: u32, scale: f64) -> (u32, u32) {
    let w = (src_w as f64 * scale).round().max(1.0) as u32;
    let h = (src_h as f64 * scale).round().max(1.0) as u32;
    (w, h)
}

/// Resize encoded image `bytes` so its width becomes `target.width`.
///
/// The scale factor is `target.width / source_width` and is applied to both axes;
/// `target.height` does not take part. Output is always JPEG at [`OUTPUT_JPEG_QUALITY`].
pub fn resize(bytes: &[u8], target: ScaleTarget) -> IndexResult<Vec<u8>> {
    if !(target.width.is_finite() && target.width > 0.0) {
        return Err(IndexError::Config(format!(
            "target width must be positive, got {}",
            target.width
        )));
    }
    let img = image::load_from_memory(bytes).map_err(|e| IndexError::Decode(e.to_string()))?;
    let (src_w, src_h) = img.dimensions();
    let scale = target.width / src_w as f64;
    let (dst_w, dst_h) = scaled_dimensions(src_w, src_h, scale);
    let resized = img.resize_exact(dst_w, dst_h, FilterType::Lanczos3);
    encode_jpeg(&resized)
}

fn encode_jpeg(img: &DynamicImage) -> IndexResult<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, OUTPUT_JPEG_QUALITY);
        match img {
            DynamicImage::ImageLuma8(gray) => encoder.encode_image(gray),
            // JPEG carries no alpha channel.
            other => encoder.encode_image(&other.to_rgb8()),
        }
        .map_err(|e| IndexError::Encode(e.to_string()))?;
    }
    Ok(buf)
}

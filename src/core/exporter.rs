//! PNG export of the rendered preview.
//!
//! Takes the captured viewport bitmap, scales it to the requested
//! dimensions preserving aspect ratio, and writes the PNG file. Decoding,
//! resampling, and encoding are all delegated to the image crate.

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use super::renderer::{self, Viewport};

/// Render a composed document and save it as a PNG at the target path.
///
/// Returns the path written, for status reporting.
pub fn export_png(
    document: &str,
    target: &Path,
    width: u32,
    height: u32,
    settle_delay_ms: u64,
) -> anyhow::Result<PathBuf> {
    let png = renderer::render_to_png(document, Viewport { width, height }, settle_delay_ms)?;

    let captured = image::load_from_memory(&png).context("decoding captured bitmap")?;
    let scaled = scale_to_fit(&captured, width, height);

    scaled
        .save_with_format(target, ImageFormat::Png)
        .with_context(|| format!("writing {}", target.display()))?;

    log::info!(
        "exported {}x{} PNG to {}",
        scaled.width(),
        scaled.height(),
        target.display()
    );

    Ok(target.to_path_buf())
}

/// Scale a captured bitmap to fit within the requested bounds, keeping
/// its aspect ratio.
pub fn scale_to_fit(image: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = fit_dimensions(image.width(), image.height(), max_width, max_height);
    if (width, height) == (image.width(), image.height()) {
        return image.clone();
    }
    image.resize_exact(width, height, FilterType::Lanczos3)
}

/// Largest dimensions with the source's aspect ratio that fit within
/// `max_width` x `max_height`. Never returns a zero dimension.
pub fn fit_dimensions(src_width: u32, src_height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if src_width == 0 || src_height == 0 {
        return (max_width.max(1), max_height.max(1));
    }

    let scale = (max_width as f64 / src_width as f64).min(max_height as f64 / src_height as f64);

    let width = ((src_width as f64 * scale).round() as u32).max(1);
    let height = ((src_height as f64 * scale).round() as u32).max(1);
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_exact_match() {
        assert_eq!(fit_dimensions(1024, 768, 1024, 768), (1024, 768));
    }

    #[test]
    fn test_fit_downscales_wide_capture() {
        // 2048x768 into a 1024x768 box: width is the limiting axis.
        assert_eq!(fit_dimensions(2048, 768, 1024, 768), (1024, 384));
    }

    #[test]
    fn test_fit_downscales_tall_capture() {
        // 1024x1536 into a 1024x768 box: height is the limiting axis.
        assert_eq!(fit_dimensions(1024, 1536, 1024, 768), (512, 768));
    }

    #[test]
    fn test_fit_upscales_small_capture() {
        assert_eq!(fit_dimensions(100, 100, 768, 400), (400, 400));
    }

    #[test]
    fn test_fit_never_returns_zero() {
        assert_eq!(fit_dimensions(4000, 1, 100, 100), (100, 1));
        assert_eq!(fit_dimensions(0, 0, 100, 200), (100, 200));
    }

    #[test]
    fn test_scale_to_fit_preserves_ratio() {
        let source = DynamicImage::new_rgba8(800, 400);
        let scaled = scale_to_fit(&source, 400, 400);
        assert_eq!((scaled.width(), scaled.height()), (400, 200));
    }

    #[test]
    fn test_scale_to_fit_noop_when_already_fitting() {
        let source = DynamicImage::new_rgba8(320, 240);
        let scaled = scale_to_fit(&source, 320, 240);
        assert_eq!((scaled.width(), scaled.height()), (320, 240));
    }
}

//! Caption rendering: best-fit font sizing and compositing the two caption
//! lines under the QR image.
//!
//! Text measurement sits behind the [`MeasureText`] trait so the fitting
//! loop can be exercised without font assets. The default implementation
//! loads an embedded DejaVu Sans Mono face (free license), overridable via
//! the caption config.

use std::fs;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{GrayImage, Luma};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::config::CaptionStyle;
use crate::error::{CoreError, CoreResult};

const EMBEDDED_FONT: &[u8] = include_bytes!("../assets/DejaVuSansMono-Bold.ttf");

/// Measures rendered line widths at a given font size.
pub trait MeasureText {
    fn line_width(&self, text: &str, size: u32) -> u32;
}

pub struct CaptionFont {
    font: FontVec,
}

impl CaptionFont {
    pub fn embedded() -> CoreResult<Self> {
        let font = FontVec::try_from_vec(EMBEDDED_FONT.to_vec())
            .map_err(|_| CoreError::Font("embedded caption font is invalid".to_string()))?;
        Ok(CaptionFont { font })
    }

    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let bytes = fs::read(path)
            .map_err(|e| CoreError::Font(format!("failed to read {}: {e}", path.display())))?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|_| CoreError::Font(format!("{} is not a valid font", path.display())))?;
        Ok(CaptionFont { font })
    }

    /// Loads the configured font, falling back to the embedded one.
    pub fn load(style: &CaptionStyle) -> CoreResult<Self> {
        match &style.font {
            Some(path) => CaptionFont::from_file(path),
            None => CaptionFont::embedded(),
        }
    }
}

impl MeasureText for CaptionFont {
    fn line_width(&self, text: &str, size: u32) -> u32 {
        text_size(PxScale::from(size as f32), &self.font, text).0
    }
}

/// Result of the font-size search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFit {
    pub size: u32,
    /// True when the size had to shrink below the configured maximum, so
    /// the caller can warn.
    pub reduced: bool,
}

/// Finds the largest font size, starting at `font_size_max`, at which both
/// caption lines plus the quiet-zone margin fit the image width.
pub fn fit_font_size(
    measure: &impl MeasureText,
    image_width: u32,
    margin: u32,
    line_one: &str,
    line_two: &str,
    font_size_max: u32,
) -> CoreResult<FontFit> {
    let mut size = font_size_max;
    loop {
        let width = measure
            .line_width(line_one, size)
            .max(measure.line_width(line_two, size));

        if width + margin <= image_width {
            return Ok(FontFit {
                size,
                reduced: size < font_size_max,
            });
        }

        size -= 1;
        if size == 0 {
            return Err(CoreError::Caption(
                "no font size fits the caption text".to_string(),
            ));
        }
    }
}

/// Extends the QR image downward and draws both caption lines centered in
/// black on white.
pub fn compose(
    qr_image: &GrayImage,
    line_one: &str,
    line_two: &str,
    font: &CaptionFont,
    style: &CaptionStyle,
    border_px: u32,
) -> CoreResult<(GrayImage, FontFit)> {
    let width = qr_image.width();
    let fit = fit_font_size(font, width, border_px, line_one, line_two, style.font_size_max)?;

    let caption_height =
        style.padding_top + fit.size + style.line_spacing + fit.size + style.padding_bottom;
    let height = qr_image.height() + caption_height + border_px;

    let mut canvas = GrayImage::from_pixel(width, height, Luma([255]));
    image::imageops::replace(&mut canvas, qr_image, 0, 0);

    let scale = PxScale::from(fit.size as f32);
    let mut y = qr_image.height() + style.padding_top;

    for line in [line_one, line_two] {
        let line_width = font.line_width(line, fit.size);
        let x = width.saturating_sub(line_width) / 2;
        draw_text_mut(
            &mut canvas,
            Luma([0]),
            x as i32,
            y as i32,
            scale,
            &font.font,
            line,
        );
        y += fit.size + style.line_spacing;
    }

    Ok((canvas, fit))
}

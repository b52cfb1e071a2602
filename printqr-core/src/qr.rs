//! Thin wrapper over the `qrcode` crate.
//!
//! Builds the QR symbol with the configured error-correction level and
//! version, renders it to a grayscale image at the configured module size
//! and quiet zone, and produces a half-block unicode preview for the
//! terminal.

use image::{GrayImage, Luma};
use qrcode::render::unicode;
use qrcode::{Color, EcLevel, QrCode, Version};

use crate::config::{ErrorCorrection, QrStyle, QrVersion};
use crate::error::{CoreError, CoreResult};

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

pub struct Qr {
    code: QrCode,
}

/// Builds a QR symbol for the payload, either fitting the version to the
/// data or forcing the configured one.
pub fn build(payload: &str, style: &QrStyle) -> CoreResult<Qr> {
    let ec = style.error_correction.into();
    let code = match style.version {
        QrVersion::Auto => QrCode::with_error_correction_level(payload, ec),
        QrVersion::Fixed(n) => QrCode::with_version(payload, Version::Normal(i16::from(n)), ec),
    }
    .map_err(|e| CoreError::Qr(e.to_string()))?;
    Ok(Qr { code })
}

impl Qr {
    /// Symbol version actually used (1-40).
    pub fn version_number(&self) -> i16 {
        match self.code.version() {
            Version::Normal(n) | Version::Micro(n) => n,
        }
    }

    /// Modules per side, excluding the quiet zone.
    pub fn module_count(&self) -> u32 {
        self.code.width() as u32
    }

    /// Renders the symbol into a grayscale image. Module colors are drawn
    /// by hand so the image dimensions follow directly from the style.
    pub fn to_image(&self, style: &QrStyle) -> GrayImage {
        let module_size = style.module_size;
        let border = style.border;
        let modules = self.module_count();
        let size = (modules + border * 2) * module_size;

        let mut image = GrayImage::from_pixel(size, size, Luma([255]));

        for (i, color) in self.code.to_colors().iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let x = (i as u32) % modules;
            let y = (i as u32) / modules;
            let px = (border + x) * module_size;
            let py = (border + y) * module_size;
            for dy in 0..module_size {
                for dx in 0..module_size {
                    image.put_pixel(px + dx, py + dy, Luma([0]));
                }
            }
        }

        image
    }

    /// Half-block unicode rendering for the terminal preview.
    pub fn to_unicode(&self) -> String {
        self.code
            .render::<unicode::Dense1x2>()
            .quiet_zone(false)
            .build()
    }
}

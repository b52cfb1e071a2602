//! Core library for generating printable QR-code labels for filament spools.
//!
//! This crate provides the print-settings catalog, payload encoding, QR
//! symbol rendering, caption compositing, and artifact writing. The `pqr`
//! binary in `printqr-cli` drives it.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use printqr_core::{artifacts, caption, qr, Config, Encoding, PrintSettings};
//!
//! let config = Config::load(true).unwrap();
//! let mut settings = PrintSettings::load().unwrap();
//! config.apply_print_settings(&mut settings).unwrap();
//! settings.get_mut("filament-name").unwrap().update_text("Galaxy Black").unwrap();
//! settings.stamp_date(&config.templates.date).unwrap();
//!
//! let payload = printqr_core::encode::encode(&settings, Encoding::Toml, false).unwrap();
//! let symbol = qr::build(&payload, &config.qr).unwrap();
//! let image = symbol.to_image(&config.qr);
//!
//! let font = caption::CaptionFont::load(&config.caption).unwrap();
//! let (label, _fit) = caption::compose(
//!     &image,
//!     "Galaxy Black",
//!     "2026-01-01",
//!     &font,
//!     &config.caption,
//!     config.qr.border_px(),
//! ).unwrap();
//!
//! let context = settings.template_context();
//! let basename = artifacts::generate_basename(
//!     &config.templates.filename,
//!     &context,
//!     &config.templates.filename_transforms,
//! ).unwrap();
//! artifacts::write_artifacts(
//!     &label,
//!     &printqr_core::encode::dump(&settings).unwrap(),
//!     std::path::Path::new("."),
//!     &basename,
//!     config.qr.format,
//!     None,
//! ).unwrap();
//! ```

pub mod artifacts;
pub mod caption;
pub mod config;
pub mod encode;
pub mod error;
pub mod qr;
pub mod settings;
pub mod template;

// Image buffers cross the crate boundary, so callers get the same `image`
// the library was built against.
pub use image;

pub use config::Config;
pub use encode::Encoding;
pub use error::{CoreError, CoreResult};
pub use settings::PrintSettings;

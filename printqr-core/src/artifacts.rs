//! Output artifacts: filename generation and writing the label image, the
//! TOML record sidecar, and the most-recent-label history copy.

use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::ImageFormat;
use crate::error::{CoreError, CoreResult};
use crate::settings::TemplateContext;
use crate::template;

/// Post-processing applied to rendered filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringTransform {
    Lowercase,
    SpacesToHyphens,
}

impl StringTransform {
    pub fn apply(self, text: &str) -> String {
        match self {
            StringTransform::Lowercase => text.to_lowercase(),
            StringTransform::SpacesToHyphens => text.replace(' ', "-"),
        }
    }
}

/// Renders the filename template and applies the configured transforms.
/// The result is trimmed and has no extension.
pub fn generate_basename(
    filename_template: &str,
    context: &TemplateContext,
    transforms: &[StringTransform],
) -> CoreResult<String> {
    let rendered = template::render(filename_template, context)?;
    let mut basename = rendered.trim().to_string();
    for transform in transforms {
        basename = transform.apply(&basename);
    }
    if basename.is_empty() {
        return Err(CoreError::PathError(format!(
            "filename template '{filename_template}' produced an empty name"
        )));
    }
    Ok(basename)
}

/// Where the artifacts of one generated label ended up.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub image: PathBuf,
    pub record: PathBuf,
    pub history: Option<PathBuf>,
}

/// Writes the label image and its TOML record into `output_dir`, creating
/// the directory if needed. When `history_path` is given, the record is
/// also mirrored there (replacing the previous one).
pub fn write_artifacts(
    image: &GrayImage,
    record: &str,
    output_dir: &Path,
    basename: &str,
    format: ImageFormat,
    history_path: Option<&Path>,
) -> CoreResult<ArtifactPaths> {
    fs::create_dir_all(output_dir)?;

    let image_path = output_dir.join(format!("{basename}.{}", format.extension()));
    let record_path = output_dir.join(format!("{basename}.toml"));

    debug!("Writing label image to {}", image_path.display());
    image.save_with_format(&image_path, format.into())?;

    debug!("Writing settings record to {}", record_path.display());
    fs::write(&record_path, record)?;

    let history = match history_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, record)?;
            Some(path.to_path_buf())
        }
        None => None,
    };

    Ok(ArtifactPaths {
        image: image_path,
        record: record_path,
        history,
    })
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpg => image::ImageFormat::Jpeg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use tempfile::TempDir;

    fn context() -> TemplateContext {
        let mut context = TemplateContext::new();
        context.insert("filament-name".to_string(), "Galaxy Black".to_string());
        context.insert("date".to_string(), "2026-01-01".to_string());
        context
    }

    #[test]
    fn transforms_apply_in_order() {
        let transforms = [StringTransform::Lowercase, StringTransform::SpacesToHyphens];
        let name = generate_basename("{filament-name}-{date}", &context(), &transforms).unwrap();
        assert_eq!(name, "galaxy-black-2026-01-01");
    }

    #[test]
    fn basename_is_trimmed() {
        let name = generate_basename("  {date}  ", &context(), &[]).unwrap();
        assert_eq!(name, "2026-01-01");
    }

    #[test]
    fn empty_basename_is_rejected() {
        assert!(matches!(
            generate_basename("   ", &context(), &[]),
            Err(CoreError::PathError(_))
        ));
    }

    #[test]
    fn writes_image_record_and_history() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("labels");
        let history = dir.path().join("data").join("history.toml");
        let image = GrayImage::from_pixel(16, 16, Luma([255]));

        let paths = write_artifacts(
            &image,
            "[filament]\nname = \"PLA\"\n",
            &out,
            "pla-2026-01-01",
            ImageFormat::Png,
            Some(&history),
        )
        .unwrap();

        assert_eq!(paths.image, out.join("pla-2026-01-01.png"));
        assert_eq!(paths.record, out.join("pla-2026-01-01.toml"));
        assert!(paths.image.is_file());
        let record = fs::read_to_string(&paths.record).unwrap();
        assert!(record.contains("name = \"PLA\""));
        assert_eq!(fs::read_to_string(&history).unwrap(), record);
    }

    #[test]
    fn history_is_replaced_not_appended() {
        let dir = TempDir::new().unwrap();
        let history = dir.path().join("history.toml");
        let image = GrayImage::from_pixel(16, 16, Luma([255]));

        for record in ["first = 1\n", "second = 2\n"] {
            write_artifacts(
                &image,
                record,
                dir.path(),
                "label",
                ImageFormat::Png,
                Some(&history),
            )
            .unwrap();
        }

        assert_eq!(fs::read_to_string(&history).unwrap(), "second = 2\n");
    }

    #[test]
    fn jpg_extension_follows_format() {
        let dir = TempDir::new().unwrap();
        let image = GrayImage::from_pixel(16, 16, Luma([255]));
        let paths =
            write_artifacts(&image, "", dir.path(), "label", ImageFormat::Jpg, None).unwrap();
        assert_eq!(paths.image, dir.path().join("label.jpg"));
        assert!(paths.history.is_none());
    }
}

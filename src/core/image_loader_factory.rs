use crate::core::image_format::ImageFormat;
use egui::ColorImage;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub trait ImageLoader: Send + Sync {
    /// Decodifica y reduce la imagen hasta caber en `max` (ancho, alto).
    fn load(&self, path: &Path, max: (u32, u32)) -> Result<ColorImage, LoadError>;
    fn supports_format(&self, format: ImageFormat) -> bool;
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("format error: {0}")]
    Format(String),
    #[error("unsupported format")]
    UnsupportedFormat,
}

pub struct RasterImageLoader;

impl ImageLoader for RasterImageLoader {
    fn load(&self, path: &Path, max: (u32, u32)) -> Result<ColorImage, LoadError> {
        use image::ImageReader;

        let reader = ImageReader::open(path)?
            .with_guessed_format()
            .map_err(|e| LoadError::Format(e.to_string()))?;

        let img = reader
            .decode()
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        let (max_w, max_h) = max;
        let img = if img.width() > max_w || img.height() > max_h {
            img.resize(max_w, max_h, image::imageops::FilterType::Triangle)
        } else {
            img
        };

        let rgba_img = img.to_rgba8();
        let size = [rgba_img.width() as usize, rgba_img.height() as usize];
        Ok(ColorImage::from_rgba_unmultiplied(size, rgba_img.as_raw()))
    }

    fn supports_format(&self, _format: ImageFormat) -> bool {
        true
    }
}

#[derive(Clone)]
pub struct ImageLoaderFactory {
    loaders: Arc<Vec<Box<dyn ImageLoader>>>,
}

impl Default for ImageLoaderFactory {
    fn default() -> Self {
        Self::new(vec![Box::new(RasterImageLoader)])
    }
}

impl ImageLoaderFactory {
    pub fn new(loaders: Vec<Box<dyn ImageLoader>>) -> Self {
        Self {
            loaders: Arc::new(loaders),
        }
    }

    pub fn load_image(&self, path: &Path, max: (u32, u32)) -> Result<ColorImage, LoadError> {
        let format = ImageFormat::from_path(path).ok_or(LoadError::UnsupportedFormat)?;

        self.loaders
            .iter()
            .find(|loader| loader.supports_format(format))
            .ok_or(LoadError::UnsupportedFormat)?
            .load(path, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn large_images_are_scaled_down_keeping_ratio() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbaImage::new(40, 20).save(&path).unwrap();

        let img = ImageLoaderFactory::default().load_image(&path, (10, 10)).unwrap();
        assert_eq!(img.size, [10, 5]);
    }

    #[test]
    fn small_images_keep_their_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.png");
        image::RgbaImage::new(8, 6).save(&path).unwrap();

        let img = ImageLoaderFactory::default().load_image(&path, (100, 100)).unwrap();
        assert_eq!(img.size, [8, 6]);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let result = ImageLoaderFactory::default().load_image(Path::new("notes.txt"), (10, 10));
        assert!(matches!(result, Err(LoadError::UnsupportedFormat)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result =
            ImageLoaderFactory::default().load_image(&dir.path().join("gone.jpg"), (10, 10));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let result = ImageLoaderFactory::default().load_image(&path, (10, 10));
        assert!(matches!(result, Err(LoadError::Decode(_))));
    }
}

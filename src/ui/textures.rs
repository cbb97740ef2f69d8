use crate::core::image_cache::ImageCache;
use crate::core::preload_manager::{ImageKind, LoadedImage};
use egui::TextureHandle;
use std::collections::{HashMap, HashSet};

pub enum TextureSlot {
    Ready(TextureHandle),
    Failed,
}

/// Texturas de la galería: miniaturas (todas) y originales (LRU).
pub struct GalleryTextures {
    thumbnails: HashMap<usize, TextureSlot>,
    full: ImageCache<usize, TextureHandle>,
    failed_full: HashSet<usize>,
}

impl GalleryTextures {
    /// `full_capacity` debe cubrir toda la ventana de precarga, o una tanda
    /// de vecinas echaría de la caché la imagen actual.
    pub fn new(full_capacity: usize) -> Self {
        Self {
            thumbnails: HashMap::new(),
            full: ImageCache::new(full_capacity),
            failed_full: HashSet::new(),
        }
    }

    /// Las texturas sólo se crean en el hilo de UI.
    pub fn ingest(&mut self, ctx: &egui::Context, loaded: LoadedImage) {
        let LoadedImage { index, kind, result, .. } = loaded;
        match (kind, result) {
            (ImageKind::Thumbnail, Ok(image)) => {
                let texture =
                    ctx.load_texture(format!("thumb_{index}"), image, egui::TextureOptions::LINEAR);
                self.thumbnails.insert(index, TextureSlot::Ready(texture));
            }
            (ImageKind::Thumbnail, Err(_)) => {
                self.thumbnails.insert(index, TextureSlot::Failed);
            }
            (ImageKind::Full, Ok(image)) => {
                let texture =
                    ctx.load_texture(format!("full_{index}"), image, egui::TextureOptions::LINEAR);
                self.failed_full.remove(&index);
                self.full.insert(index, texture);
                tracing::trace!(index, cached = self.full.len(), "full image ready");
            }
            (ImageKind::Full, Err(_)) => {
                self.failed_full.insert(index);
            }
        }
    }

    pub fn thumbnail(&self, index: usize) -> Option<&TextureSlot> {
        self.thumbnails.get(&index)
    }

    /// Original si ya está; si no, la miniatura como sustituto.
    pub fn best_for_lightbox(&mut self, index: usize) -> Option<TextureSlot> {
        if let Some(texture) = self.full.get(&index) {
            return Some(TextureSlot::Ready(texture.clone()));
        }
        let thumbnail = match self.thumbnails.get(&index) {
            Some(TextureSlot::Ready(texture)) => Some(TextureSlot::Ready(texture.clone())),
            _ => None,
        };
        if thumbnail.is_none() && self.failed_full.contains(&index) {
            return Some(TextureSlot::Failed);
        }
        thumbnail
    }

    pub fn has_full(&self, index: usize) -> bool {
        self.full.contains(&index) || self.failed_full.contains(&index)
    }

    pub fn clear(&mut self) {
        self.thumbnails.clear();
        self.full.clear();
        self.failed_full.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::preload_manager::{indices_around, PreloadManager};
    use egui::{Color32, ColorImage};

    fn full(index: usize) -> LoadedImage {
        LoadedImage::ready(index, ImageKind::Full, ColorImage::new([2, 2], Color32::WHITE))
    }

    #[test]
    fn whole_preload_window_stays_cached() {
        let ctx = egui::Context::default();
        let manager = PreloadManager::new(5);
        let mut textures = GalleryTextures::new(manager.cache_capacity());

        let current = 10;
        let window = indices_around(current, 40, 5);
        assert_eq!(window.len(), 11);
        for index in window {
            textures.ingest(&ctx, full(index));
        }

        assert!(textures.has_full(current));
        assert!(matches!(textures.best_for_lightbox(current), Some(TextureSlot::Ready(_))));
    }

    #[test]
    fn failed_full_image_without_thumbnail_is_reported() {
        let ctx = egui::Context::default();
        let mut textures = GalleryTextures::new(1);
        textures.ingest(&ctx, LoadedImage::failed(3, ImageKind::Full));

        assert!(textures.has_full(3));
        assert!(matches!(textures.best_for_lightbox(3), Some(TextureSlot::Failed)));
        assert!(textures.best_for_lightbox(4).is_none());
    }
}

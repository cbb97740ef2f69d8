use crate::config::config::{FULL_IMAGE_CACHE_SIZE, FULL_IMAGE_MAX, MAX_PRELOAD_RANGE};
use crate::core::gallery::GalleryCollection;
use crate::core::image_loader_factory::{ImageLoaderFactory, LoadError};
use egui::ColorImage;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Thumbnail,
    Full,
}

#[derive(Debug, Clone)]
struct ImageRequest {
    epoch: u64,
    index: usize,
    kind: ImageKind,
    path: PathBuf,
    max: (u32, u32),
}

pub struct LoadedImage {
    pub index: usize,
    pub kind: ImageKind,
    pub result: Result<ColorImage, LoadError>,
    epoch: u64,
}

#[cfg(test)]
impl LoadedImage {
    pub(crate) fn ready(index: usize, kind: ImageKind, image: ColorImage) -> Self {
        Self { index, kind, result: Ok(image), epoch: 0 }
    }

    pub(crate) fn failed(index: usize, kind: ImageKind) -> Self {
        Self { index, kind, result: Err(LoadError::UnsupportedFormat), epoch: 0 }
    }
}

/// Decodifica imágenes fuera del hilo de UI y las entrega por canal.
pub struct PreloadManager {
    image_receiver: mpsc::Receiver<LoadedImage>,
    image_sender: mpsc::Sender<LoadedImage>,
    in_flight: Arc<Mutex<HashSet<(usize, ImageKind)>>>,
    preload_range: usize,
    epoch: u64,
    loader_factory: ImageLoaderFactory,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl PreloadManager {
    pub fn new(preload_range: usize) -> Self {
        let (sender, receiver) = mpsc::channel();

        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(num_cpus::get().max(2))
            .thread_name(|i| format!("image-loader-{i}"))
            .build()
        {
            Ok(pool) => Some(Arc::new(pool)),
            Err(e) => {
                tracing::warn!("falling back to global rayon pool: {e}");
                None
            }
        };

        Self {
            image_receiver: receiver,
            image_sender: sender,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            preload_range: clamp_preload_range(preload_range),
            epoch: 0,
            loader_factory: ImageLoaderFactory::default(),
            pool,
        }
    }

    /// Plazas de la caché de originales: cabe la ventana completa de precarga.
    pub fn cache_capacity(&self) -> usize {
        full_cache_capacity(self.preload_range)
    }

    /// Invalida todo lo pendiente (p. ej. al abrir otra carpeta).
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        // Lo que ya estaba en el canal es de la época anterior.
        while self.image_receiver.try_recv().is_ok() {}
    }

    pub fn request_thumbnails(&self, gallery: &GalleryCollection, size: u32) {
        let requests = gallery
            .iter()
            .enumerate()
            .map(|(index, item)| ImageRequest {
                epoch: self.epoch,
                index,
                kind: ImageKind::Thumbnail,
                path: item.image().to_path_buf(),
                max: (size, size),
            })
            .collect();
        self.spawn_loading(requests);
    }

    /// Pide la imagen actual y sus vecinas que `is_cached` no tenga ya.
    pub fn preload_around(
        &self,
        gallery: &GalleryCollection,
        current_index: usize,
        is_cached: impl Fn(usize) -> bool,
    ) {
        let requests = indices_around(current_index, gallery.len(), self.preload_range)
            .into_iter()
            .filter(|&index| !is_cached(index))
            .filter_map(|index| {
                gallery.get(index).map(|item| ImageRequest {
                    epoch: self.epoch,
                    index,
                    kind: ImageKind::Full,
                    path: item.image().to_path_buf(),
                    max: FULL_IMAGE_MAX,
                })
            })
            .collect();
        self.spawn_loading(requests);
    }

    pub fn process_loaded_images(&self) -> Vec<LoadedImage> {
        self.image_receiver
            .try_iter()
            .filter(|loaded| loaded.epoch == self.epoch)
            .collect()
    }

    pub fn is_loading(&self) -> bool {
        !self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    fn spawn_loading(&self, requests: Vec<ImageRequest>) {
        let requests: Vec<ImageRequest> = {
            let mut in_flight = self
                .in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            requests
                .into_iter()
                .filter(|req| in_flight.insert((req.index, req.kind)))
                .collect()
        };
        if requests.is_empty() {
            return;
        }

        let sender = self.image_sender.clone();
        let in_flight = Arc::clone(&self.in_flight);
        let factory = self.loader_factory.clone();

        let job = move || {
            requests
                .into_par_iter()
                .for_each_with(sender, |sender, req| {
                    let result = factory.load_image(&req.path, req.max);
                    if let Err(e) = &result {
                        tracing::warn!(path = %req.path.display(), "could not load image: {e}");
                    }

                    in_flight
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .remove(&(req.index, req.kind));

                    // El receptor puede haberse cerrado al salir de la app
                    let _ = sender.send(LoadedImage {
                        index: req.index,
                        kind: req.kind,
                        result,
                        epoch: req.epoch,
                    });
                });
        };

        match &self.pool {
            Some(pool) => pool.spawn(job),
            None => rayon::spawn(job),
        }
    }
}

/// Índice actual primero, luego vecinas alternando hacia delante y atrás.
pub fn indices_around(current: usize, len: usize, range: usize) -> Vec<usize> {
    if current >= len {
        return Vec::new();
    }

    let mut indices = vec![current];
    for step in 1..=range.min(len) {
        if current + step < len {
            indices.push(current + step);
        }
        if let Some(prev) = current.checked_sub(step) {
            indices.push(prev);
        }
    }
    indices
}

fn clamp_preload_range(range: usize) -> usize {
    if range > MAX_PRELOAD_RANGE {
        tracing::warn!(range, max = MAX_PRELOAD_RANGE, "preload range too large, capping it");
    }
    range.min(MAX_PRELOAD_RANGE)
}

pub fn full_cache_capacity(preload_range: usize) -> usize {
    (2 * preload_range + 1).max(FULL_IMAGE_CACHE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gallery::GalleryItem;
    use proptest::prelude::*;
    use std::time::{Duration, Instant};
    use tempfile::tempdir;

    #[test]
    fn neighbours_are_clamped_to_gallery() {
        assert_eq!(indices_around(0, 5, 1), vec![0, 1]);
        assert_eq!(indices_around(2, 5, 2), vec![2, 3, 1, 4, 0]);
        assert_eq!(indices_around(4, 5, 1), vec![4, 3]);
        assert!(indices_around(0, 0, 1).is_empty());
    }

    #[test]
    fn huge_range_is_bounded_by_gallery() {
        let started = Instant::now();
        assert_eq!(indices_around(2, 5, usize::MAX), vec![2, 3, 1, 4, 0]);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn configured_range_is_capped() {
        let manager = PreloadManager::new(usize::MAX);
        assert_eq!(manager.preload_range, MAX_PRELOAD_RANGE);
        assert_eq!(manager.cache_capacity(), 2 * MAX_PRELOAD_RANGE + 1);
    }

    proptest! {
        #[test]
        fn request_window_fits_in_cache(
            range in 0usize..1_000_000,
            len in 0usize..64,
            current in 0usize..64,
        ) {
            let range = clamp_preload_range(range);
            let window = indices_around(current, len, range);
            prop_assert!(window.len() <= full_cache_capacity(range));
        }
    }

    fn wait_for(manager: &PreloadManager, count: usize) -> Vec<LoadedImage> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut loaded = Vec::new();
        while loaded.len() < count && Instant::now() < deadline {
            loaded.extend(manager.process_loaded_images());
            std::thread::sleep(Duration::from_millis(10));
        }
        loaded
    }

    #[test]
    fn loads_thumbnails_and_reports_failures() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.png");
        image::RgbaImage::new(64, 32).save(&good).unwrap();
        let missing = dir.path().join("missing.png");

        let gallery = GalleryCollection::new(vec![
            GalleryItem::new(good, "Good", "", ""),
            GalleryItem::new(missing, "Missing", "", ""),
        ]);

        let manager = PreloadManager::new(1);
        manager.request_thumbnails(&gallery, 16);
        let mut loaded = wait_for(&manager, 2);
        loaded.sort_by_key(|l| l.index);

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].kind, ImageKind::Thumbnail);
        assert_eq!(loaded[0].result.as_ref().unwrap().size, [16, 8]);
        assert!(loaded[1].result.is_err());
    }

    #[test]
    fn cached_neighbours_are_skipped() {
        let dir = tempdir().unwrap();
        let items = (0..3)
            .map(|i| {
                let path = dir.path().join(format!("{i}.png"));
                image::RgbaImage::new(4, 4).save(&path).unwrap();
                GalleryItem::new(path, "", "", "")
            })
            .collect();
        let gallery = GalleryCollection::new(items);

        let manager = PreloadManager::new(1);
        manager.preload_around(&gallery, 1, |index| index == 0);
        let mut indices: Vec<_> = wait_for(&manager, 2).iter().map(|l| l.index).collect();
        indices.sort();
        assert_eq!(indices, vec![1, 2]);
    }
}
